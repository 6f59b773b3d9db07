//! # Modulation Module
//!
//! Classify where a maqam can modulate, following Sāmī Al-Shawwā's rules (1946).
//!
//! ## Purpose
//! Given a realized source maqam and a pool of realized candidates (maqamat or ajnas), put
//! each candidate in the bucket of the source scale degree its tonic lands on, when that
//! degree is allowed to carry a modulation.
//!
//! ## Sub-modules
//! - `shawwa` - Natural / quarter-step / half-step / invalid class of every note name
//! - `rules` - The ordered rule list and its configurable constants
//!
//! ## Rules
//! Tried in this order; the first that applies wins:
//! 1. **Degree one** - tonic on the source tonic, natural
//! 2. **Degree three** - tonic on the third degree, natural
//! 3. **Alternate third** - tonic on the half-step note standing in for a third that is
//!    not natural
//! 4. **Degree four** - tonic on the fourth degree, natural or half-step
//! 5. **Degree five** - tonic on the fifth degree, natural or half-step
//! 6. **Degree six** - tonic on the sixth degree, natural, under a configurable
//!    condition; the no-third bucket is used when the source has no usable third
//!
//! ## Entry Points
//! - [`classify_modulations()`] - classify already realized candidates
//! - [`maqamat_modulations()`] / [`ajnas_modulations()`] - realize catalogue templates
//!   in the lattice, then classify them

mod rules;
mod shawwa;


pub use rules::{classify_tonic, ModulationRules, SixthDegreeCondition, SourceDegrees};
pub use shawwa::{classify_note_name, shawwa_position, shawwa_steps, DegreeClass, SHAWWA_SCALE};

use serde::Serialize;
use tracing::debug;

use crate::lattice::Lattice;
use crate::template::{Jins, JinsTemplate, Maqam, MaqamTemplate};
use crate::transpose::{jins_transpositions, maqam_transpositions, TranspositionOptions};

/// Source scale degree a modulation pivots on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModulationDegree {
    One,
    Three,
    ThreeAlternate,
    Four,
    Five,
    Six,
    SixNoThird,
}

impl ModulationDegree {
    pub const ALL: [ModulationDegree; 7] = [
        ModulationDegree::One,
        ModulationDegree::Three,
        ModulationDegree::ThreeAlternate,
        ModulationDegree::Four,
        ModulationDegree::Five,
        ModulationDegree::Six,
        ModulationDegree::SixNoThird,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModulationDegree::One => "degree-1",
            ModulationDegree::Three => "degree-3",
            ModulationDegree::ThreeAlternate => "degree-3-alternate",
            ModulationDegree::Four => "degree-4",
            ModulationDegree::Five => "degree-5",
            ModulationDegree::Six => "degree-6",
            ModulationDegree::SixNoThird => "degree-6-no-third",
        }
    }
}

/// Anything that can be a modulation target.
pub trait Modulatable {
    fn ascending_note_names(&self) -> Vec<&'static str>;

    fn tonic_name(&self) -> Option<&'static str> {
        self.ascending_note_names().first().copied()
    }
}

impl Modulatable for Maqam {
    fn ascending_note_names(&self) -> Vec<&'static str> {
        Maqam::ascending_note_names(self)
    }
}

impl Modulatable for Jins {
    fn ascending_note_names(&self) -> Vec<&'static str> {
        self.note_names()
    }
}

/// Candidates sorted into the seven buckets. Buckets keep the order candidates were
/// given in and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Modulations<T> {
    pub on_one: Vec<T>,
    pub on_three: Vec<T>,
    pub on_three_alternate: Vec<T>,
    pub on_four: Vec<T>,
    pub on_five: Vec<T>,
    pub on_six: Vec<T>,
    pub on_six_no_third: Vec<T>,
    /// Half-step note accepted in place of the source's third, if any.
    pub alternate_third_note: Option<&'static str>,
}

impl<T> Modulations<T> {
    fn empty(alternate_third_note: Option<&'static str>) -> Self {
        Modulations {
            on_one: Vec::new(),
            on_three: Vec::new(),
            on_three_alternate: Vec::new(),
            on_four: Vec::new(),
            on_five: Vec::new(),
            on_six: Vec::new(),
            on_six_no_third: Vec::new(),
            alternate_third_note,
        }
    }

    pub fn bucket(&self, degree: ModulationDegree) -> &[T] {
        match degree {
            ModulationDegree::One => &self.on_one,
            ModulationDegree::Three => &self.on_three,
            ModulationDegree::ThreeAlternate => &self.on_three_alternate,
            ModulationDegree::Four => &self.on_four,
            ModulationDegree::Five => &self.on_five,
            ModulationDegree::Six => &self.on_six,
            ModulationDegree::SixNoThird => &self.on_six_no_third,
        }
    }

    fn bucket_mut(&mut self, degree: ModulationDegree) -> &mut Vec<T> {
        match degree {
            ModulationDegree::One => &mut self.on_one,
            ModulationDegree::Three => &mut self.on_three,
            ModulationDegree::ThreeAlternate => &mut self.on_three_alternate,
            ModulationDegree::Four => &mut self.on_four,
            ModulationDegree::Five => &mut self.on_five,
            ModulationDegree::Six => &mut self.on_six,
            ModulationDegree::SixNoThird => &mut self.on_six_no_third,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModulationDegree, &[T])> + '_ {
        ModulationDegree::ALL.into_iter().map(move |degree| (degree, self.bucket(degree)))
    }

    /// Total entries across all buckets.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, bucket)| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort realized `candidates` into buckets against `source`.
///
/// Candidates with the same ascending notes as the source are skipped.
pub fn classify_modulations<T: Modulatable>(
    lattice: &Lattice,
    source: &Maqam,
    candidates: impl IntoIterator<Item = T>,
    rules: &ModulationRules,
) -> Modulations<T> {
    let degrees = SourceDegrees::from_maqam(lattice, source, rules);
    let mut modulations = Modulations::empty(degrees.alternate_third);
    let source_notes = degrees.note_names.clone();

    for candidate in candidates {
        let notes = candidate.ascending_note_names();
        if notes == source_notes {
            continue;
        }
        let Some(tonic) = notes.first().copied() else { continue };
        if let Some(degree) = classify_tonic(&degrees, tonic, rules) {
            modulations.bucket_mut(degree).push(candidate);
        }
    }

    debug!(source = %source.name, found = modulations.len(), "modulations");
    modulations
}

/// Realize every possible maqam of `maqamat` in the lattice and classify the results.
pub fn maqamat_modulations(
    lattice: &Lattice,
    source: &Maqam,
    maqamat: &[MaqamTemplate],
    ajnas: &[JinsTemplate],
    options: &TranspositionOptions,
    rules: &ModulationRules,
) -> Modulations<Maqam> {
    let options = TranspositionOptions {
        include_tahlil: true,
        ..options.clone()
    };
    let candidates = maqamat
        .iter()
        .filter(|template| template.is_possible(lattice))
        .flat_map(|template| maqam_transpositions(lattice, template, ajnas, &options));
    classify_modulations(lattice, source, candidates, rules)
}

/// Realize every possible jins of `ajnas` in the lattice and classify the results.
pub fn ajnas_modulations(
    lattice: &Lattice,
    source: &Maqam,
    ajnas: &[JinsTemplate],
    options: &TranspositionOptions,
    rules: &ModulationRules,
) -> Modulations<Jins> {
    let options = TranspositionOptions {
        include_tahlil: true,
        ..options.clone()
    };
    let candidates = ajnas
        .iter()
        .filter(|template| template.is_possible(lattice))
        .flat_map(|template| jins_transpositions(lattice, template, &options));
    classify_modulations(lattice, source, candidates, rules)
}
