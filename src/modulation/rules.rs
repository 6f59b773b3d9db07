//! The ordered modulation rules and their configuration.

use serde::{Deserialize, Serialize};

use super::shawwa::{classify_note_name, shawwa_steps, DegreeClass};
use super::ModulationDegree;
use crate::lattice::{Lattice, BASE_OCTAVE};
use crate::template::Maqam;

fn default_alternate_third_steps_from_tonic() -> i64 {
    6
}

fn default_alternate_third_steps_from_second() -> i64 {
    2
}

fn default_sixth_without_third() -> SixthDegreeCondition {
    SixthDegreeCondition::StepsFromTonic(vec![16, 17])
}

/// Extra requirement on the sixth degree before it may carry a modulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", tag = "rule", content = "steps")]
pub enum SixthDegreeCondition {
    /// The fifth and seventh degrees are both natural.
    #[default]
    BetweenNaturals,
    /// The sixth lies one of these Shawwā steps above the tonic.
    StepsFromTonic(Vec<i64>),
    /// The sixth lies one of these Shawwā steps above the fifth.
    StepsFromPrevious(Vec<i64>),
    Always,
    Never,
}

impl SixthDegreeCondition {
    pub fn holds(&self, source: &SourceDegrees) -> bool {
        let steps_between = |from: usize, allowed: &[i64]| {
            match (source.degree(from), source.degree(6)) {
                (Some(from), Some(sixth)) => shawwa_steps(from, sixth).map_or(false, |s| allowed.contains(&s)),
                _ => false,
            }
        };
        match self {
            SixthDegreeCondition::BetweenNaturals => {
                source.degree_class(5) == DegreeClass::Natural && source.degree_class(7) == DegreeClass::Natural
            }
            SixthDegreeCondition::StepsFromTonic(allowed) => steps_between(1, allowed),
            SixthDegreeCondition::StepsFromPrevious(allowed) => steps_between(5, allowed),
            SixthDegreeCondition::Always => true,
            SixthDegreeCondition::Never => false,
        }
    }
}

/// Configurable constants of the rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModulationRules {
    /// Shawwā steps from the tonic to an acceptable alternate third.
    #[serde(default = "default_alternate_third_steps_from_tonic")]
    pub alternate_third_steps_from_tonic: i64,
    /// Shawwā steps from the second degree to an acceptable alternate third.
    #[serde(default = "default_alternate_third_steps_from_second")]
    pub alternate_third_steps_from_second: i64,
    /// Checked when the source has a usable third.
    #[serde(default)]
    pub sixth_with_third: SixthDegreeCondition,
    /// Checked when the source has neither a natural third nor an alternate.
    #[serde(default = "default_sixth_without_third")]
    pub sixth_without_third: SixthDegreeCondition,
}

impl Default for ModulationRules {
    fn default() -> Self {
        ModulationRules {
            alternate_third_steps_from_tonic: default_alternate_third_steps_from_tonic(),
            alternate_third_steps_from_second: default_alternate_third_steps_from_second(),
            sixth_with_third: SixthDegreeCondition::default(),
            sixth_without_third: default_sixth_without_third(),
        }
    }
}

/// Scale degrees of a source maqam, read once before classifying candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDegrees {
    /// Ascending note names; degree 1 first.
    pub note_names: Vec<&'static str>,
    /// Half-step note standing in for a third that is not natural.
    pub alternate_third: Option<&'static str>,
}

impl SourceDegrees {
    pub fn from_maqam(lattice: &Lattice, source: &Maqam, rules: &ModulationRules) -> Self {
        let note_names = source.ascending_note_names();
        let mut degrees = SourceDegrees {
            note_names,
            alternate_third: None,
        };
        if degrees.degree_class(3) != DegreeClass::Natural {
            degrees.alternate_third = degrees.find_alternate_third(lattice, rules);
        }
        degrees
    }

    /// Note name of the 1-based `degree`.
    pub fn degree(&self, degree: usize) -> Option<&'static str> {
        degree.checked_sub(1).and_then(|i| self.note_names.get(i)).copied()
    }

    pub fn degree_class(&self, degree: usize) -> DegreeClass {
        self.degree(degree).map_or(DegreeClass::Invalid, classify_note_name)
    }

    /// A natural third or an accepted alternate.
    pub fn has_usable_third(&self) -> bool {
        self.degree_class(3) == DegreeClass::Natural || self.alternate_third.is_some()
    }

    /// The first half-step note at or below the third, scanning down to the start of the
    /// base octave, kept only at the configured distances from the tonic and second degree.
    fn find_alternate_third(&self, lattice: &Lattice, rules: &ModulationRules) -> Option<&'static str> {
        let third = lattice.position_of(self.degree(3)?)?;
        let octave_start = lattice.iter().position(|pc| pc.octave == BASE_OCTAVE)?;
        if third < octave_start {
            return None;
        }

        let candidate = lattice.pitch_classes()[octave_start..=third]
            .iter()
            .rev()
            .map(|pc| pc.note_name)
            .find(|name| classify_note_name(name) == DegreeClass::HalfStep)?;

        let from_tonic = shawwa_steps(self.degree(1)?, candidate)?;
        let from_second = shawwa_steps(self.degree(2)?, candidate)?;
        (from_tonic == rules.alternate_third_steps_from_tonic
            && from_second == rules.alternate_third_steps_from_second)
            .then_some(candidate)
    }
}

/// Bucket of a candidate with tonic `tonic`. Rules are tried in order; the first that
/// applies wins.
pub fn classify_tonic(source: &SourceDegrees, tonic: &str, rules: &ModulationRules) -> Option<ModulationDegree> {
    let class = classify_note_name(tonic);
    let natural = class == DegreeClass::Natural;
    let natural_or_half = natural || class == DegreeClass::HalfStep;
    let on = |degree: usize| source.degree(degree) == Some(tonic);

    if on(1) && natural {
        Some(ModulationDegree::One)
    } else if on(3) && natural {
        Some(ModulationDegree::Three)
    } else if source.alternate_third == Some(tonic) && class == DegreeClass::HalfStep {
        Some(ModulationDegree::ThreeAlternate)
    } else if on(4) && natural_or_half {
        Some(ModulationDegree::Four)
    } else if on(5) && natural_or_half {
        Some(ModulationDegree::Five)
    } else if on(6) && natural {
        if source.has_usable_third() {
            rules.sixth_with_third.holds(source).then_some(ModulationDegree::Six)
        } else {
            rules.sixth_without_third.holds(source).then_some(ModulationDegree::SixNoThird)
        }
    } else {
        None
    }
}
