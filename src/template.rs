//! # Ajnas and Maqamat
//!
//! Two kinds of value live here:
//! - **Templates** ([`JinsTemplate`], [`MaqamTemplate`]) are catalogue entries: a name and
//!   ordered note names, independent of any tuning system.
//! - **Realizations** ([`Jins`], [`Maqam`]) bind a template to pitch classes of one
//!   lattice. The tahlil is the realization on the template's own first note; every other
//!   realization is a taswir (transposition).
//!
//! Realizations are produced by [`JinsTemplate::tahlil`], [`MaqamTemplate::tahlil`] and
//! the searches in `transpose`.

use serde::{Deserialize, Serialize};

use crate::interval::{pitch_class_intervals, Interval};
use crate::lattice::{Lattice, PitchClass};

/// Citation of a catalogue entry. Carried through unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceReference {
    pub source_id: String,
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JinsTemplate {
    pub id: String,
    pub name: String,
    pub note_names: Vec<String>,
    #[serde(default)]
    pub comments_english: String,
    #[serde(default)]
    pub comments_arabic: String,
    #[serde(default)]
    pub source_references: Vec<SourceReference>,
}

impl JinsTemplate {
    pub fn new(id: &str, name: &str, note_names: &[&str]) -> Self {
        JinsTemplate {
            id: id.to_string(),
            name: name.to_string(),
            note_names: note_names.iter().map(|n| n.to_string()).collect(),
            comments_english: String::new(),
            comments_arabic: String::new(),
            source_references: Vec::new(),
        }
    }

    /// Every note of the jins exists in the lattice.
    pub fn is_possible(&self, lattice: &Lattice) -> bool {
        !self.note_names.is_empty() && lattice.contains_all(&self.note_names)
    }

    /// The jins on its own notes, or `None` when a note is missing or the jins is too short.
    pub fn tahlil(&self, lattice: &Lattice) -> Option<Jins> {
        let pitch_classes = find_all(lattice, &self.note_names)?;
        if pitch_classes.len() < 2 {
            return None;
        }
        Some(Jins::realize(self, pitch_classes, false))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MaqamTemplate {
    pub id: String,
    pub name: String,
    pub ascending_note_names: Vec<String>,
    /// Written from the top down.
    pub descending_note_names: Vec<String>,
    #[serde(default)]
    pub comments_english: String,
    #[serde(default)]
    pub comments_arabic: String,
    #[serde(default)]
    pub source_references: Vec<SourceReference>,
}

impl MaqamTemplate {
    pub fn new(id: &str, name: &str, ascending: &[&str], descending: &[&str]) -> Self {
        MaqamTemplate {
            id: id.to_string(),
            name: name.to_string(),
            ascending_note_names: ascending.iter().map(|n| n.to_string()).collect(),
            descending_note_names: descending.iter().map(|n| n.to_string()).collect(),
            comments_english: String::new(),
            comments_arabic: String::new(),
            source_references: Vec::new(),
        }
    }

    /// Descends through the same notes it ascends through.
    pub fn is_symmetric(&self) -> bool {
        self.ascending_note_names
            .iter()
            .eq(self.descending_note_names.iter().rev())
    }

    pub fn is_possible(&self, lattice: &Lattice) -> bool {
        !self.ascending_note_names.is_empty()
            && !self.descending_note_names.is_empty()
            && lattice.contains_all(&self.ascending_note_names)
            && lattice.contains_all(&self.descending_note_names)
    }

    /// The maqam on its own notes, without embedded ajnas.
    pub fn tahlil(&self, lattice: &Lattice) -> Option<Maqam> {
        let ascending = find_all(lattice, &self.ascending_note_names)?;
        let descending = find_all(lattice, &self.descending_note_names)?;
        if ascending.len() < 2 || descending.len() < 2 {
            return None;
        }
        Some(Maqam::realize(self, ascending, descending, false))
    }
}

fn find_all(lattice: &Lattice, note_names: &[String]) -> Option<Vec<PitchClass>> {
    note_names
        .iter()
        .map(|name| lattice.find(name).cloned())
        .collect()
}

fn realized_name(template_name: &str, pitch_classes: &[PitchClass]) -> String {
    match pitch_classes.first() {
        Some(tonic) => format!("{} al-{}", template_name, tonic.note_name),
        None => template_name.to_string(),
    }
}

/// A jins bound to pitch classes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Jins {
    pub jins_id: String,
    /// `"<jins> al-<tonic>"`.
    pub name: String,
    /// `false` for the tahlil.
    pub transposition: bool,
    pub pitch_classes: Vec<PitchClass>,
    pub intervals: Vec<Interval>,
}

impl Jins {
    pub fn realize(template: &JinsTemplate, pitch_classes: Vec<PitchClass>, transposition: bool) -> Self {
        Jins {
            jins_id: template.id.clone(),
            name: realized_name(&template.name, &pitch_classes),
            transposition,
            intervals: pitch_class_intervals(&pitch_classes),
            pitch_classes,
        }
    }

    pub fn tonic(&self) -> Option<&PitchClass> {
        self.pitch_classes.first()
    }

    pub fn note_names(&self) -> Vec<&'static str> {
        self.pitch_classes.iter().map(|pc| pc.note_name).collect()
    }
}

/// A maqam bound to pitch classes, with the ajnas found inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maqam {
    pub maqam_id: String,
    pub name: String,
    pub transposition: bool,
    pub ascending_pitch_classes: Vec<PitchClass>,
    /// From the top down.
    pub descending_pitch_classes: Vec<PitchClass>,
    pub ascending_intervals: Vec<Interval>,
    pub descending_intervals: Vec<Interval>,
    /// One slot per ascending degree: the jins starting there, if any.
    pub ascending_ajnas: Vec<Option<Jins>>,
    /// One slot per descending degree, top down.
    pub descending_ajnas: Vec<Option<Jins>>,
}

impl Maqam {
    pub fn realize(
        template: &MaqamTemplate,
        ascending: Vec<PitchClass>,
        descending: Vec<PitchClass>,
        transposition: bool,
    ) -> Self {
        Maqam {
            maqam_id: template.id.clone(),
            name: realized_name(&template.name, &ascending),
            transposition,
            ascending_intervals: pitch_class_intervals(&ascending),
            descending_intervals: pitch_class_intervals(&descending),
            ascending_pitch_classes: ascending,
            descending_pitch_classes: descending,
            ascending_ajnas: Vec::new(),
            descending_ajnas: Vec::new(),
        }
    }

    pub fn tonic(&self) -> Option<&PitchClass> {
        self.ascending_pitch_classes.first()
    }

    pub fn ascending_note_names(&self) -> Vec<&'static str> {
        self.ascending_pitch_classes.iter().map(|pc| pc.note_name).collect()
    }

    pub fn descending_note_names(&self) -> Vec<&'static str> {
        self.descending_pitch_classes.iter().map(|pc| pc.note_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Fraction;
    use crate::lattice::{build_lattice, TuningSystem};

    fn lattice() -> Lattice {
        let tuning = TuningSystem::new(
            "just",
            &["1/1", "9/8", "5/4", "4/3", "3/2", "5/3", "15/8"],
            &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
        );
        build_lattice(&tuning, "rāst")
    }

    #[test]
    fn test_jins_tahlil() {
        let lattice = lattice();
        let jins = JinsTemplate::new("jins_rast", "jins rāst", &["rāst", "dūgāh", "segāh", "chahārgāh"]);
        assert!(jins.is_possible(&lattice));

        let tahlil = jins.tahlil(&lattice).unwrap();
        assert_eq!(tahlil.name, "jins rāst al-rāst");
        assert!(!tahlil.transposition);
        assert_eq!(tahlil.intervals.len(), 3);
        assert_eq!(tahlil.intervals[0].fraction, Fraction::new(9, 8));
        assert_eq!(tahlil.intervals[1].fraction, Fraction::new(10, 9));
    }

    #[test]
    fn test_impossible_and_short_templates() {
        let lattice = lattice();
        let missing = JinsTemplate::new("jins_hijaz", "jins ḥijāz", &["dūgāh", "kurdī", "ḥijāz", "nawā"]);
        assert!(!missing.is_possible(&lattice));
        assert!(missing.tahlil(&lattice).is_none());

        let single = JinsTemplate::new("jins_one", "one", &["rāst"]);
        assert!(single.tahlil(&lattice).is_none());
    }

    #[test]
    fn test_maqam_tahlil_and_symmetry() {
        let lattice = lattice();
        let ascending = ["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj", "kurdān"];
        let mut descending = ascending;
        descending.reverse();
        let maqam = MaqamTemplate::new("maqam_rast", "maqām rāst", &ascending, &descending);
        assert!(maqam.is_symmetric());
        assert!(maqam.is_possible(&lattice));

        let tahlil = maqam.tahlil(&lattice).unwrap();
        assert_eq!(tahlil.name, "maqām rāst al-rāst");
        assert_eq!(tahlil.ascending_intervals.len(), 7);
        assert_eq!(tahlil.descending_note_names()[0], "kurdān");
        assert!(tahlil.descending_intervals.iter().all(|i| i.cents < 0.0));

        let asymmetric = MaqamTemplate::new("m", "m", &["rāst", "dūgāh"], &["segāh", "rāst"]);
        assert!(!asymmetric.is_symmetric());
    }
}
