//! Al-Shawwā's classification of note names.
//!
//! Each octave table position is natural, a quarter-step ("one part"), a half-step
//! ("two parts") or outside the scheme. The 24 classified positions of the base octave and
//! the octave above it form the scale that modulation distances are counted in.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::note_names::{self, OCTAVE_ONE, OCTAVE_TWO};

const NATURAL: [usize; 7] = [0, 6, 11, 16, 21, 26, 30];
const QUARTER_STEP: [usize; 10] = [1, 4, 7, 13, 18, 20, 22, 27, 32, 35];
const HALF_STEP: [usize; 7] = [3, 8, 14, 19, 24, 28, 34];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegreeClass {
    Natural,
    QuarterStep,
    HalfStep,
    Invalid,
}

impl DegreeClass {
    pub fn of_index(index: usize) -> Self {
        if NATURAL.contains(&index) {
            DegreeClass::Natural
        } else if QUARTER_STEP.contains(&index) {
            DegreeClass::QuarterStep
        } else if HALF_STEP.contains(&index) {
            DegreeClass::HalfStep
        } else {
            DegreeClass::Invalid
        }
    }
}

/// Class of a note name. Unknown and unnamed notes are [`DegreeClass::Invalid`].
pub fn classify_note_name(name: &str) -> DegreeClass {
    match note_names::position(name) {
        Some(position) if name != note_names::NONE => DegreeClass::of_index(position.index),
        _ => DegreeClass::Invalid,
    }
}

/// Classified names of the base octave and the octave above, in pitch order.
pub static SHAWWA_SCALE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    OCTAVE_ONE
        .iter()
        .chain(OCTAVE_TWO.iter())
        .copied()
        .filter(|name| classify_note_name(name) != DegreeClass::Invalid)
        .collect()
});

pub fn shawwa_position(name: &str) -> Option<usize> {
    SHAWWA_SCALE.iter().position(|n| *n == name)
}

/// Scale steps from `from` up to `to`; negative when `to` is lower.
pub fn shawwa_steps(from: &str, to: &str) -> Option<i64> {
    Some(shawwa_position(to)? as i64 - shawwa_position(from)? as i64)
}
