//! # Pitch-Class Lattice
//!
//! Expands a tuning system into the concrete table of pitch classes every analysis runs on.
//!
//! ## Purpose
//! A tuning system lists its pitch values for one octave. The lattice repeats that octave
//! four times (lattice octaves 0..=3, where octave 1 holds the values as written) and
//! attaches to each entry:
//! 1. **All four representations** - fraction, cents, decimal ratio and MIDI number
//! 2. **Physical values** - frequency, string length and fret division
//! 3. **Names** - the note name from the octave tables and its English spelling
//! 4. **Deviation** - cents away from the nearest 12-EDO reference pitch
//!
//! ## Ordering
//! Entries are ordered by octave then by index. Every search relies on this order: along
//! it, frequency never decreases.
//!
//! ## Entry Point
//! [`build_lattice()`] - Build the lattice of a tuning system for a starting note
//!
//! ## Example
//! ```rust
//! use maqam::{build_lattice, TuningSystem};
//!
//! let tuning = TuningSystem::new(
//!     "pythagorean",
//!     &["1/1", "9/8", "81/64", "4/3", "3/2", "27/16", "243/128"],
//!     &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
//! );
//! let lattice = build_lattice(&tuning, "rāst");
//!
//! assert_eq!(lattice.len(), 28);
//! assert_eq!(lattice.find("nawā").unwrap().octave, 1);
//! assert_eq!(lattice.find("kurdān").unwrap().octave, 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::convert::{self, Fraction, PitchValue, ValueType};
use crate::interval::MatchingMode;
use crate::note_names;

/// Lattice octaves generated per tuning system.
pub const LATTICE_OCTAVES: u8 = 4;

/// Octave holding the tuning system's values as written.
pub const BASE_OCTAVE: u8 = 1;

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

fn default_reference_frequency() -> f64 {
    440.0
}

fn default_string_length() -> f64 {
    1000.0
}

/// A tuning system as stored in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TuningSystem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// One octave of pitch values, all in the same representation.
    pub pitch_values: Vec<String>,
    /// Parallel note-name lists; the first name of each is a possible starting note.
    #[serde(default)]
    pub note_name_sets: Vec<Vec<String>>,
    /// Frequency of the starting note when no override applies.
    #[serde(default = "default_reference_frequency")]
    pub default_reference_frequency: f64,
    /// Frequency per starting note.
    #[serde(default)]
    pub reference_frequencies: BTreeMap<String, f64>,
    #[serde(default = "default_string_length")]
    pub string_length: f64,
}

impl TuningSystem {
    pub fn new(id: &str, pitch_values: &[&str], note_name_sets: &[&[&str]]) -> Self {
        TuningSystem {
            id: id.to_string(),
            name: id.to_string(),
            pitch_values: pitch_values.iter().map(|v| v.to_string()).collect(),
            note_name_sets: note_name_sets
                .iter()
                .map(|set| set.iter().map(|n| n.to_string()).collect())
                .collect(),
            default_reference_frequency: default_reference_frequency(),
            reference_frequencies: BTreeMap::new(),
            string_length: default_string_length(),
        }
    }

    pub fn with_reference_frequency(mut self, starting_note: &str, frequency: f64) -> Self {
        self.reference_frequencies.insert(starting_note.to_string(), frequency);
        self
    }

    /// First name of every note-name set.
    pub fn starting_notes(&self) -> Vec<&str> {
        self.note_name_sets
            .iter()
            .filter_map(|set| set.first().map(String::as_str))
            .collect()
    }

    /// The note-name set beginning with `starting_note`, else the first set.
    pub fn note_name_set(&self, starting_note: &str) -> Option<&[String]> {
        self.note_name_sets
            .iter()
            .find(|set| set.first().map(String::as_str) == Some(starting_note))
            .or_else(|| self.note_name_sets.first())
            .map(Vec::as_slice)
    }

    pub fn value_type(&self) -> Result<ValueType, crate::MaqamError> {
        convert::detect_values_type(&self.pitch_values)
    }
}

/// One pitch of the lattice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchClass {
    pub note_name: &'static str,
    pub english_name: String,
    /// The pitch value in the tuning system's representation, shifted to this octave.
    pub original_value: String,
    pub value_type: ValueType,
    pub fraction: Fraction,
    pub cents: f64,
    pub decimal_ratio: f64,
    pub frequency: f64,
    pub string_length: f64,
    /// String length removed from the open string to sound this pitch.
    pub fret_division: f64,
    pub midi_note_decimal: f64,
    pub midi_note_number: i32,
    pub cents_deviation: f64,
    pub reference_note_name: Option<String>,
    /// Position within the octave.
    pub index: usize,
    pub octave: u8,
}

impl PitchClass {
    pub fn is_named(&self) -> bool {
        self.note_name != note_names::NONE
    }
}

/// The ordered pitch classes of one tuning system and starting note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lattice {
    pitch_classes: Vec<PitchClass>,
    value_type: Option<ValueType>,
    notes_per_octave: usize,
    open_string_length: f64,
}

impl Lattice {
    pub fn pitch_classes(&self) -> &[PitchClass] {
        &self.pitch_classes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PitchClass> {
        self.pitch_classes.iter()
    }

    pub fn len(&self) -> usize {
        self.pitch_classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch_classes.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&PitchClass> {
        self.pitch_classes.get(position)
    }

    /// Representation of the tuning system; `None` for an empty lattice.
    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    pub fn notes_per_octave(&self) -> usize {
        self.notes_per_octave
    }

    /// Exact ratios for ratio-like systems, cents within `cents_tolerance` otherwise.
    pub fn matching_mode(&self, cents_tolerance: f64) -> MatchingMode {
        match self.value_type {
            Some(value_type) if value_type.is_ratio_like() => MatchingMode::ExactRatio,
            _ => MatchingMode::Cents {
                tolerance: cents_tolerance,
            },
        }
    }

    /// Lattice position of the first pitch class carrying `note_name`.
    pub fn position_of(&self, note_name: &str) -> Option<usize> {
        if note_name == note_names::NONE {
            return None;
        }
        self.pitch_classes.iter().position(|pc| pc.note_name == note_name)
    }

    pub fn find(&self, note_name: &str) -> Option<&PitchClass> {
        self.position_of(note_name).map(|i| &self.pitch_classes[i])
    }

    pub fn note_names(&self) -> Vec<&'static str> {
        self.pitch_classes.iter().map(|pc| pc.note_name).collect()
    }

    pub fn contains_all<S: AsRef<str>>(&self, note_names: &[S]) -> bool {
        note_names.iter().all(|name| self.position_of(name.as_ref()).is_some())
    }

    /// Pitch classes whose names appear in `note_names`, in lattice order.
    pub fn filter_named<S: AsRef<str>>(&self, note_names: &[S]) -> Vec<PitchClass> {
        self.pitch_classes
            .iter()
            .filter(|pc| pc.is_named() && note_names.iter().any(|n| n.as_ref() == pc.note_name))
            .cloned()
            .collect()
    }

    /// The pitch class `octaves` above (or below) `pitch_class`.
    ///
    /// Taken from the lattice when present; computed from `pitch_class` otherwise, so
    /// shifting past the top of the lattice still yields a pitch. Returns `None` only when
    /// the result would fall below octave 0.
    pub fn shift(&self, pitch_class: &PitchClass, octaves: i32) -> Option<PitchClass> {
        let target = pitch_class.octave as i32 + octaves;
        if target < 0 {
            return None;
        }
        if let Some(found) = self
            .pitch_classes
            .iter()
            .find(|pc| pc.index == pitch_class.index && pc.octave as i32 == target)
        {
            return Some(found.clone());
        }

        let factor = 2f64.powi(octaves);
        let note_name = note_names::shift_note_name(pitch_class.note_name, octaves);
        let original_value = PitchValue::parse(&pitch_class.original_value, pitch_class.value_type)
            .and_then(|value| value.shift_octaves(octaves))
            .map(|value| value.to_string())
            .unwrap_or_else(|_| pitch_class.original_value.clone());
        let fraction = PitchValue::Fraction(pitch_class.fraction)
            .shift_octaves(octaves)
            .ok()
            .and_then(|value| match value {
                PitchValue::Fraction(fraction) => Some(fraction),
                _ => None,
            })?;
        let string_length = pitch_class.string_length / factor;
        let midi_note_decimal = pitch_class.midi_note_decimal + 12.0 * octaves as f64;

        Some(PitchClass {
            note_name,
            english_name: note_names::english_name(note_name),
            original_value,
            value_type: pitch_class.value_type,
            fraction,
            cents: pitch_class.cents + 1200.0 * octaves as f64,
            decimal_ratio: pitch_class.decimal_ratio * factor,
            frequency: pitch_class.frequency * factor,
            string_length,
            fret_division: self.open_string_length - string_length,
            midi_note_decimal,
            midi_note_number: midi_note_decimal.round() as i32,
            cents_deviation: pitch_class.cents_deviation,
            reference_note_name: pitch_class.reference_note_name.clone(),
            index: pitch_class.index,
            octave: target as u8,
        })
    }
}

/// Build the lattice of `tuning_system` named from `starting_note`.
///
/// Entries whose values cannot be converted are left out. A tuning system with no values,
/// or with values in no recognizable representation, gives an empty lattice.
pub fn build_lattice(tuning_system: &TuningSystem, starting_note: &str) -> Lattice {
    build_lattice_with_overrides(tuning_system, starting_note, &BTreeMap::new())
}

/// [`build_lattice`] with caller-supplied reference frequencies, consulted before the
/// tuning system's own.
pub fn build_lattice_with_overrides(
    tuning_system: &TuningSystem,
    starting_note: &str,
    reference_overrides: &BTreeMap<String, f64>,
) -> Lattice {
    let values = &tuning_system.pitch_values;
    let value_type = match tuning_system.value_type() {
        Ok(value_type) => value_type,
        Err(e) => {
            debug!(tuning = %tuning_system.id, error = %e, "empty lattice");
            return Lattice::default();
        }
    };

    if !tuning_system.starting_notes().contains(&starting_note) {
        warn!(
            tuning = %tuning_system.id,
            starting_note,
            "starting note matches no note-name set, using the first set"
        );
    }
    let names = tuning_system.note_name_set(starting_note).unwrap_or(&[]);
    let selections: Vec<Option<usize>> = (0..values.len())
        .map(|i| names.get(i).and_then(|name| note_names::selection_index(name)))
        .collect();

    let reference_frequency = reference_overrides
        .get(starting_note)
        .or_else(|| tuning_system.reference_frequencies.get(starting_note))
        .copied()
        .unwrap_or(tuning_system.default_reference_frequency);

    let parsed: Vec<Option<PitchValue>> = values
        .iter()
        .map(|text| match PitchValue::parse(text, value_type) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(tuning = %tuning_system.id, error = %e, "skipping pitch value");
                None
            }
        })
        .collect();

    let midi_anchor = match parsed.iter().flatten().next() {
        Some(PitchValue::Midi(midi)) => *midi,
        _ => 0.0,
    };
    let string_length = tuning_system.string_length;
    let open_string_length = parsed
        .first()
        .copied()
        .flatten()
        .and_then(|value| convert::convert(&value, midi_anchor, string_length, reference_frequency).ok())
        .map(|conversion| conversion.string_length)
        .unwrap_or(string_length);

    let mut pitch_classes = Vec::with_capacity(values.len() * LATTICE_OCTAVES as usize);
    for octave in 0..LATTICE_OCTAVES {
        for (index, value) in parsed.iter().enumerate() {
            let Some(value) = value else { continue };
            let shifted = match value.shift_octaves(octave as i32 - BASE_OCTAVE as i32) {
                Ok(shifted) => shifted,
                Err(e) => {
                    debug!(index, octave, error = %e, "skipping pitch class");
                    continue;
                }
            };
            let conversion =
                match convert::convert(&shifted, midi_anchor, string_length, reference_frequency) {
                    Ok(conversion) => conversion,
                    Err(e) => {
                        debug!(index, octave, error = %e, "skipping pitch class");
                        continue;
                    }
                };
            let midi_note_decimal = match convert::frequency_to_midi(conversion.frequency) {
                Ok(midi) => midi,
                Err(e) => {
                    debug!(index, octave, error = %e, "skipping pitch class");
                    continue;
                }
            };

            let note_name = note_names::lattice_note_name(octave as usize, selections[index]);
            pitch_classes.push(PitchClass {
                note_name,
                english_name: note_names::english_name(note_name),
                original_value: shifted.to_string(),
                value_type,
                fraction: conversion.fraction,
                cents: conversion.cents,
                decimal_ratio: conversion.decimal_ratio,
                frequency: conversion.frequency,
                string_length: conversion.string_length,
                fret_division: open_string_length - conversion.string_length,
                midi_note_decimal,
                midi_note_number: midi_note_decimal.round() as i32,
                cents_deviation: 0.0,
                reference_note_name: None,
                index,
                octave,
            });
        }
    }

    let start = pitch_classes
        .iter()
        .find(|pc| pc.index == 0 && pc.octave == BASE_OCTAVE)
        .map(|pc| (pc.midi_note_decimal, pc.cents));
    for pc in pitch_classes.iter_mut() {
        let (deviation, reference) = cents_deviation(pc, start);
        pc.cents_deviation = deviation;
        pc.reference_note_name = Some(reference);
    }

    debug!(
        tuning = %tuning_system.id,
        starting_note,
        entries = pitch_classes.len(),
        "built lattice"
    );

    Lattice {
        pitch_classes,
        value_type: Some(value_type),
        notes_per_octave: values.len(),
        open_string_length,
    }
}

/// 12-EDO chroma and label of an English spelling, from its letter and the accidental
/// written directly after it. Microtonal marks (`-`, `+`) are ignored.
fn chroma_of(english_name: &str) -> Option<(i32, String)> {
    let mut chars = english_name.chars();
    let letter = chars.next()?;
    let base = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    match chars.next() {
        Some('b') => Some(((base - 1i32).rem_euclid(12), format!("{}b", letter))),
        Some('#') => Some(((base + 1i32).rem_euclid(12), format!("{}#", letter))),
        _ => Some((base, letter.to_string())),
    }
}

/// Deviation in cents from the reference 12-EDO pitch, and that pitch's name.
///
/// Named pitches are measured against the closest MIDI note of their spelled chroma.
/// Unnamed pitches are measured against the equal-tempered grid anchored at the
/// starting pitch class (`start` holds its MIDI number and cents).
fn cents_deviation(pc: &PitchClass, start: Option<(f64, f64)>) -> (f64, String) {
    let midi = pc.midi_note_decimal;

    if let Some((chroma, label)) = chroma_of(&pc.english_name) {
        let octave = (midi.round() as i32).div_euclid(12);
        let reference = (octave - 1..=octave + 1)
            .map(|o| o * 12 + chroma)
            .min_by(|a, b| {
                let da = (*a as f64 - midi).abs();
                let db = (*b as f64 - midi).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(octave * 12 + chroma);
        return ((midi - reference as f64) * 100.0, label);
    }

    let reference = match start {
        Some((start_midi, start_cents)) => {
            start_midi.round() + ((pc.cents - start_cents) / 100.0).round()
        }
        None => midi.round(),
    };
    let chroma = (reference as i64).rem_euclid(12) as usize;
    ((midi - reference) * 100.0, SHARP_NAMES[chroma].to_string())
}
