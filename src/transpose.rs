//! # Transposition Search
//!
//! Finds every place in a lattice where an interval pattern can be laid down.
//!
//! ## Purpose
//! A jins or maqam template fixes a sequence of intervals (read off its own notes in the
//! lattice). The search walks the lattice for every other starting pitch class that
//! carries the same sequence:
//! 1. **Jins** - one ascending pattern
//! 2. **Maqam** - an ascending and a descending pattern searched separately, then paired
//!    on a shared tonic
//! 3. **Embedded ajnas** - each maqam realization is scanned for the ajnas it contains
//!
//! ## Search
//! Depth-first from each lattice position. For each pattern step the lattice is scanned
//! forward (backward when descending) for the first pitch class at the right interval
//! from the last one taken. The scan stops at the first match and also as soon as the
//! interval overshoots the target, since frequency is monotonic along the lattice.
//!
//! ## Entry Points
//! - [`jins_transpositions()`]
//! - [`maqam_transpositions()`]
//! - [`find_transpositions()`] - the raw search over any interval pattern
//!
//! ## Example
//! ```rust
//! use maqam::{build_lattice, jins_transpositions, JinsTemplate, TranspositionOptions, TuningSystem};
//!
//! let tuning = TuningSystem::new(
//!     "just",
//!     &["1/1", "9/8", "5/4", "4/3", "3/2", "5/3", "15/8"],
//!     &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
//! );
//! let lattice = build_lattice(&tuning, "rāst");
//! let jins = JinsTemplate::new("jins_rast", "jins rāst", &["rāst", "dūgāh", "segāh"]);
//!
//! let found = jins_transpositions(&lattice, &jins, &TranspositionOptions::default());
//! assert_eq!(found[0].name, "jins rāst al-rāst");
//! assert!(!found[0].transposition);
//! assert!(found.iter().skip(1).all(|jins| jins.transposition));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::interval::{compute_interval, intervals_match_all, pitch_class_intervals, Direction, Interval, MatchingMode};
use crate::lattice::{Lattice, PitchClass, BASE_OCTAVE};
use crate::template::{Jins, JinsTemplate, Maqam, MaqamTemplate};

/// Frequencies this close (relative) count as equal when locating octaves.
const FREQUENCY_EPSILON: f64 = 1e-9;

fn default_cents_tolerance() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

/// Search settings shared by jins and maqam searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TranspositionOptions {
    /// Allowed difference between intervals in cents-based tuning systems.
    #[serde(default = "default_cents_tolerance")]
    pub cents_tolerance: f64,
    /// Put the tahlil first in the results; drop it otherwise.
    #[serde(default = "default_true")]
    pub include_tahlil: bool,
    /// Only keep realizations starting in the base octave.
    #[serde(default)]
    pub only_octave_one: bool,
}

impl Default for TranspositionOptions {
    fn default() -> Self {
        TranspositionOptions {
            cents_tolerance: default_cents_tolerance(),
            include_tahlil: true,
            only_octave_one: false,
        }
    }
}

/// Intervals between the notes of `note_names` as they occur in the lattice.
///
/// Notes are taken in lattice order, reversed for a descending pattern.
pub fn interval_pattern<S: AsRef<str>>(lattice: &Lattice, note_names: &[S], direction: Direction) -> Vec<Interval> {
    let mut pitch_classes = lattice.filter_named(note_names);
    if direction == Direction::Descending {
        pitch_classes.reverse();
    }
    pitch_class_intervals(&pitch_classes)
}

/// Every sequence of lattice pitch classes whose consecutive intervals match `pattern`.
///
/// Descending sequences are returned top down. An empty pattern has no transpositions.
pub fn find_transpositions(
    lattice: &Lattice,
    pattern: &[Interval],
    direction: Direction,
    mode: MatchingMode,
) -> Vec<Vec<PitchClass>> {
    if pattern.is_empty() || lattice.is_empty() {
        return Vec::new();
    }

    let cells = ordered_cells(lattice, direction);
    let mut found: Vec<Vec<usize>> = Vec::new();
    let mut sequence = Vec::with_capacity(pattern.len() + 1);
    for start in 0..cells.len() {
        sequence.push(start);
        extend_sequence(&cells, pattern, direction, mode, &mut sequence, start + 1, &mut found);
        sequence.clear();
    }

    let sequences: Vec<Vec<PitchClass>> = found
        .into_iter()
        .map(|positions| positions.into_iter().map(|i| cells[i].clone()).collect())
        .collect();

    trace!(?direction, steps = pattern.len(), found = sequences.len(), "transposition search");
    sequences
}

fn ordered_cells(lattice: &Lattice, direction: Direction) -> Vec<&PitchClass> {
    match direction {
        Direction::Ascending => lattice.iter().collect(),
        Direction::Descending => lattice.iter().rev().collect(),
    }
}

/// Extend `sequence` one matched step at a time. Pushes complete sequences to `found`.
fn extend_sequence(
    cells: &[&PitchClass],
    pattern: &[Interval],
    direction: Direction,
    mode: MatchingMode,
    sequence: &mut Vec<usize>,
    next: usize,
    found: &mut Vec<Vec<usize>>,
) {
    let step = sequence.len() - 1;
    if step == pattern.len() {
        found.push(sequence.clone());
        return;
    }
    let Some(&last) = sequence.last() else { return };
    let target = &pattern[step];

    for candidate in next..cells.len() {
        let computed = compute_interval(cells[last], cells[candidate]);
        if mode.matches(&computed, target) {
            sequence.push(candidate);
            extend_sequence(cells, pattern, direction, mode, sequence, candidate + 1, found);
            sequence.pop();
            break;
        }
        if mode.overshoots(&computed, target, direction) {
            break;
        }
    }
}

/// All realizations of a jins, tahlil first when requested.
pub fn jins_transpositions(lattice: &Lattice, template: &JinsTemplate, options: &TranspositionOptions) -> Vec<Jins> {
    if lattice.is_empty() || template.note_names.len() < 2 || !template.is_possible(lattice) {
        return Vec::new();
    }

    let mode = lattice.matching_mode(options.cents_tolerance);
    let pattern = interval_pattern(lattice, &template.note_names, Direction::Ascending);
    let realizations: Vec<Jins> = find_transpositions(lattice, &pattern, Direction::Ascending, mode)
        .into_iter()
        .filter(|sequence| !options.only_octave_one || sequence[0].octave == BASE_OCTAVE)
        .map(|sequence| Jins::realize(template, sequence, true))
        .collect();

    debug!(jins = %template.id, found = realizations.len(), "jins transpositions");
    place_tahlil(realizations, &template.note_names[0], options.include_tahlil, |jins| {
        jins.tonic().map(|pc| pc.note_name)
    }, |jins| jins.transposition = false)
}

/// All realizations of a maqam, with the ajnas of `ajnas` found inside each.
pub fn maqam_transpositions(
    lattice: &Lattice,
    template: &MaqamTemplate,
    ajnas: &[JinsTemplate],
    options: &TranspositionOptions,
) -> Vec<Maqam> {
    if lattice.is_empty()
        || template.ascending_note_names.len() < 2
        || template.descending_note_names.len() < 2
        || !template.is_possible(lattice)
    {
        return Vec::new();
    }

    let mode = lattice.matching_mode(options.cents_tolerance);
    let ascending_pattern = interval_pattern(lattice, &template.ascending_note_names, Direction::Ascending);
    let descending_pattern = interval_pattern(lattice, &template.descending_note_names, Direction::Descending);

    let ascending: Vec<Vec<PitchClass>> = find_transpositions(lattice, &ascending_pattern, Direction::Ascending, mode)
        .into_iter()
        .filter(|sequence| !options.only_octave_one || sequence[0].octave == BASE_OCTAVE)
        .collect();
    let descending = find_transpositions(lattice, &descending_pattern, Direction::Descending, mode);

    let jins_patterns = jins_patterns(lattice, ajnas);
    let realizations: Vec<Maqam> = pair_sequences(ascending, &descending)
        .into_iter()
        .map(|(ascending, descending)| {
            let mut maqam = Maqam::realize(template, ascending, descending, true);
            maqam.ascending_ajnas = embedded_ajnas(lattice, &maqam.ascending_pitch_classes, &jins_patterns, mode);

            let low_to_high: Vec<PitchClass> = maqam.descending_pitch_classes.iter().rev().cloned().collect();
            let mut descending_ajnas = embedded_ajnas(lattice, &low_to_high, &jins_patterns, mode);
            descending_ajnas.reverse();
            maqam.descending_ajnas = descending_ajnas;
            maqam
        })
        .collect();

    debug!(maqam = %template.id, found = realizations.len(), "maqam transpositions");
    place_tahlil(realizations, &template.ascending_note_names[0], options.include_tahlil, |maqam| {
        maqam.tonic().map(|pc| pc.note_name)
    }, |maqam| maqam.transposition = false)
}

/// Pair each ascending sequence with the first descending sequence ending on its tonic.
///
/// The tonic is matched by lattice position, so unnamed pitch classes only pair with
/// themselves.
fn pair_sequences(
    ascending: Vec<Vec<PitchClass>>,
    descending: &[Vec<PitchClass>],
) -> Vec<(Vec<PitchClass>, Vec<PitchClass>)> {
    ascending
        .into_iter()
        .filter_map(|ascending| {
            let tonic = ascending.first()?;
            let descending = descending.iter().find(|sequence| {
                sequence
                    .last()
                    .map_or(false, |pc| pc.octave == tonic.octave && pc.index == tonic.index)
            })?;
            Some((ascending, descending.clone()))
        })
        .collect()
}

/// Move the realization rooted on `first_note` to the front as the tahlil, or drop it.
fn place_tahlil<T>(
    mut realizations: Vec<T>,
    first_note: &str,
    include_tahlil: bool,
    tonic: impl Fn(&T) -> Option<&'static str>,
    mark_tahlil: impl Fn(&mut T),
) -> Vec<T> {
    let Some(position) = realizations.iter().position(|r| tonic(r) == Some(first_note)) else {
        return realizations;
    };
    let mut tahlil = realizations.remove(position);
    if include_tahlil {
        mark_tahlil(&mut tahlil);
        realizations.insert(0, tahlil);
    }
    realizations
}

/// Ascending interval pattern of every jins whose notes all exist in the lattice.
fn jins_patterns<'a>(lattice: &Lattice, ajnas: &'a [JinsTemplate]) -> Vec<(&'a JinsTemplate, Vec<Interval>)> {
    ajnas
        .iter()
        .filter(|jins| jins.note_names.len() >= 2 && lattice.contains_all(&jins.note_names))
        .map(|jins| (jins, interval_pattern(lattice, &jins.note_names, Direction::Ascending)))
        .filter(|(_, pattern)| !pattern.is_empty())
        .collect()
}

/// Continue `sequence` (low to high) for one more octave.
///
/// Leading pitch classes that already reappear an octave up inside the sequence are not
/// repeated; everything after them is appended one octave higher.
fn extend_by_octave(lattice: &Lattice, sequence: &[PitchClass]) -> Vec<PitchClass> {
    let Some(top) = sequence.last() else {
        return Vec::new();
    };
    let repeated = sequence
        .iter()
        .take_while(|pc| pc.frequency * 2.0 <= top.frequency * (1.0 + FREQUENCY_EPSILON))
        .count();

    let mut extended = sequence.to_vec();
    extended.extend(sequence[repeated..].iter().filter_map(|pc| lattice.shift(pc, 1)));
    extended
}

/// One slot per degree of `sequence` (low to high): the first listed jins whose pattern
/// starts on that degree, or `None`.
fn embedded_ajnas(
    lattice: &Lattice,
    sequence: &[PitchClass],
    jins_patterns: &[(&JinsTemplate, Vec<Interval>)],
    mode: MatchingMode,
) -> Vec<Option<Jins>> {
    if jins_patterns.is_empty() {
        return Vec::new();
    }

    let extended = extend_by_octave(lattice, sequence);
    let intervals = pitch_class_intervals(&extended);
    let mut slots = Vec::with_capacity(sequence.len());

    for start in 0..intervals.len() {
        let found = jins_patterns.iter().find(|(_, pattern)| {
            start + pattern.len() <= intervals.len()
                && intervals_match_all(&intervals[start..start + pattern.len()], pattern, mode)
        });
        slots.push(found.map(|(template, pattern)| {
            let pitch_classes = extended[start..=start + pattern.len()].to_vec();
            let transposition = template.note_names.first().map(String::as_str) != Some(pitch_classes[0].note_name);
            Jins::realize(template, pitch_classes, transposition)
        }));
        if slots.len() == sequence.len() {
            break;
        }
    }
    slots
}

/// Whether the maqam's tahlil intervals can be laid down starting on `note_name`.
pub fn can_transpose_maqam_to_note(
    lattice: &Lattice,
    template: &MaqamTemplate,
    note_name: &str,
    cents_tolerance: f64,
) -> bool {
    let Some(start) = lattice.position_of(note_name) else {
        return false;
    };
    let Some(tahlil) = template.tahlil(lattice) else {
        return false;
    };

    let cells: Vec<&PitchClass> = lattice.iter().collect();
    let mode = lattice.matching_mode(cents_tolerance);
    let mut found = Vec::new();
    let mut sequence = vec![start];
    extend_sequence(
        &cells,
        &tahlil.ascending_intervals,
        Direction::Ascending,
        mode,
        &mut sequence,
        start + 1,
        &mut found,
    );
    !found.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Fraction;
    use crate::lattice::{build_lattice, TuningSystem};

    const JUST_TWELVE: [&str; 12] = [
        "1/1", "16/15", "9/8", "6/5", "5/4", "4/3", "45/32", "3/2", "8/5", "5/3", "16/9", "15/8",
    ];
    const TWELVE_NAMES: [&str; 12] = [
        "rāst",
        "zīrgūleh",
        "dūgāh",
        "kurdī",
        "būselīk/ʿushshāq",
        "chahārgāh",
        "ḥijāz",
        "nawā",
        "ḥiṣār",
        "ḥusaynī",
        "ʿajam",
        "māhūr",
    ];

    fn twelve() -> Lattice {
        build_lattice(&TuningSystem::new("just_12", &JUST_TWELVE, &[&TWELVE_NAMES]), "rāst")
    }

    fn seven() -> Lattice {
        let tuning = TuningSystem::new(
            "just_7",
            &["1/1", "9/8", "5/4", "4/3", "3/2", "5/3", "15/8"],
            &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
        );
        build_lattice(&tuning, "rāst")
    }

    fn rast_maqam() -> MaqamTemplate {
        let ascending = ["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj", "kurdān"];
        let mut descending = ascending;
        descending.reverse();
        MaqamTemplate::new("maqam_rast", "maqām rāst", &ascending, &descending)
    }

    #[test]
    fn test_triad_transpositions_twelve_positions_apart() {
        let lattice = twelve();
        let triad = JinsTemplate::new("jins_triad", "triad", &["rāst", "būselīk/ʿushshāq", "nawā"]);
        let found = jins_transpositions(&lattice, &triad, &TranspositionOptions::default());

        let on_index_zero: Vec<&Jins> = found.iter().filter(|jins| jins.pitch_classes[0].index == 0).collect();
        assert_eq!(on_index_zero.len(), 4);
        assert_eq!(on_index_zero.iter().filter(|jins| !jins.transposition).count(), 1);
        let octaves: Vec<u8> = on_index_zero.iter().map(|jins| jins.pitch_classes[0].octave).collect();
        assert_eq!(octaves, vec![1, 0, 2, 3]);

        assert_eq!(found[0].name, "triad al-rāst");
        assert!(!found[0].transposition);
        assert_eq!(found.iter().filter(|jins| !jins.transposition).count(), 1);
    }

    #[test]
    fn test_found_sequences_match_the_pattern() {
        let lattice = twelve();
        let names = ["rāst", "būselīk/ʿushshāq", "nawā"];
        let pattern = interval_pattern(&lattice, &names, Direction::Ascending);
        assert_eq!(pattern[0].fraction, Fraction::new(5, 4));
        assert_eq!(pattern[1].fraction, Fraction::new(6, 5));

        let sequences = find_transpositions(&lattice, &pattern, Direction::Ascending, MatchingMode::ExactRatio);
        assert!(!sequences.is_empty());
        for sequence in &sequences {
            assert!(intervals_match_all(&pitch_class_intervals(sequence), &pattern, MatchingMode::ExactRatio));
        }
    }

    #[test]
    fn test_descending_sequences_run_top_down() {
        let lattice = seven();
        let names = ["nawā", "chahārgāh", "segāh"];
        let pattern = interval_pattern(&lattice, &names, Direction::Descending);
        assert!(pattern.iter().all(|interval| interval.cents < 0.0));

        let sequences = find_transpositions(&lattice, &pattern, Direction::Descending, MatchingMode::ExactRatio);
        assert!(sequences.iter().any(|s| s[0].note_name == "nawā" && s[2].note_name == "segāh"));
        for sequence in &sequences {
            assert!(sequence[0].frequency > sequence[2].frequency);
        }
    }

    #[test]
    fn test_short_templates_have_no_transpositions() {
        let lattice = seven();
        let options = TranspositionOptions::default();
        assert!(jins_transpositions(&lattice, &JinsTemplate::new("j", "j", &["rāst"]), &options).is_empty());
        assert!(jins_transpositions(&lattice, &JinsTemplate::new("j", "j", &[]), &options).is_empty());
        assert!(find_transpositions(&lattice, &[], Direction::Ascending, MatchingMode::ExactRatio).is_empty());

        let maqam = MaqamTemplate::new("m", "m", &["rāst", "dūgāh"], &["rāst"]);
        assert!(maqam_transpositions(&lattice, &maqam, &[], &options).is_empty());
        assert!(jins_transpositions(&Lattice::default(), &JinsTemplate::new("j", "j", &["rāst", "dūgāh"]), &options).is_empty());
    }

    #[test]
    fn test_tahlil_can_be_dropped_and_octave_one_only() {
        let lattice = seven();
        let jins = JinsTemplate::new("jins_rast", "jins rāst", &["rāst", "dūgāh", "segāh", "chahārgāh"]);

        let all = jins_transpositions(&lattice, &jins, &TranspositionOptions::default());
        let without = jins_transpositions(
            &lattice,
            &jins,
            &TranspositionOptions { include_tahlil: false, ..Default::default() },
        );
        assert_eq!(without.len(), all.len() - 1);
        assert!(without.iter().all(|jins| jins.transposition));

        let base = jins_transpositions(
            &lattice,
            &jins,
            &TranspositionOptions { only_octave_one: true, ..Default::default() },
        );
        assert!(base.iter().all(|jins| jins.pitch_classes[0].octave == 1));
        assert_eq!(base[0].name, "jins rāst al-rāst");
    }

    #[test]
    fn test_cents_tolerance_search() {
        let tuning = TuningSystem::new(
            "rounded",
            &["0", "204", "386", "498", "702", "905", "1088"],
            &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
        );
        let lattice = build_lattice(&tuning, "rāst");
        let jins = JinsTemplate::new("jins_rast", "jins rāst", &["rāst", "dūgāh", "segāh", "chahārgāh"]);

        // From nawā the steps are 203, 183 and 112 cents against 204, 182 and 112.
        let tolerant = jins_transpositions(&lattice, &jins, &TranspositionOptions::default());
        assert!(tolerant.iter().any(|jins| jins.name == "jins rāst al-nawā"));

        let strict = jins_transpositions(
            &lattice,
            &jins,
            &TranspositionOptions { cents_tolerance: 0.0, ..Default::default() },
        );
        assert_eq!(strict[0].name, "jins rāst al-rāst");
        assert!(strict.iter().all(|jins| jins.name != "jins rāst al-nawā"));
    }

    #[test]
    fn test_cents_sequences_match_the_pattern() {
        let tuning = TuningSystem::new(
            "rounded",
            &["0", "204", "386", "498", "702", "905", "1088"],
            &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
        );
        let lattice = build_lattice(&tuning, "rāst");
        let mode = lattice.matching_mode(5.0);
        assert_eq!(mode, MatchingMode::Cents { tolerance: 5.0 });

        for direction in [Direction::Ascending, Direction::Descending] {
            let pattern = interval_pattern(&lattice, &["rāst", "dūgāh", "segāh", "chahārgāh"], direction);
            let sequences = find_transpositions(&lattice, &pattern, direction, mode);
            assert!(sequences.len() > 1);
            for sequence in &sequences {
                assert!(intervals_match_all(&pitch_class_intervals(sequence), &pattern, mode));
            }
        }
    }

    #[test]
    fn test_entries_too_low_to_convert_are_skipped() {
        let tuning = TuningSystem::new("low", &["-10000", "0", "200"], &[&["rāst", "dūgāh", "segāh"]]);
        let lattice = build_lattice(&tuning, "rāst");
        assert!(lattice.len() < 12);
        assert!(lattice.iter().all(|pc| *pc.fraction.numer() > 0));

        let jins = JinsTemplate::new("j", "j", &["dūgāh", "segāh"]);
        let found = jins_transpositions(&lattice, &jins, &TranspositionOptions::default());
        assert_eq!(found[0].name, "j al-dūgāh");
    }

    #[test]
    fn test_maqam_pairs_on_shared_tonic() {
        let lattice = seven();
        let found = maqam_transpositions(&lattice, &rast_maqam(), &[], &TranspositionOptions::default());
        assert!(!found.is_empty());
        assert_eq!(found[0].name, "maqām rāst al-rāst");
        assert!(!found[0].transposition);
        for maqam in &found {
            let tonic = maqam.ascending_pitch_classes[0].note_name;
            assert_eq!(maqam.descending_pitch_classes.last().unwrap().note_name, tonic);
            assert_eq!(maqam.ascending_pitch_classes.len(), 8);
            assert_eq!(maqam.descending_pitch_classes.len(), 8);
        }
    }

    #[test]
    fn test_unnamed_tonics_pair_with_themselves() {
        let tuning = TuningSystem::new(
            "whole_tone",
            &["0", "200", "400", "600", "800", "1000"],
            &[&["rāst", "dūgāh", "segāh"]],
        );
        let lattice = build_lattice(&tuning, "rāst");
        let maqam = MaqamTemplate::new("m", "m", &["rāst", "dūgāh"], &["dūgāh", "rāst"]);

        let found = maqam_transpositions(&lattice, &maqam, &[], &TranspositionOptions::default());
        assert!(found.iter().any(|maqam| maqam.ascending_pitch_classes[0].note_name == "none"));
        for maqam in &found {
            let tonic = &maqam.ascending_pitch_classes[0];
            let last = maqam.descending_pitch_classes.last().unwrap();
            assert_eq!((last.octave, last.index), (tonic.octave, tonic.index));
            assert_eq!(last.frequency, tonic.frequency);
        }
    }

    #[test]
    fn test_embedded_ajnas() {
        let lattice = seven();
        let ajnas = vec![
            JinsTemplate::new("jins_rast", "jins rāst", &["rāst", "dūgāh", "segāh", "chahārgāh"]),
            JinsTemplate::new("jins_ajam", "jins ʿajam", &["chahārgāh", "nawā", "ḥusaynī", "awj"]),
            JinsTemplate::new("jins_nawa", "jins nawā", &["nawā", "ḥusaynī", "awj", "kurdān"]),
        ];
        let found = maqam_transpositions(&lattice, &rast_maqam(), &ajnas, &TranspositionOptions::default());
        let tahlil = &found[0];

        assert_eq!(tahlil.ascending_ajnas.len(), 8);
        let first = tahlil.ascending_ajnas[0].as_ref().unwrap();
        assert_eq!(first.name, "jins rāst al-rāst");
        assert!(!first.transposition);
        assert!(tahlil.ascending_ajnas[1].is_none());
        assert_eq!(tahlil.ascending_ajnas[3].as_ref().unwrap().jins_id, "jins_ajam");
        let fifth = tahlil.ascending_ajnas[4].as_ref().unwrap();
        assert_eq!(fifth.name, "jins nawā al-nawā");
        assert!(!fifth.transposition);
        // The octave above the tonic is read from the extension past kurdān.
        let eighth = tahlil.ascending_ajnas[7].as_ref().unwrap();
        assert_eq!(eighth.name, "jins rāst al-kurdān");
        assert!(eighth.transposition);
        assert_eq!(eighth.pitch_classes[1].note_name, "muḥayyar");

        assert_eq!(tahlil.descending_ajnas.len(), 8);
        assert_eq!(
            tahlil.descending_ajnas.last().unwrap().as_ref().map(|jins| jins.jins_id.as_str()),
            Some("jins_rast")
        );
    }

    #[test]
    fn test_extend_by_octave_skips_repeated_tonic() {
        let lattice = seven();
        let tahlil = rast_maqam().tahlil(&lattice).unwrap();
        let extended = extend_by_octave(&lattice, &tahlil.ascending_pitch_classes);
        assert_eq!(extended.len(), 15);
        assert_eq!(extended[8].note_name, "muḥayyar");
        assert_eq!(extended[14].note_name, "jawāb kurdān");

        let seven_notes: Vec<PitchClass> = tahlil.ascending_pitch_classes[..7].to_vec();
        assert_eq!(extend_by_octave(&lattice, &seven_notes).len(), 14);
    }

    #[test]
    fn test_can_transpose_maqam_to_note() {
        let lattice = seven();
        let maqam = rast_maqam();
        assert!(can_transpose_maqam_to_note(&lattice, &maqam, "rāst", 5.0));
        assert!(!can_transpose_maqam_to_note(&lattice, &maqam, "nawā", 5.0));
        assert!(!can_transpose_maqam_to_note(&lattice, &maqam, "kurdī", 5.0));
    }
}
