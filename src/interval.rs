//! # Intervals
//!
//! The distance between two pitch classes in every representation, and the rules for
//! deciding when two intervals are the same.
//!
//! Ratio-like tuning systems (fractions, decimal ratios) compare intervals exactly.
//! Cents and MIDI systems compare within a tolerance. A search uses one discipline,
//! never both: see [`MatchingMode`].

use serde::Serialize;

use crate::convert::{Fraction, ValueType};
use crate::lattice::PitchClass;

/// Relative difference under which two decimal ratios count as equal.
const RATIO_EPSILON: f64 = 1e-9;

/// Direction a sequence of pitch classes is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub fraction: Fraction,
    pub cents: f64,
    pub decimal_ratio: f64,
    /// Change in string length from the lower to the upper pitch class.
    pub string_length: f64,
    pub fret_division: f64,
    /// The interval written in the tuning system's representation.
    pub original_value: String,
    pub value_type: ValueType,
}

impl Interval {
    pub fn unison(value_type: ValueType) -> Self {
        Interval {
            fraction: Fraction::new(1, 1),
            cents: 0.0,
            decimal_ratio: 1.0,
            string_length: 0.0,
            fret_division: 0.0,
            original_value: match value_type {
                ValueType::Fraction => "1/1".to_string(),
                ValueType::DecimalRatio => "1".to_string(),
                ValueType::Cents | ValueType::Midi => "0".to_string(),
            },
            value_type,
        }
    }

    /// This interval followed by `next`.
    pub fn then(&self, next: &Interval) -> Interval {
        let fraction = self.fraction * next.fraction;
        let cents = self.cents + next.cents;
        let decimal_ratio = self.decimal_ratio * next.decimal_ratio;
        Interval {
            fraction,
            cents,
            decimal_ratio,
            string_length: self.string_length + next.string_length,
            fret_division: self.fret_division + next.fret_division,
            original_value: format_original(self.value_type, fraction, cents, decimal_ratio),
            value_type: self.value_type,
        }
    }

    pub fn is_unison(&self) -> bool {
        self.fraction == Fraction::new(1, 1) && self.cents.abs() < 1e-9
    }

    fn ratio_equals(&self, other: &Interval) -> bool {
        if self.value_type == ValueType::Fraction && other.value_type == ValueType::Fraction {
            return self.fraction == other.fraction;
        }
        let scale = self.decimal_ratio.abs().max(other.decimal_ratio.abs());
        (self.decimal_ratio - other.decimal_ratio).abs() <= RATIO_EPSILON * scale
    }
}

fn format_original(value_type: ValueType, fraction: Fraction, cents: f64, decimal_ratio: f64) -> String {
    match value_type {
        ValueType::Fraction => format!("{}/{}", fraction.numer(), fraction.denom()),
        ValueType::Cents => format!("{}", cents),
        ValueType::DecimalRatio => format!("{}", decimal_ratio),
        ValueType::Midi => format!("{}", cents / 100.0),
    }
}

/// Interval from `from` to `to`. Negative cents when `to` is lower.
pub fn compute_interval(from: &PitchClass, to: &PitchClass) -> Interval {
    let fraction = to.fraction / from.fraction;
    let cents = to.cents - from.cents;
    let decimal_ratio = to.decimal_ratio / from.decimal_ratio;
    Interval {
        fraction,
        cents,
        decimal_ratio,
        string_length: to.string_length - from.string_length,
        fret_division: to.fret_division - from.fret_division,
        original_value: format_original(from.value_type, fraction, cents, decimal_ratio),
        value_type: from.value_type,
    }
}

/// Intervals between consecutive pitch classes.
pub fn pitch_class_intervals(pitch_classes: &[PitchClass]) -> Vec<Interval> {
    pitch_classes
        .windows(2)
        .map(|pair| compute_interval(&pair[0], &pair[1]))
        .collect()
}

/// How two intervals are compared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchingMode {
    /// Exact ratio equality.
    ExactRatio,
    /// Cents within `tolerance`.
    Cents { tolerance: f64 },
}

impl MatchingMode {
    pub fn matches(&self, computed: &Interval, target: &Interval) -> bool {
        match *self {
            MatchingMode::ExactRatio => computed.ratio_equals(target),
            MatchingMode::Cents { tolerance } => (computed.cents - target.cents).abs() <= tolerance,
        }
    }

    /// Whether `computed` has gone past `target` in the search direction, so that no
    /// pitch class further along the lattice can match.
    pub fn overshoots(&self, computed: &Interval, target: &Interval, direction: Direction) -> bool {
        match *self {
            MatchingMode::ExactRatio => match direction {
                Direction::Ascending => computed.decimal_ratio > target.decimal_ratio,
                Direction::Descending => computed.decimal_ratio < target.decimal_ratio,
            },
            MatchingMode::Cents { tolerance } => target.cents.abs() + tolerance < computed.cents.abs(),
        }
    }
}

/// Whether two interval lists are the same length and match pairwise.
pub fn intervals_match_all(computed: &[Interval], target: &[Interval], mode: MatchingMode) -> bool {
    computed.len() == target.len()
        && computed.iter().zip(target).all(|(c, t)| mode.matches(c, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{build_lattice, TuningSystem};

    fn lattice() -> crate::lattice::Lattice {
        let tuning = TuningSystem::new(
            "just",
            &["1/1", "9/8", "5/4", "4/3", "3/2", "5/3", "15/8"],
            &[&["rāst", "dūgāh", "segāh", "chahārgāh", "nawā", "ḥusaynī", "awj"]],
        );
        build_lattice(&tuning, "rāst")
    }

    #[test]
    fn test_compute_interval() {
        let lattice = lattice();
        let rast = lattice.find("rāst").unwrap();
        let nawa = lattice.find("nawā").unwrap();
        let fifth = compute_interval(rast, nawa);
        assert_eq!(fifth.fraction, Fraction::new(3, 2));
        assert_eq!(fifth.original_value, "3/2");
        assert!((fifth.cents - 701.955).abs() < 1e-3);

        let down = compute_interval(nawa, rast);
        assert_eq!(down.fraction, Fraction::new(2, 3));
        assert!(down.cents < 0.0);
    }

    #[test]
    fn test_interval_round_trip_is_unison() {
        let lattice = lattice();
        for a in lattice.iter() {
            for b in lattice.iter() {
                let there = compute_interval(a, b);
                let back = compute_interval(b, a);
                assert!(there.then(&back).is_unison(), "{} -> {}", a.note_name, b.note_name);
            }
        }
        assert!(Interval::unison(ValueType::Fraction).is_unison());
    }

    #[test]
    fn test_exact_ratio_matching() {
        let lattice = lattice();
        let pcs = lattice.pitch_classes();
        let major_third = compute_interval(&pcs[7], &pcs[9]);
        let other_third = compute_interval(&pcs[10], &pcs[12]);
        let whole_tone = compute_interval(&pcs[7], &pcs[8]);
        let mode = MatchingMode::ExactRatio;
        assert!(mode.matches(&major_third, &other_third));
        assert!(!mode.matches(&major_third, &whole_tone));
        assert!(mode.overshoots(&major_third, &whole_tone, Direction::Ascending));
        assert!(!mode.overshoots(&whole_tone, &major_third, Direction::Ascending));
    }

    #[test]
    fn test_cents_matching_with_tolerance() {
        let tuning = TuningSystem::new("cents", &["0", "204", "386"], &[&["rāst", "dūgāh", "segāh"]]);
        let lattice = build_lattice(&tuning, "rāst");
        let pcs = lattice.pitch_classes();
        let tone = compute_interval(&pcs[3], &pcs[4]);
        let near = Interval { cents: 200.0, ..tone.clone() };
        let far = Interval { cents: 190.0, ..tone.clone() };

        let mode = MatchingMode::Cents { tolerance: 5.0 };
        assert!(mode.matches(&tone, &near));
        assert!(!mode.matches(&tone, &far));
        assert!(mode.overshoots(&tone, &far, Direction::Ascending));
        assert!(intervals_match_all(&[tone.clone()], &[near], mode));
        assert!(!intervals_match_all(&[tone.clone(), tone], &[far], mode));
    }
}
