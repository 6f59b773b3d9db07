//! # Numeric Conversion
//!
//! Conversion between the four pitch representations a tuning system may be written in:
//! fraction (`"9/8"`, `"9:8"`), cents (`"203.91"`), decimal ratio (`"1.125"`) and MIDI
//! note number (`"62"`).
//!
//! ## Detection
//! A single value is classified by content and magnitude:
//! - contains `/` or `:` → fraction
//! - integer in `0..=127` → MIDI
//! - outside `[0.5, 8.0]` → cents
//! - otherwise → decimal ratio
//!
//! A whole tuning system is classified with [`detect_values_type`], which resolves the
//! mixes that per-value detection produces for ordinary cents or decimal lists
//! (`["0", "100", "203.9"]` is a cents list even though `"0"` and `"100"` look like MIDI).
//!
//! ## Related Modules
//! - `lattice` - expands a tuning system through these conversions
//! - `interval` - compares converted values

use std::collections::BTreeSet;
use std::fmt;

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::error::MaqamError;

/// Exact pitch ratio.
pub type Fraction = Ratio<u64>;

/// Largest denominator used when approximating a non-fraction value as a fraction.
pub const MAX_APPROXIMATION_DENOMINATOR: u64 = 99;

/// Representation a pitch value is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Fraction,
    Cents,
    DecimalRatio,
    Midi,
}

impl ValueType {
    /// Ratio-like systems match intervals exactly; the others match within a cents tolerance.
    pub fn is_ratio_like(self) -> bool {
        matches!(self, ValueType::Fraction | ValueType::DecimalRatio)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Fraction => "fraction",
            ValueType::Cents => "cents",
            ValueType::DecimalRatio => "decimal ratio",
            ValueType::Midi => "MIDI",
        };
        f.write_str(name)
    }
}

/// Classify one value. Returns `None` when the text is not numeric at all.
pub fn detect_value_type(value: &str) -> Option<ValueType> {
    let value = value.trim();
    if value.contains('/') || value.contains(':') {
        return Some(ValueType::Fraction);
    }

    if let Ok(integer) = value.parse::<i64>() {
        if (0..=127).contains(&integer) {
            return Some(ValueType::Midi);
        }
    }

    let number = value.parse::<f64>().ok().filter(|n| n.is_finite())?;
    if !(0.5..=8.0).contains(&number) {
        Some(ValueType::Cents)
    } else {
        Some(ValueType::DecimalRatio)
    }
}

/// Classify the value list of a whole tuning system.
///
/// Fractions cannot be mixed with anything else. Mixed numeric lists resolve to the
/// representation that explains all of their values.
pub fn detect_values_type<S: AsRef<str>>(values: &[S]) -> Result<ValueType, MaqamError> {
    if values.is_empty() {
        return Err(MaqamError::UnrecognizedValueType("no pitch values".to_string()));
    }

    let mut found = BTreeSet::new();
    for value in values {
        let value = value.as_ref();
        let value_type = detect_value_type(value).ok_or_else(|| {
            MaqamError::UnrecognizedValueType(format!("'{}' is not a pitch value", value))
        })?;
        found.insert(value_type);
    }

    if found.contains(&ValueType::Fraction) {
        if found.len() == 1 {
            return Ok(ValueType::Fraction);
        }
        return Err(MaqamError::UnrecognizedValueType(
            "fractions mixed with other representations".to_string(),
        ));
    }

    let midi = found.contains(&ValueType::Midi);
    let cents = found.contains(&ValueType::Cents);
    let decimal = found.contains(&ValueType::DecimalRatio);

    Ok(match (midi, cents, decimal) {
        (true, false, false) => {
            // A list anchored at unison is a cents list whose values happen to be integers.
            if values[0].as_ref().trim().parse::<i64>() == Ok(0) {
                ValueType::Cents
            } else {
                ValueType::Midi
            }
        }
        (_, true, _) => ValueType::Cents,
        _ => ValueType::DecimalRatio,
    })
}

/// A parsed pitch value in its original representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchValue {
    Fraction(Fraction),
    Cents(f64),
    DecimalRatio(f64),
    Midi(f64),
}

impl PitchValue {
    /// Parse `text` as a value of the given representation.
    pub fn parse(text: &str, value_type: ValueType) -> Result<Self, MaqamError> {
        match value_type {
            ValueType::Fraction => parse_fraction(text).map(PitchValue::Fraction),
            ValueType::Cents => parse_number(text).map(PitchValue::Cents),
            ValueType::DecimalRatio => parse_number(text).map(PitchValue::DecimalRatio),
            ValueType::Midi => parse_number(text).map(PitchValue::Midi),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            PitchValue::Fraction(_) => ValueType::Fraction,
            PitchValue::Cents(_) => ValueType::Cents,
            PitchValue::DecimalRatio(_) => ValueType::DecimalRatio,
            PitchValue::Midi(_) => ValueType::Midi,
        }
    }

    /// Move the value by whole octaves in its own representation.
    pub fn shift_octaves(&self, octaves: i32) -> Result<Self, MaqamError> {
        let factor = 2f64.powi(octaves);
        Ok(match *self {
            PitchValue::Fraction(fraction) => {
                let scale = 2u64.checked_pow(octaves.unsigned_abs()).ok_or_else(|| {
                    MaqamError::UnsupportedConversion(format!("shift of {} octaves", octaves))
                })?;
                let (numer, denom) = if octaves >= 0 {
                    (fraction.numer().checked_mul(scale), Some(*fraction.denom()))
                } else {
                    (Some(*fraction.numer()), fraction.denom().checked_mul(scale))
                };
                match (numer, denom) {
                    (Some(numer), Some(denom)) => PitchValue::Fraction(Fraction::new(numer, denom)),
                    _ => {
                        return Err(MaqamError::UnsupportedConversion(format!(
                            "{} shifted by {} octaves overflows",
                            fraction, octaves
                        )))
                    }
                }
            }
            PitchValue::Cents(cents) => PitchValue::Cents(cents + 1200.0 * octaves as f64),
            PitchValue::DecimalRatio(ratio) => PitchValue::DecimalRatio(ratio * factor),
            PitchValue::Midi(midi) => PitchValue::Midi(midi + 12.0 * octaves as f64),
        })
    }

    /// Frequency ratio above the tuning system's first value.
    ///
    /// MIDI values have no ratio of their own, so they are measured from `midi_anchor`,
    /// the MIDI value of the tuning system's first entry.
    pub fn to_decimal_ratio(&self, midi_anchor: f64) -> f64 {
        match *self {
            PitchValue::Fraction(fraction) => fraction_to_f64(&fraction),
            PitchValue::Cents(cents) => cents_to_ratio(cents),
            PitchValue::DecimalRatio(ratio) => ratio,
            PitchValue::Midi(midi) => 2f64.powf((midi - midi_anchor) / 12.0),
        }
    }
}

impl fmt::Display for PitchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchValue::Fraction(fraction) => write!(f, "{}/{}", fraction.numer(), fraction.denom()),
            PitchValue::Cents(value) | PitchValue::DecimalRatio(value) | PitchValue::Midi(value) => {
                write!(f, "{}", value)
            }
        }
    }
}

/// All derived representations of one pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub fraction: Fraction,
    pub cents: f64,
    pub decimal_ratio: f64,
    pub frequency: f64,
    pub string_length: f64,
}

/// Convert a pitch value to every representation.
///
/// `string_length` is the length of the open string the tuning system is measured on;
/// `reference_frequency` is the frequency of ratio `1/1`.
pub fn convert(
    value: &PitchValue,
    midi_anchor: f64,
    string_length: f64,
    reference_frequency: f64,
) -> Result<Conversion, MaqamError> {
    let decimal_ratio = value.to_decimal_ratio(midi_anchor);
    let cents = match value {
        PitchValue::Cents(cents) => *cents,
        _ => ratio_to_cents(decimal_ratio)?,
    };
    let fraction = match value {
        PitchValue::Fraction(fraction) => *fraction,
        _ => decimal_to_fraction(decimal_ratio, MAX_APPROXIMATION_DENOMINATOR)?,
    };

    Ok(Conversion {
        fraction,
        cents,
        decimal_ratio,
        frequency: reference_frequency * decimal_ratio,
        string_length: string_length / decimal_ratio,
    })
}

pub fn parse_fraction(text: &str) -> Result<Fraction, MaqamError> {
    let text = text.trim();
    let invalid = |reason: &str| MaqamError::InvalidPitchValue {
        value: text.to_string(),
        reason: reason.to_string(),
    };

    let (numer, denom) = text
        .split_once('/')
        .or_else(|| text.split_once(':'))
        .ok_or_else(|| invalid("expected <numerator>/<denominator>"))?;
    let numer: u64 = numer.trim().parse().map_err(|_| invalid("numerator is not a whole number"))?;
    let denom: u64 = denom.trim().parse().map_err(|_| invalid("denominator is not a whole number"))?;

    if denom == 0 {
        return Err(invalid("zero denominator"));
    }
    if numer == 0 {
        return Err(invalid("zero numerator"));
    }
    Ok(Fraction::new(numer, denom))
}

fn parse_number(text: &str) -> Result<f64, MaqamError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| MaqamError::InvalidPitchValue {
            value: text.to_string(),
            reason: "not a number".to_string(),
        })
}

pub fn fraction_to_f64(fraction: &Fraction) -> f64 {
    *fraction.numer() as f64 / *fraction.denom() as f64
}

pub fn ratio_to_cents(ratio: f64) -> Result<f64, MaqamError> {
    if !(ratio > 0.0) || !ratio.is_finite() {
        return Err(MaqamError::UnsupportedConversion(format!("cents of ratio {}", ratio)));
    }
    Ok(1200.0 * ratio.log2())
}

pub fn cents_to_ratio(cents: f64) -> f64 {
    2f64.powf(cents / 1200.0)
}

/// Fractional MIDI note number of a frequency (A4 = 440 Hz = 69).
pub fn frequency_to_midi(frequency: f64) -> Result<f64, MaqamError> {
    if !(frequency > 0.0) || !frequency.is_finite() {
        return Err(MaqamError::UnsupportedConversion(format!(
            "MIDI number of frequency {}",
            frequency
        )));
    }
    Ok(69.0 + 12.0 * (frequency / 440.0).log2())
}

pub fn midi_to_frequency(midi: f64) -> f64 {
    440.0 * 2f64.powf((midi - 69.0) / 12.0)
}

/// Best rational approximation of `value` with a denominator no larger than `max_denominator`.
///
/// Values too small to approximate with a non-zero numerator are an error.
pub fn decimal_to_fraction(value: f64, max_denominator: u64) -> Result<Fraction, MaqamError> {
    if !(value > 0.0) || !value.is_finite() || max_denominator == 0 {
        return Err(MaqamError::UnsupportedConversion(format!("fraction of {}", value)));
    }
    let fraction = approximate(value, max_denominator);
    if *fraction.numer() == 0 {
        return Err(MaqamError::UnsupportedConversion(format!(
            "fraction of {} with denominator at most {}",
            value, max_denominator
        )));
    }
    Ok(fraction)
}

fn approximate(value: f64, max_denominator: u64) -> Fraction {

    // Continued fraction convergents: (p0/q0) precedes (p1/q1).
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let mut x = value;
    loop {
        let a = x.floor() as u64;
        let q2 = a.saturating_mul(q1).saturating_add(q0);
        if q2 > max_denominator {
            break;
        }
        let p2 = a.saturating_mul(p1).saturating_add(p0);
        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let remainder = x - x.floor();
        if remainder < 1e-9 {
            return Fraction::new(p1, q1);
        }
        x = 1.0 / remainder;
    }

    // The last convergent is always available since the first step has q2 = 1.
    let convergent = Fraction::new(p1, q1);
    let k = (max_denominator - q0) / q1;
    let semi_denominator = q0 + k * q1;
    if k == 0 || semi_denominator == 0 {
        return convergent;
    }
    let semiconvergent = Fraction::new(p0 + k * p1, semi_denominator);

    let error = |f: &Fraction| (fraction_to_f64(f) - value).abs();
    if error(&semiconvergent) < error(&convergent) {
        semiconvergent
    } else {
        convergent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_single_values() {
        assert_eq!(detect_value_type("9/8"), Some(ValueType::Fraction));
        assert_eq!(detect_value_type("3:2"), Some(ValueType::Fraction));
        assert_eq!(detect_value_type("60"), Some(ValueType::Midi));
        assert_eq!(detect_value_type("203.91"), Some(ValueType::Cents));
        assert_eq!(detect_value_type("1.125"), Some(ValueType::DecimalRatio));
        assert_eq!(detect_value_type("rast"), None);
    }

    #[test]
    fn test_detect_system_types() {
        assert_eq!(detect_values_type(&["1/1", "9/8", "5/4"]), Ok(ValueType::Fraction));
        assert_eq!(detect_values_type(&["0", "100", "200"]), Ok(ValueType::Cents));
        assert_eq!(detect_values_type(&["0", "90.2", "203.9"]), Ok(ValueType::Cents));
        assert_eq!(detect_values_type(&["1", "1.125", "1.25"]), Ok(ValueType::DecimalRatio));
        assert_eq!(detect_values_type(&["60", "62", "64"]), Ok(ValueType::Midi));
        assert!(detect_values_type(&["1/1", "1.125"]).is_err());
        assert!(detect_values_type::<&str>(&[]).is_err());
    }

    #[test]
    fn test_parse_fraction_rejects_zero() {
        assert!(parse_fraction("3/0").is_err());
        assert!(parse_fraction("0/1").is_err());
        assert_eq!(parse_fraction(" 18 : 16 "), Ok(Fraction::new(9, 8)));
    }

    #[test]
    fn test_shift_octaves() {
        let fifth = PitchValue::Fraction(Fraction::new(3, 2));
        assert_eq!(fifth.shift_octaves(-1), Ok(PitchValue::Fraction(Fraction::new(3, 4))));
        assert_eq!(fifth.shift_octaves(2), Ok(PitchValue::Fraction(Fraction::new(6, 1))));
        assert_eq!(PitchValue::Cents(700.0).shift_octaves(1), Ok(PitchValue::Cents(1900.0)));
        assert_eq!(PitchValue::Midi(60.0).shift_octaves(-1), Ok(PitchValue::Midi(48.0)));
    }

    #[test]
    fn test_convert_fraction() {
        let conversion = convert(&PitchValue::Fraction(Fraction::new(3, 2)), 0.0, 1000.0, 110.0).unwrap();
        assert!((conversion.cents - 701.955).abs() < 1e-3);
        assert!((conversion.frequency - 165.0).abs() < 1e-9);
        assert!((conversion.string_length - 666.666).abs() < 1e-2);
        assert_eq!(conversion.fraction, Fraction::new(3, 2));
    }

    #[test]
    fn test_convert_midi_is_relative_to_anchor() {
        let conversion = convert(&PitchValue::Midi(72.0), 60.0, 1000.0, 261.63).unwrap();
        assert!((conversion.decimal_ratio - 2.0).abs() < 1e-12);
        assert_eq!(conversion.fraction, Fraction::new(2, 1));
    }

    #[test]
    fn test_decimal_to_fraction() {
        assert_eq!(decimal_to_fraction(1.25, 99), Ok(Fraction::new(5, 4)));
        assert_eq!(decimal_to_fraction(cents_to_ratio(701.955), 99), Ok(Fraction::new(3, 2)));
        // 2^(1/12) has no small exact form; the approximation stays within bounds.
        let semitone = decimal_to_fraction(cents_to_ratio(100.0), 99).unwrap();
        assert!(*semitone.denom() <= 99);
        assert!((fraction_to_f64(&semitone) - cents_to_ratio(100.0)).abs() < 1e-3);
        assert!(decimal_to_fraction(0.0, 99).is_err());
    }

    #[test]
    fn test_decimal_to_fraction_rejects_values_below_smallest_step() {
        assert!(matches!(
            decimal_to_fraction(0.0015, 99),
            Err(MaqamError::UnsupportedConversion(_))
        ));
        assert!(decimal_to_fraction(1e-12, 99).is_err());
        assert_eq!(decimal_to_fraction(1.0 / 99.0, 99), Ok(Fraction::new(1, 99)));
    }

    #[test]
    fn test_frequency_to_midi() {
        assert!((frequency_to_midi(440.0).unwrap() - 69.0).abs() < 1e-12);
        assert!((frequency_to_midi(261.6256).unwrap() - 60.0).abs() < 1e-3);
        assert!(frequency_to_midi(0.0).is_err());
        assert!(ratio_to_cents(-1.0).is_err());
    }
}
