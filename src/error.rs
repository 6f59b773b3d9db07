//! # Error Types
//!
//! This module defines all error types for the maqam analysis library.
//!
//! Most analysis outcomes that look like failures are not errors here: a jins with no
//! transpositions or a maqam with no modulations on a degree are ordinary, empty results.
//! Errors are reserved for malformed input and for conversions that have no meaning.
//!
//! ## Error Types
//! - `InvalidPitchValue` - Pitch value text that cannot be parsed
//! - `UnsupportedConversion` - A conversion with no defined result (e.g. cents of a zero ratio)
//! - `UnrecognizedValueType` - A tuning system whose values mix incompatible representations
//! - `CatalogueError` - Invalid YAML catalogue
//! - `UnknownEntry` - Lookup of an id that is not in the catalogue
//! - `Io` - Catalogue file could not be read
//!
//! ## Usage
//! ```rust
//! use maqam::{Catalogue, MaqamError};
//!
//! match Catalogue::from_yaml_str("tuning-systems: 12") {
//!     Ok(catalogue) => println!("{} tuning systems", catalogue.tuning_systems.len()),
//!     Err(MaqamError::CatalogueError(message)) => eprintln!("Bad catalogue: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaqamError {
    /// Pitch value text that cannot be read in its representation.
    ///
    /// # Example
    /// ```
    /// # use maqam::MaqamError;
    /// let err = MaqamError::InvalidPitchValue {
    ///     value: "3/0".to_string(),
    ///     reason: "zero denominator".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid pitch value '3/0': zero denominator");
    /// ```
    #[error("Invalid pitch value '{value}': {reason}")]
    InvalidPitchValue { value: String, reason: String },

    /// A conversion that is undefined for the given input.
    ///
    /// Raised at the conversion boundary, for example when asking for the cents
    /// of a non-positive ratio.
    ///
    /// # Example
    /// ```
    /// # use maqam::MaqamError;
    /// let err = MaqamError::UnsupportedConversion("cents of ratio 0".to_string());
    /// assert_eq!(err.to_string(), "Unsupported conversion: cents of ratio 0");
    /// ```
    #[error("Unsupported conversion: {0}")]
    UnsupportedConversion(String),

    /// The values of one tuning system do not share a representation.
    #[error("Unrecognized pitch value type: {0}")]
    UnrecognizedValueType(String),

    /// Invalid catalogue YAML.
    ///
    /// # Example
    /// ```
    /// # use maqam::MaqamError;
    /// let err = MaqamError::CatalogueError("missing field `id`".to_string());
    /// assert_eq!(err.to_string(), "Invalid catalogue: missing field `id`");
    /// ```
    #[error("Invalid catalogue: {0}")]
    CatalogueError(String),

    /// Lookup of an id that the catalogue does not contain.
    ///
    /// # Example
    /// ```
    /// # use maqam::MaqamError;
    /// let err = MaqamError::UnknownEntry {
    ///     kind: "jins",
    ///     id: "jins_missing".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unknown jins 'jins_missing'");
    /// ```
    #[error("Unknown {kind} '{id}'")]
    UnknownEntry { kind: &'static str, id: String },

    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },
}
