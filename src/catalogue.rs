//! # Catalogue
//!
//! Tuning systems, ajnas and maqamat, read from YAML, plus the analysis settings that
//! go with them.
//!
//! ## Format
//! ```yaml
//! settings:
//!   cents-tolerance: 5
//!   only-octave-one: false
//! tuning-systems:
//!   - id: just_7
//!     pitch-values: ["1/1", "9/8", "5/4", "4/3", "3/2", "5/3", "15/8"]
//!     note-name-sets:
//!       - [rāst, dūgāh, segāh, chahārgāh, nawā, ḥusaynī, awj]
//! ajnas:
//!   - id: jins_rast
//!     name: jins rāst
//!     note-names: [rāst, dūgāh, segāh, chahārgāh]
//! maqamat: []
//! ```
//!
//! Every section may be omitted. [`Catalogue::builtin()`] returns a small catalogue
//! compiled into the crate.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MaqamError;
use crate::lattice::TuningSystem;
use crate::modulation::ModulationRules;
use crate::template::{JinsTemplate, MaqamTemplate};
use crate::transpose::TranspositionOptions;

const BUILTIN_CATALOGUE: &str = include_str!("../data/catalogue.yaml");

fn default_cents_tolerance() -> f64 {
    5.0
}

/// Settings applied to every analysis run against a catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnalysisSettings {
    #[serde(default = "default_cents_tolerance")]
    pub cents_tolerance: f64,
    #[serde(default)]
    pub only_octave_one: bool,
    #[serde(default)]
    pub modulation_rules: ModulationRules,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            cents_tolerance: default_cents_tolerance(),
            only_octave_one: false,
            modulation_rules: ModulationRules::default(),
        }
    }
}

impl AnalysisSettings {
    pub fn transposition_options(&self) -> TranspositionOptions {
        TranspositionOptions {
            cents_tolerance: self.cents_tolerance,
            only_octave_one: self.only_octave_one,
            ..TranspositionOptions::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalogue {
    #[serde(default)]
    pub tuning_systems: Vec<TuningSystem>,
    #[serde(default)]
    pub ajnas: Vec<JinsTemplate>,
    #[serde(default)]
    pub maqamat: Vec<MaqamTemplate>,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl Catalogue {
    pub fn from_yaml_str(content: &str) -> Result<Self, MaqamError> {
        let catalogue: Catalogue =
            serde_yaml::from_str(content).map_err(|e| MaqamError::CatalogueError(e.to_string()))?;
        debug!(
            tuning_systems = catalogue.tuning_systems.len(),
            ajnas = catalogue.ajnas.len(),
            maqamat = catalogue.maqamat.len(),
            "catalogue loaded"
        );
        Ok(catalogue)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MaqamError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MaqamError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// The catalogue shipped with the crate.
    pub fn builtin() -> Result<Self, MaqamError> {
        Self::from_yaml_str(BUILTIN_CATALOGUE)
    }

    pub fn tuning_system(&self, id: &str) -> Result<&TuningSystem, MaqamError> {
        self.tuning_systems
            .iter()
            .find(|ts| ts.id == id)
            .ok_or_else(|| unknown("tuning system", id))
    }

    pub fn jins(&self, id: &str) -> Result<&JinsTemplate, MaqamError> {
        self.ajnas
            .iter()
            .find(|jins| jins.id == id)
            .ok_or_else(|| unknown("jins", id))
    }

    pub fn maqam(&self, id: &str) -> Result<&MaqamTemplate, MaqamError> {
        self.maqamat
            .iter()
            .find(|maqam| maqam.id == id)
            .ok_or_else(|| unknown("maqam", id))
    }
}

fn unknown(kind: &'static str, id: &str) -> MaqamError {
    MaqamError::UnknownEntry {
        kind,
        id: id.to_string(),
    }
}
