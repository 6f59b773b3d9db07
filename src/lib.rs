pub mod catalogue;
pub mod convert;
pub mod error;
pub mod interval;
pub mod lattice;
pub mod modulation;
pub mod note_names;
pub mod template;
pub mod transpose;

pub use catalogue::{AnalysisSettings, Catalogue};
pub use convert::{convert, Conversion, Fraction, PitchValue, ValueType};
pub use error::*;
pub use interval::{compute_interval, Direction, Interval, MatchingMode};
pub use lattice::{build_lattice, build_lattice_with_overrides, Lattice, PitchClass, TuningSystem};
pub use modulation::{ajnas_modulations, classify_modulations, maqamat_modulations, ModulationDegree, ModulationRules, Modulations};
pub use template::{Jins, JinsTemplate, Maqam, MaqamTemplate};
pub use transpose::{can_transpose_maqam_to_note, find_transpositions, jins_transpositions, maqam_transpositions, TranspositionOptions};

/// Build the lattice of a catalogue tuning system.
/// Without a starting note, the first name of the first note-name set is used.
pub fn catalogue_lattice(
    catalogue: &Catalogue,
    tuning_id: &str,
    starting_note: Option<&str>,
) -> Result<Lattice, MaqamError> {
    let tuning_system = catalogue.tuning_system(tuning_id)?;
    let starting_note = match starting_note {
        Some(note) => note,
        None => tuning_system.starting_notes().first().copied().unwrap_or(note_names::NONE),
    };
    tuning_system.value_type()?;
    Ok(build_lattice(tuning_system, starting_note))
}

/// Everything a source maqam can modulate to, with the catalogue's own settings.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulationReport {
    pub source: Maqam,
    pub maqamat: Modulations<Maqam>,
    pub ajnas: Modulations<Jins>,
}

/// Modulations of `maqam_id` in `tuning_id`, from its tahlil or from the realization
/// starting on `on_note`.
pub fn analyze_modulations(
    catalogue: &Catalogue,
    tuning_id: &str,
    maqam_id: &str,
    on_note: Option<&str>,
) -> Result<ModulationReport, MaqamError> {
    let lattice = catalogue_lattice(catalogue, tuning_id, None)?;
    let template = catalogue.maqam(maqam_id)?;
    let settings = &catalogue.settings;
    let options = settings.transposition_options();

    let source = maqam_transpositions(&lattice, template, &catalogue.ajnas, &options)
        .into_iter()
        .find(|maqam| match on_note {
            Some(note) => maqam.tonic().map(|pc| pc.note_name) == Some(note),
            None => !maqam.transposition,
        })
        .ok_or_else(|| MaqamError::UnknownEntry {
            kind: "realization of",
            id: format!("{} on {}", maqam_id, on_note.unwrap_or("its own notes")),
        })?;

    let maqamat = maqamat_modulations(
        &lattice,
        &source,
        &catalogue.maqamat,
        &catalogue.ajnas,
        &options,
        &settings.modulation_rules,
    );
    let ajnas = ajnas_modulations(&lattice, &source, &catalogue.ajnas, &options, &settings.modulation_rules);

    Ok(ModulationReport { source, maqamat, ajnas })
}
