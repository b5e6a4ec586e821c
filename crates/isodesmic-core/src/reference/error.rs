use super::records::RecordError;
use crate::core::species::SpeciesError;
use thiserror::Error;

/// Errors raised when turning reference data into reaction participants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferenceError {
    #[error("Level of theory '{level}' is not available for species '{species}'")]
    LevelOfTheoryUnavailable { species: String, level: String },

    #[error("No reference data is included for species '{species}'")]
    NoReferenceData { species: String },

    #[error("Species '{species}' has no reference data from source '{source_name}'")]
    UnknownSource { species: String, source_name: String },

    #[error("Reference set '{0}' is not loaded")]
    UnknownSet(String),

    #[error("Invalid reference species: {0}")]
    Species(#[from] SpeciesError),
}

/// Errors raised while reading reference sets from disk.
#[derive(Debug, Error)]
pub enum ReferenceLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid record for species '{species}' in '{path}': {source}")]
    Record {
        path: String,
        species: String,
        source: RecordError,
    },
}
