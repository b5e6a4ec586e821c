use isodesmic::core::reaction::ReactionError;
use isodesmic::reference::error::{ReferenceError, ReferenceLoadError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    ReferenceLoad(#[from] ReferenceLoadError),

    #[error(transparent)]
    Reaction(#[from] ReactionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
