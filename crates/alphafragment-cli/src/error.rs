use alphafragment::core::io::pae::PaeReadError;
use alphafragment::core::io::table::TableError;
use alphafragment::core::models::error::ModelError;
use alphafragment::engine::error::{DomainSourceError, FragmentationError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fragmentation(#[from] FragmentationError),

    #[error(transparent)]
    DomainSource(#[from] DomainSourceError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    PaeRead(#[from] PaeReadError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to process protein '{name}': {source}")]
    Protein {
        name: String,
        #[source]
        source: Box<CliError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
