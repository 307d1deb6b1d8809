use thiserror::Error;

use super::config::ConfigError;
use crate::core::domains::error::PaeError;
use crate::core::io::manual::ManualDomainError;
use crate::core::models::error::ModelError;

#[derive(Debug, Error)]
pub enum FragmentationError {
    #[error("Invalid fragmentation parameters: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid protein data: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error(
        "No valid bisection point in residues {first_res}-{last_res}: every candidate leaves a half shorter than {min_len}"
    )]
    BisectionFailed {
        first_res: usize,
        last_res: usize,
        min_len: usize,
    },
}

#[derive(Debug, Error)]
pub enum DomainSourceError {
    #[error("Domain identification from PAE failed: {source}")]
    Pae {
        #[from]
        source: PaeError,
    },

    #[error("PAE matrix has {found} rows but the protein has {expected} residues")]
    PaeSizeMismatch { expected: usize, found: usize },

    #[error("Invalid manually specified domains: {source}")]
    Manual {
        #[from]
        source: ManualDomainError,
    },
}
