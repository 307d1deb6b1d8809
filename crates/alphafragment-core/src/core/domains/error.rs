use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum PaeError {
    #[error("PAE matrix is empty")]
    EmptyMatrix,

    #[error("PAE matrix must be square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("PAE matrix entry at ({row}, {column}) is not a number")]
    NonNumeric { row: usize, column: usize },

    #[error("Unknown PAE threshold preset '{0}'. Choose 'cautious', 'definite', or 'custom'")]
    UnknownPreset(String),

    #[error("Custom PAE thresholds require a value for '{0}'")]
    MissingThreshold(&'static str),
}
