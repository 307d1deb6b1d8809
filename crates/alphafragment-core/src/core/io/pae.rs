use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// One PAE record. `pae` is looked up before `predicted_aligned_error`.
#[derive(Debug, Deserialize)]
struct PaeEntry {
    pae: Option<Value>,
    predicted_aligned_error: Option<Value>,
}

impl PaeEntry {
    fn into_matrix(self) -> Option<Value> {
        self.pae.or(self.predicted_aligned_error)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PaeDocument {
    /// AlphaFold database download: a list whose first record holds the matrix.
    Database(Vec<PaeEntry>),
    Local(PaeEntry),
}

#[derive(Debug, Error)]
pub enum PaeReadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No PAE matrix found (expected a 'pae' or 'predicted_aligned_error' entry)")]
    MissingMatrix,
    #[error("PAE row {row} is not an array")]
    InvalidRow { row: usize },
    #[error("PAE entry at ({row}, {column}) is not a number")]
    NonNumeric { row: usize, column: usize },
}

/// Reads a PAE matrix from a JSON file on disk.
pub fn read_pae_json(path: &Path) -> Result<Vec<Vec<f64>>, PaeReadError> {
    let content = std::fs::read_to_string(path).map_err(|e| PaeReadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_pae_json(&content)
}

/// Parses a PAE matrix from JSON text.
///
/// Two layouts are accepted: the AlphaFold database download, which is an array whose
/// first object carries `predicted_aligned_error`, and a plain object holding the matrix
/// under `pae` or `predicted_aligned_error`. Squareness is not checked here; the domain
/// finder validates the shape.
pub fn parse_pae_json(content: &str) -> Result<Vec<Vec<f64>>, PaeReadError> {
    let entry = match serde_json::from_str::<PaeDocument>(content)? {
        PaeDocument::Database(entries) => entries.into_iter().next(),
        PaeDocument::Local(entry) => Some(entry),
    };
    let matrix = entry
        .and_then(PaeEntry::into_matrix)
        .ok_or(PaeReadError::MissingMatrix)?;
    let rows = matrix.as_array().ok_or(PaeReadError::MissingMatrix)?;

    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            let values = values.as_array().ok_or(PaeReadError::InvalidRow { row })?;
            values
                .iter()
                .enumerate()
                .map(|(column, v)| v.as_f64().ok_or(PaeReadError::NonNumeric { row, column }))
                .collect::<Result<Vec<f64>, _>>()
        })
        .collect()
}
