use crate::core::models::domain::Domain;
use crate::core::models::fragment::Fragment;
use crate::core::models::protein::Protein;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

const REQUIRED_COLUMNS: [&str; 2] = ["name", "accession_id"];
const KNOWN_COLUMNS: [&str; 5] = ["name", "accession_id", "sequence", "domains", "pae_file"];
const OUTPUT_COLUMNS: [&str; 6] = [
    "name",
    "accession_id",
    "sequence",
    "domains",
    "fragment_indices",
    "fragment_sequences",
];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV error for '{path}': {source}")]
    File { path: String, source: csv::Error },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Duplicate column names detected after normalization: {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One usable row of the input protein table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRecord {
    pub name: String,
    pub accession_id: String,
    pub sequence: String,
    /// Raw manual domain text, if the row has any.
    pub domains: Option<String>,
    pub pae_file: Option<String>,
    /// Values of the columns this crate does not interpret, aligned with
    /// [`ProteinTable::extra_columns`].
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingSequence,
}

/// A row that could not become a [`ProteinRecord`]. `row` is 1-based, excluding the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub name: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProteinTable {
    pub extra_columns: Vec<String>,
    pub records: Vec<ProteinRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Trims, lower-cases and replaces spaces with underscores.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Removes the outermost parenthesised text from a protein name, e.g. `"Plp (isoform 2)"`
/// becomes `"Plp"`.
pub fn clean_protein_name(name: &str) -> String {
    match (name.find('('), name.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            format!("{}{}", &name[..open], &name[close + 1..]).trim().to_string()
        }
        _ => name.trim().to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub fn read_protein_table(path: &Path) -> Result<ProteinTable, TableError> {
    let file = std::fs::File::open(path).map_err(|e| TableError::File {
        path: path.to_string_lossy().to_string(),
        source: csv::Error::from(e),
    })?;
    read_protein_table_from(file)
}

/// Reads a protein table from any CSV source.
///
/// Rows without a name or a sequence are not returned as records; they are listed in
/// [`ProteinTable::skipped`] instead.
pub fn read_protein_table_from<R: io::Read>(reader: R) -> Result<ProteinTable, TableError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for header in &headers {
        *counts.entry(header.as_str()).or_default() += 1;
    }
    let mut duplicates: Vec<String> = headers
        .iter()
        .filter(|h| counts[h.as_str()] > 1)
        .cloned()
        .collect();
    duplicates.sort();
    duplicates.dedup();
    if !duplicates.is_empty() {
        return Err(TableError::DuplicateColumns(duplicates));
    }

    let index_of = |column: &str| headers.iter().position(|h| h == column);
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| index_of(**c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableError::MissingColumns(missing));
    }

    let (name_idx, accession_idx) = (index_of("name"), index_of("accession_id"));
    let (sequence_idx, domains_idx, pae_idx) = (
        index_of("sequence"),
        index_of("domains"),
        index_of("pae_file"),
    );
    let extra_indices: Vec<usize> = (0..headers.len())
        .filter(|&i| !KNOWN_COLUMNS.contains(&headers[i].as_str()))
        .collect();

    let mut table = ProteinTable {
        extra_columns: extra_indices.iter().map(|&i| headers[i].clone()).collect(),
        ..Default::default()
    };

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: Option<usize>| non_empty(idx.and_then(|i| record.get(i)));
        let row = row_idx + 1;

        let Some(name) = field(name_idx).map(|n| clean_protein_name(&n)).filter(|n| !n.is_empty())
        else {
            warn!(row, "Missing protein name; skipping entry.");
            table.skipped.push(SkippedRow {
                row,
                name: None,
                reason: SkipReason::MissingName,
            });
            continue;
        };
        let Some(sequence) = field(sequence_idx) else {
            warn!(row, protein = %name, "No sequence available; skipping entry.");
            table.skipped.push(SkippedRow {
                row,
                name: Some(name),
                reason: SkipReason::MissingSequence,
            });
            continue;
        };

        table.records.push(ProteinRecord {
            name,
            accession_id: field(accession_idx).unwrap_or_default(),
            sequence,
            domains: field(domains_idx),
            pae_file: field(pae_idx),
            extra: extra_indices
                .iter()
                .map(|&i| record.get(i).unwrap_or_default().to_string())
                .collect(),
        });
    }
    Ok(table)
}

/// Formats domains 1-based as `[(id, (start, end)), ...]`, suffixing repeated ids with
/// `_2`, `_3`, and so on. No domains formats as an empty string.
pub fn format_domains(domains: &[Domain]) -> String {
    if domains.is_empty() {
        return String::new();
    }
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let entries: Vec<String> = domains
        .iter()
        .map(|d| {
            let count = seen.entry(d.id.as_str()).or_default();
            *count += 1;
            let id = if *count > 1 {
                format!("{}_{}", d.id, count)
            } else {
                d.id.clone()
            };
            format!("({}, ({}, {}))", quote_id(&id), d.start() + 1, d.end() + 1)
        })
        .collect();
    format!("[{}]", entries.join(", "))
}

/// Leaves ids that read back as bare names untouched and quotes the rest.
fn quote_id(id: &str) -> String {
    let bare = id
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii_digit())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if bare {
        id.to_string()
    } else if id.contains('\'') {
        format!("\"{}\"", id)
    } else {
        format!("'{}'", id)
    }
}

/// Formats fragments 1-based and inclusive as `[(start, end), ...]`.
pub fn format_fragments(fragments: &[Fragment]) -> String {
    let entries: Vec<String> = fragments
        .iter()
        .map(|f| {
            let (start, end) = f.one_based();
            format!("({}, {})", start, end)
        })
        .collect();
    format!("[{}]", entries.join(", "))
}

pub fn format_fragment_sequences(protein: &Protein) -> String {
    let sequences: Vec<&str> = protein
        .fragments()
        .iter()
        .filter_map(|f| protein.fragment_sequence(f))
        .collect();
    format!("[{}]", sequences.join(", "))
}

pub fn write_fragment_table<'a>(
    path: &Path,
    extra_columns: &[String],
    rows: impl IntoIterator<Item = (&'a Protein, &'a [String])>,
) -> Result<(), TableError> {
    let file = std::fs::File::create(path).map_err(|e| TableError::File {
        path: path.to_string_lossy().to_string(),
        source: csv::Error::from(e),
    })?;
    write_fragment_table_to(file, extra_columns, rows)
}

/// Writes fragmented proteins as CSV.
///
/// The fixed output columns come first, followed by `extra_columns`. Each row pairs a
/// protein with the values of its extra columns.
pub fn write_fragment_table_to<'a, W: io::Write>(
    writer: W,
    extra_columns: &[String],
    rows: impl IntoIterator<Item = (&'a Protein, &'a [String])>,
) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_writer(writer);
    let header = OUTPUT_COLUMNS
        .iter()
        .copied()
        .chain(extra_columns.iter().map(String::as_str));
    writer.write_record(header)?;

    for (protein, extra) in rows {
        let fixed = [
            protein.name.clone(),
            protein.accession_id.clone(),
            protein.sequence().to_string(),
            format_domains(protein.domains()),
            format_fragments(protein.fragments()),
            format_fragment_sequences(protein),
        ];
        writer.write_record(fixed.iter().map(String::as_str).chain(extra.iter().map(String::as_str)))?;
    }
    writer.flush()?;
    Ok(())
}
