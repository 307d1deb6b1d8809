use crate::cli::FragmentArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use alphafragment::core::io::pae::read_pae_json;
use alphafragment::core::io::table::{ProteinRecord, read_protein_table, write_fragment_table};
use alphafragment::core::models::protein::Protein;
use alphafragment::engine::progress::ProgressReporter;
use alphafragment::workflows;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[instrument(skip_all, name = "fragment_command")]
pub fn run(args: FragmentArgs) -> Result<()> {
    info!("Starting 'fragment' command.");

    // === Phase 1: Configuration ===
    let app_config = config::build_config(&args)?;
    info!(
        length = %app_config.fragmentation.length,
        overlap = %app_config.fragmentation.overlap,
        thresholds = %app_config.domain_sources.thresholds,
        "Configuration resolved."
    );

    // === Phase 2: Input table ===
    let table = read_protein_table(&app_config.input_path)?;
    info!(
        proteins = table.records.len(),
        skipped = table.skipped.len(),
        "Read protein table from {:?}.",
        app_config.input_path
    );
    if !table.skipped.is_empty() {
        eprintln!(
            "⚠ Skipped {} row(s) without a name or sequence.",
            table.skipped.len()
        );
    }

    // === Phase 3: Fragmentation ===
    let base_dir = app_config
        .input_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let mut proteins = Vec::with_capacity(table.records.len());
    for record in &table.records {
        handler.set_prefix(&record.name);
        let protein = process_protein(record, &app_config, &base_dir, &reporter).map_err(|e| {
            CliError::Protein {
                name: record.name.clone(),
                source: Box::new(e),
            }
        })?;
        info!(
            protein = %protein.name,
            fragments = protein.fragments().len(),
            "Protein fragmented."
        );
        proteins.push(protein);
    }

    // === Phase 4: Output ===
    let rows = proteins
        .iter()
        .zip(&table.records)
        .map(|(protein, record)| (protein, record.extra.as_slice()));
    write_fragment_table(&app_config.output_path, &table.extra_columns, rows)?;
    info!("Fragment table written to {:?}.", app_config.output_path);
    println!(
        "Fragmented {} protein(s) into {:?}.",
        proteins.len(),
        app_config.output_path
    );

    Ok(())
}

fn process_protein(
    record: &ProteinRecord,
    app_config: &AppConfig,
    base_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Protein> {
    let protein = Protein::new(
        record.name.as_str(),
        record.accession_id.as_str(),
        record.sequence.as_str(),
    )?;

    let pae = match &record.pae_file {
        Some(file) if app_config.domain_sources.use_structure_prediction => {
            let path = resolve_pae_path(file, base_dir);
            debug!(protein = %protein.name, "Reading PAE matrix from {:?}.", path);
            Some(read_pae_json(&path)?)
        }
        Some(_) => None,
        None => {
            if app_config.domain_sources.use_structure_prediction {
                warn!(protein = %protein.name, "No PAE file listed; relying on manual domains only.");
            }
            None
        }
    };

    let domains = workflows::domains::compile_domains(
        &protein,
        pae.as_deref(),
        record.domains.as_deref(),
        &app_config.domain_sources,
    )?;

    let mut protein = protein.with_domains(domains);
    let fragments = workflows::fragment::run(&protein, &app_config.fragmentation, reporter)?;
    protein.set_fragments(&fragments)?;
    Ok(protein)
}

/// Relative PAE paths are looked up next to the input table.
fn resolve_pae_path(file: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
