use crate::core::domains::finder::find_domains_from_pae;
use crate::core::domains::thresholds::ThresholdProfile;
use crate::core::io::manual::parse_manual_domains;
use crate::core::models::domain::Domain;
use crate::core::models::protein::Protein;
use crate::engine::error::DomainSourceError;
use tracing::{info, instrument};

/// Which domain sources are consulted, and how PAE matrices are thresholded.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSourceConfig {
    pub use_structure_prediction: bool,
    pub use_manual: bool,
    pub thresholds: ThresholdProfile,
}

impl Default for DomainSourceConfig {
    fn default() -> Self {
        Self {
            use_structure_prediction: true,
            use_manual: true,
            thresholds: ThresholdProfile::default(),
        }
    }
}

/// Collects the domains of `protein` from every enabled source.
///
/// Domains found in the PAE matrix come first, followed by manually specified ones.
/// Disabled or absent sources contribute nothing. Overlaps between sources are left for
/// the planner, which merges domains itself.
#[instrument(skip_all, name = "domain_compilation", fields(protein = %protein.name))]
pub fn compile_domains(
    protein: &Protein,
    pae: Option<&[Vec<f64>]>,
    manual: Option<&str>,
    config: &DomainSourceConfig,
) -> Result<Vec<Domain>, DomainSourceError> {
    let mut domains = Vec::new();

    if let Some(pae) = pae.filter(|_| config.use_structure_prediction) {
        let expected = protein.sequence().len();
        if pae.len() != expected {
            return Err(DomainSourceError::PaeSizeMismatch {
                expected,
                found: pae.len(),
            });
        }
        let found = find_domains_from_pae(pae, &config.thresholds)?;
        if found.is_empty() {
            info!("No domains found in PAE matrix.");
        } else {
            info!(count = found.len(), "Domains found in PAE matrix.");
        }
        domains.extend(found);
    }

    if let Some(text) = manual.filter(|_| config.use_manual) {
        let found = parse_manual_domains(text)?;
        info!(count = found.len(), "Manually specified domains parsed.");
        domains.extend(found);
    }

    Ok(domains)
}
