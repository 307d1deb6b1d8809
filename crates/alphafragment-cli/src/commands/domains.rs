use crate::cli::DomainsArgs;
use crate::config;
use crate::error::{CliError, Result};
use alphafragment::core::domains::finder::find_domains_from_pae;
use alphafragment::core::domains::thresholds::PartialThresholds;
use alphafragment::core::io::pae::read_pae_json;
use alphafragment::core::models::domain::Domain;
use tracing::info;

pub fn run(args: DomainsArgs) -> Result<()> {
    let thresholds =
        config::resolve_thresholds(&args.method, args.thresholds, PartialThresholds::default())?;
    info!(%thresholds, "Identifying domains in {:?}.", args.pae);

    let pae = read_pae_json(&args.pae)?;
    let domains = find_domains_from_pae(&pae, &thresholds).map_err(|e| CliError::FileParsing {
        path: args.pae.clone(),
        source: e.into(),
    })?;

    print!("{}", render_domains(&domains));
    Ok(())
}

/// One line per domain, using 1-based inclusive residue numbers.
fn render_domains(domains: &[Domain]) -> String {
    if domains.is_empty() {
        return "No domains found.\n".to_string();
    }
    domains
        .iter()
        .map(|d| {
            format!(
                "{}\t{}-{}\t({} residues)\n",
                d.id,
                d.start() + 1,
                d.end() + 1,
                d.span()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ThresholdArgs;
    use alphafragment::core::models::domain::DomainOrigin;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn render_domains_uses_one_based_numbering() {
        let domains = vec![
            Domain::new("AF_D1", 0, 15, DomainOrigin::StructurePrediction).unwrap(),
            Domain::new("AF_D2", 22, 39, DomainOrigin::StructurePrediction).unwrap(),
        ];
        assert_eq!(
            render_domains(&domains),
            "AF_D1\t1-16\t(16 residues)\nAF_D2\t23-40\t(18 residues)\n"
        );
    }

    #[test]
    fn render_domains_reports_empty_result() {
        assert_eq!(render_domains(&[]), "No domains found.\n");
    }

    #[test]
    fn run_accepts_alphafold_database_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pae.json");
        let row = vec!["1.0"; 12].join(",");
        let rows = vec![format!("[{}]", row); 12].join(",");
        fs::write(
            &path,
            format!("[{{\"predicted_aligned_error\": [{}]}}]", rows),
        )
        .unwrap();

        let args = DomainsArgs {
            pae: path,
            method: "cautious".to_string(),
            thresholds: ThresholdArgs::default(),
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn run_rejects_non_square_matrix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pae.json");
        fs::write(&path, r#"{"pae": [[0.0, 1.0], [1.0]]}"#).unwrap();

        let args = DomainsArgs {
            pae: path,
            method: "definite".to_string(),
            thresholds: ThresholdArgs::default(),
        };
        assert!(matches!(run(args), Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn run_requires_complete_custom_thresholds() {
        let args = DomainsArgs {
            pae: "unused.json".into(),
            method: "custom".to_string(),
            thresholds: ThresholdArgs {
                distance_cutoff: Some(4),
                close_threshold: Some(3.0),
                far_threshold: None,
            },
        };
        assert!(matches!(run(args), Err(CliError::Config(_))));
    }
}
