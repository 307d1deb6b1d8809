use super::error::PaeError;
use super::thresholds::ThresholdProfile;
use crate::core::models::domain::{Domain, DomainOrigin};
use tracing::{debug, trace};

/// Residue pairs closer than this are always confidently co-located and never evaluated.
pub const MIN_PAIR_DISTANCE: usize = 5;

/// Checks that `pae` is a non-empty square matrix of numbers and returns its size.
pub fn validate_pae<R: AsRef<[f64]>>(pae: &[R]) -> Result<usize, PaeError> {
    let n = pae.len();
    if n == 0 {
        return Err(PaeError::EmptyMatrix);
    }
    for (row_idx, row) in pae.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != n {
            return Err(PaeError::NotSquare {
                row: row_idx,
                expected: n,
                found: row.len(),
            });
        }
        if let Some(column) = row.iter().position(|v| v.is_nan()) {
            return Err(PaeError::NonNumeric {
                row: row_idx,
                column,
            });
        }
    }
    Ok(n)
}

fn domain_index_of(domains: &[Domain], residue: usize) -> Option<usize> {
    domains.iter().position(|d| d.contains(residue))
}

/// Groups residues into domains from a predicted aligned error matrix.
///
/// For each residue `i` the partner residues `j` are scanned from the far end of the
/// sequence inward, stopping at the first linked partner. A linked pair either extends
/// the domain already holding `i` up to `j`, or opens a new domain `[i, j]` when neither
/// residue is assigned yet. Every residue between the two is implicitly included, so
/// domains never contain gaps.
///
/// When both residues of a linked pair already belong to domains nothing happens, even
/// if they belong to different domains.
pub fn find_domains_from_pae<R: AsRef<[f64]>>(
    pae: &[R],
    profile: &ThresholdProfile,
) -> Result<Vec<Domain>, PaeError> {
    let n = validate_pae(pae)?;
    let thresholds = profile.thresholds();
    let origin = DomainOrigin::StructurePrediction;
    let mut domains: Vec<Domain> = Vec::new();

    for i in 0..n {
        for j in ((i + MIN_PAIR_DISTANCE)..n).rev() {
            let relative_pae = pae[i].as_ref()[j].min(pae[j].as_ref()[i]);
            if !thresholds.links(j - i, relative_pae) {
                continue;
            }

            match (
                domain_index_of(&domains, i),
                domain_index_of(&domains, j),
            ) {
                (Some(idx), None) => domains[idx].extend_end(j),
                (None, None) => {
                    let id = origin.sequential_id(domains.len() + 1);
                    domains.push(Domain::from_ordered(id, i, j, origin));
                }
                _ => trace!(i, j, "Linked residues already assigned; leaving domains as is."),
            }
            break;
        }
    }

    debug!(
        num_domains = domains.len(),
        profile = %profile,
        "Domain identification from PAE complete."
    );
    Ok(domains)
}
