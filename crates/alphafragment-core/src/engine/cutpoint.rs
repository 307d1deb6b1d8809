use super::config::Profile;
use crate::core::models::domain::Domain;

/// Whether slicing at `position` keeps every domain intact.
///
/// A cut at slicing index `r` ends one piece at residue `r-1` and starts the next at `r`.
/// Cutting one past the last residue is always allowed; cutting further out never is.
/// Otherwise the cut is invalid exactly when a single domain holds both `r-1` and `r`.
pub fn is_valid_cut(position: usize, domains: &[Domain], last_res: usize) -> bool {
    if position > last_res + 1 {
        return false;
    }
    if position == last_res + 1 || position == 0 {
        return true;
    }
    !domains
        .iter()
        .any(|d| d.contains(position - 1) && d.contains(position))
}

/// Start of the fragment following one that ends at `cut`.
///
/// Overlaps are tried closest to `overlap.ideal` first; the first overlap giving a valid
/// cut wins.
pub fn find_next_start(
    cut: usize,
    domains: &[Domain],
    last_res: usize,
    overlap: &Profile,
) -> Option<usize> {
    overlap
        .closest_first()
        .filter_map(|o| cut.checked_sub(o))
        .find(|&start| is_valid_cut(start, domains, last_res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::domain::DomainOrigin;

    fn domain(start: usize, end: usize) -> Domain {
        Domain::new("D", start, end, DomainOrigin::Manual).unwrap()
    }

    #[test]
    fn cut_inside_domain_is_invalid() {
        assert!(!is_valid_cut(5, &[domain(1, 10)], 10));
    }

    #[test]
    fn cut_before_last_domain_residue_is_invalid() {
        assert!(!is_valid_cut(10, &[domain(1, 10)], 10));
    }

    #[test]
    fn cut_at_sequence_end_is_valid() {
        assert!(is_valid_cut(11, &[domain(1, 10)], 10));
    }

    #[test]
    fn cut_at_domain_last_residue_keeps_domain_whole() {
        // Slicing at 10 separates residue 9 from residue 10, both inside the domain.
        assert!(!is_valid_cut(10, &[domain(1, 10)], 20));
        assert!(is_valid_cut(11, &[domain(1, 10)], 20));
        assert!(is_valid_cut(1, &[domain(1, 10)], 20));
    }

    #[test]
    fn domain_reaching_last_residue_is_only_cut_after_it() {
        assert!(!is_valid_cut(10, &[domain(1, 10)], 10));
        assert!(is_valid_cut(11, &[domain(1, 10)], 10));
        assert!(is_valid_cut(10, &[domain(1, 9)], 10));
    }

    #[test]
    fn cut_between_domains_is_valid() {
        assert!(is_valid_cut(11, &[domain(1, 10), domain(12, 20)], 20));
    }

    #[test]
    fn cut_at_shared_residue_of_overlapping_domains_is_invalid() {
        assert!(!is_valid_cut(10, &[domain(5, 10), domain(10, 15)], 15));
    }

    #[test]
    fn cut_beyond_sequence_end_is_invalid() {
        assert!(!is_valid_cut(12, &[], 10));
    }

    #[test]
    fn next_start_prefers_ideal_overlap() {
        let overlap = Profile::new(0, 10, 30);
        assert_eq!(find_next_start(100, &[], 300, &overlap), Some(90));
    }

    #[test]
    fn next_start_moves_out_of_domains() {
        let overlap = Profile::new(0, 10, 30);
        // Residues 80..=95 form a domain, so starts 81..=95 would split it.
        let domains = [domain(80, 95)];
        assert_eq!(find_next_start(100, &domains, 300, &overlap), Some(80));
    }

    #[test]
    fn next_start_falls_back_below_ideal() {
        let overlap = Profile::new(2, 10, 12);
        let domains = [domain(85, 99)];
        // Overlaps 10..=12 land inside the domain; 9..=2 give starts 91..=98, also inside.
        assert_eq!(find_next_start(100, &domains, 300, &overlap), None);
        let domains = [domain(85, 95)];
        assert_eq!(find_next_start(100, &domains, 300, &overlap), Some(96));
    }

    #[test]
    fn next_start_ignores_overlaps_larger_than_cut() {
        let overlap = Profile::new(0, 10, 30);
        assert_eq!(find_next_start(5, &[], 300, &overlap), Some(0));
    }
}
