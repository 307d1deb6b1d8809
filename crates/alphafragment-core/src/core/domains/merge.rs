use crate::core::models::domain::Domain;

/// Collapses overlapping domains into a minimal non-overlapping list ordered by start.
///
/// A domain is folded into the running one when it starts at or before the running
/// domain's end. Touching domains (`a.end + 1 == b.start`) stay separate. Each merged
/// domain keeps the id and origin of the first domain of its run; the inputs are never
/// modified.
pub fn merge_overlapping_domains<'a>(domains: impl IntoIterator<Item = &'a Domain>) -> Vec<Domain> {
    let mut sorted: Vec<&Domain> = domains.into_iter().collect();
    sorted.sort_by_key(|d| d.start());

    let mut merged: Vec<Domain> = Vec::with_capacity(sorted.len());
    for domain in sorted {
        match merged.last_mut() {
            Some(last) if domain.start() <= last.end() => {
                if domain.end() > last.end() {
                    *last = last.with_bounds(last.start(), domain.end());
                }
            }
            _ => merged.push(domain.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::domain::DomainOrigin;

    fn domain(id: &str, start: usize, end: usize) -> Domain {
        Domain::new(id, start, end, DomainOrigin::Manual).unwrap()
    }

    fn bounds(domains: &[Domain]) -> Vec<(usize, usize)> {
        domains.iter().map(|d| (d.start(), d.end())).collect()
    }

    #[test]
    fn overlapping_domains_are_merged() {
        let input = [domain("D1", 1, 5), domain("D2", 4, 10)];
        let merged = merge_overlapping_domains(&input);
        assert_eq!(bounds(&merged), vec![(1, 10)]);
        assert_eq!(merged[0].id, "D1");
    }

    #[test]
    fn touching_domains_are_kept_separate() {
        let input = [domain("D1", 1, 5), domain("D2", 6, 10)];
        let merged = merge_overlapping_domains(&input);
        assert_eq!(merged, input.to_vec());
    }

    #[test]
    fn unsorted_input_is_sorted_by_start() {
        let input = [domain("D1", 30, 40), domain("D2", 0, 10), domain("D3", 8, 12)];
        let merged = merge_overlapping_domains(&input);
        assert_eq!(bounds(&merged), vec![(0, 12), (30, 40)]);
        assert_eq!(merged[0].id, "D2");
    }

    #[test]
    fn contained_domain_does_not_shrink_running_domain() {
        let input = [domain("D1", 0, 50), domain("D2", 10, 20), domain("D3", 45, 60)];
        let merged = merge_overlapping_domains(&input);
        assert_eq!(bounds(&merged), vec![(0, 60)]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        let empty: Vec<Domain> = Vec::new();
        let merged = merge_overlapping_domains(&empty);
        assert!(merged.is_empty());
    }

    #[test]
    fn inputs_are_left_untouched() {
        let input = vec![domain("D1", 1, 5), domain("D2", 4, 10)];
        let snapshot = input.clone();
        let _ = merge_overlapping_domains(&input);
        assert_eq!(input, snapshot);
    }
}
