use super::config::{Profile, validate_profiles};
use super::cutpoint::is_valid_cut;
use super::error::FragmentationError;
use crate::core::domains::merge::merge_overlapping_domains;
use crate::core::models::fragment::Fragment;
use crate::core::models::protein::ProteinSubsection;
use tracing::debug;

/// Result of carving long domains out of a residue window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongDomainSplit<'a> {
    /// Windows left between the long-domain fragments, to be fragmented independently.
    pub subsections: Vec<ProteinSubsection<'a>>,
    /// One padded fragment per long domain.
    pub fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, Copy)]
struct LongDomain {
    start: usize,
    end: usize,
}

impl LongDomain {
    fn span(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Gives every domain at least `length.max` residues long a fragment of its own.
///
/// Residue runs shorter than `length.min` between a long domain and the window edge, or
/// between two long domains, are absorbed into a long-domain fragment instead of being
/// left as stubs. Between two long domains the shorter one absorbs the gap; on a tie the
/// earlier domain does. Each fragment is then padded outward by the overlap closest to
/// `overlap.ideal` (up to `overlap.max`, then down to zero) that lands on a valid cut.
///
/// Whatever lies between the resulting fragments is returned as subsections. A window
/// with no long domains is returned whole.
pub fn handle_long_domains<'a>(
    window: &ProteinSubsection<'a>,
    length: &Profile,
    overlap: &Profile,
) -> Result<LongDomainSplit<'a>, FragmentationError> {
    validate_profiles(length, overlap)?;

    let first_res = window.first_res();
    let last_res = window.last_res();
    let absorb_below = length.min.max(2);
    let merged = merge_overlapping_domains(window.domains_in_window());

    let long_domains: Vec<LongDomain> = merged
        .iter()
        .filter(|d| d.span() >= length.max)
        .map(|d| LongDomain {
            start: d.start().max(first_res),
            end: d.end().min(last_res),
        })
        .collect();

    if long_domains.is_empty() {
        return Ok(LongDomainSplit {
            subsections: vec![*window],
            fragments: Vec::new(),
        });
    }

    let padding = Profile::new(0, overlap.ideal, overlap.max);
    let mut subsections = Vec::new();
    let mut fragments = Vec::with_capacity(long_domains.len());
    let mut next_free = first_res;

    for (idx, domain) in long_domains.iter().enumerate() {
        let mut start = domain.start;
        let mut end = domain.end;
        if domain.start - first_res < absorb_below {
            start = first_res;
        }
        if last_res - domain.end < absorb_below {
            end = last_res;
        }

        for (other_idx, other) in long_domains.iter().enumerate() {
            if other_idx == idx {
                continue;
            }
            if other.start > domain.end
                && other.start - domain.end - 1 < absorb_below
                && domain.span() <= other.span()
            {
                end = end.max(other.start - 1);
            }
            if other.end < domain.start
                && domain.start - other.end - 1 < absorb_below
                && domain.span() < other.span()
            {
                start = start.min(other.end + 1);
            }
        }

        if start > next_free {
            subsections.push(window.subsection(next_free, start - 1)?);
        }
        next_free = next_free.max(end + 1);

        let padded_start = padding
            .closest_first()
            .filter_map(|o| start.checked_sub(o))
            .find(|&p| is_valid_cut(p, &merged, last_res))
            .unwrap_or(start)
            .max(first_res);
        let padded_end = padding
            .closest_first()
            .map(|o| end + o)
            .find(|&p| is_valid_cut(p + 1, &merged, last_res))
            .unwrap_or(end)
            .min(last_res);

        debug!(
            domain_start = domain.start,
            domain_end = domain.end,
            fragment_start = padded_start,
            fragment_end = padded_end + 1,
            "Isolated long domain."
        );
        fragments.push(Fragment::new(padded_start, padded_end + 1));
    }

    if next_free <= last_res {
        subsections.push(window.subsection(next_free, last_res)?);
    }

    Ok(LongDomainSplit {
        subsections,
        fragments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::domain::{Domain, DomainOrigin};
    use crate::core::models::protein::Protein;

    const LENGTH: Profile = Profile::new(20, 30, 40);
    const OVERLAP: Profile = Profile::new(0, 5, 10);

    fn protein(len: usize, domains: &[(usize, usize)]) -> Protein {
        Protein::new("P", "ACC", "A".repeat(len))
            .unwrap()
            .with_domains(domains.iter().enumerate().map(|(i, &(s, e))| {
                Domain::new(format!("D{}", i + 1), s, e, DomainOrigin::Manual).unwrap()
            }))
    }

    fn bounds(subsections: &[ProteinSubsection]) -> Vec<(usize, usize)> {
        subsections
            .iter()
            .map(|s| (s.first_res(), s.last_res()))
            .collect()
    }

    #[test]
    fn window_without_long_domains_is_returned_whole() {
        let p = protein(200, &[(10, 30), (100, 120)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert!(split.fragments.is_empty());
        assert_eq!(split.subsections, vec![p.full_view()]);
    }

    #[test]
    fn central_long_domain_gets_padded_fragment() {
        let p = protein(200, &[(80, 129)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert_eq!(split.fragments, vec![Fragment::new(75, 135)]);
        assert_eq!(bounds(&split.subsections), vec![(0, 79), (130, 199)]);
    }

    #[test]
    fn short_edge_gaps_are_absorbed() {
        let p = protein(100, &[(10, 89)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert_eq!(split.fragments, vec![Fragment::new(0, 100)]);
        assert!(split.subsections.is_empty());
    }

    #[test]
    fn shorter_long_domain_absorbs_gap_between_long_domains() {
        // Gap 110..=119 is shorter than the minimum length; the first domain is shorter.
        let p = protein(300, &[(50, 109), (120, 199)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert_eq!(
            split.fragments,
            vec![Fragment::new(45, 120), Fragment::new(115, 205)]
        );
        assert_eq!(bounds(&split.subsections), vec![(0, 49), (200, 299)]);
    }

    #[test]
    fn equal_long_domains_leave_gap_to_the_earlier_one() {
        let p = protein(300, &[(50, 109), (115, 174)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert_eq!(split.fragments[0].end, 115);
        assert_eq!(split.fragments[1].start, 110);
        assert_eq!(bounds(&split.subsections), vec![(0, 49), (175, 299)]);
    }

    #[test]
    fn padding_avoids_neighbouring_domains() {
        // A short domain ending right before the long one leaves no room for overlap.
        let p = protein(300, &[(70, 99), (100, 159)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert_eq!(split.fragments, vec![Fragment::new(100, 165)]);

        // With a two-residue gap the largest overlap below ideal that avoids it is taken.
        let p = protein(300, &[(85, 97), (100, 159)]);
        let split = handle_long_domains(&p.full_view(), &LENGTH, &OVERLAP).unwrap();
        assert_eq!(split.fragments, vec![Fragment::new(98, 165)]);
    }

    #[test]
    fn subsection_window_is_respected() {
        let p = protein(400, &[(150, 219)]);
        let window = p.subsection(100, 299).unwrap();
        let split = handle_long_domains(&window, &LENGTH, &OVERLAP).unwrap();
        assert_eq!(split.fragments, vec![Fragment::new(145, 225)]);
        assert_eq!(bounds(&split.subsections), vec![(100, 149), (220, 299)]);
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        let p = protein(100, &[]);
        let result = handle_long_domains(&p.full_view(), &Profile::new(20, 30, 40), &Profile::new(0, 5, 25));
        assert!(matches!(result, Err(FragmentationError::Config { .. })));
    }
}
