use super::config::Profile;
use super::cutpoint::{find_next_start, is_valid_cut};
use crate::core::models::domain::Domain;
use crate::core::models::protein::ProteinSubsection;

/// Two overlapping halves of a subsection, split without breaking a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bisection<'a> {
    /// Residues `first_res..cut`.
    pub first: ProteinSubsection<'a>,
    /// Residues `next_start..=last_res`.
    pub second: ProteinSubsection<'a>,
    pub cut: usize,
    pub next_start: usize,
}

/// Splits `subsection` at the valid cut closest to its midpoint.
///
/// Candidates are scanned outward from the midpoint, after then before. A candidate is
/// accepted when it is a valid cut, a start for the second half can be found with the
/// usual overlap rules, and both halves keep at least `length.min` residues (and never
/// fewer than two). Returns `None` when no candidate qualifies.
pub fn bisect<'a>(
    subsection: &ProteinSubsection<'a>,
    domains: &[Domain],
    length: &Profile,
    overlap: &Profile,
) -> Option<Bisection<'a>> {
    let first_res = subsection.first_res();
    let last_res = subsection.last_res();
    let end = subsection.end();
    let min_half = length.min.max(2);
    let midpoint = (first_res + end) / 2;

    let accept = |cut: usize| -> Option<Bisection<'a>> {
        if cut <= first_res || cut >= end || cut - first_res < min_half {
            return None;
        }
        if !is_valid_cut(cut, domains, last_res) {
            return None;
        }
        let next_start = find_next_start(cut, domains, last_res, overlap)?;
        if end - next_start < min_half {
            return None;
        }
        Some(Bisection {
            first: subsection.subsection(first_res, cut - 1).ok()?,
            second: subsection.subsection(next_start, last_res).ok()?,
            cut,
            next_start,
        })
    };

    (0..=subsection.len()).find_map(|shift| {
        accept(midpoint + shift).or_else(|| {
            midpoint
                .checked_sub(shift)
                .filter(|_| shift > 0)
                .and_then(&accept)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::domain::DomainOrigin;
    use crate::core::models::protein::Protein;

    fn protein(len: usize, domains: &[(usize, usize)]) -> Protein {
        Protein::new("P", "ACC", "A".repeat(len))
            .unwrap()
            .with_domains(domains.iter().enumerate().map(|(i, &(s, e))| {
                Domain::new(format!("D{}", i + 1), s, e, DomainOrigin::Manual).unwrap()
            }))
    }

    #[test]
    fn splits_at_midpoint_when_free() {
        let p = protein(100, &[]);
        let halves = bisect(
            &p.full_view(),
            &[],
            &Profile::new(20, 30, 40),
            &Profile::new(0, 5, 10),
        )
        .unwrap();
        assert_eq!(halves.cut, 50);
        assert_eq!(halves.next_start, 45);
        assert_eq!((halves.first.first_res(), halves.first.last_res()), (0, 49));
        assert_eq!((halves.second.first_res(), halves.second.last_res()), (45, 99));
    }

    #[test]
    fn moves_cut_out_of_central_domain() {
        let p = protein(200, &[(90, 115)]);
        let domains = p.domains().to_vec();
        let halves = bisect(
            &p.full_view(),
            &domains,
            &Profile::new(40, 50, 60),
            &Profile::new(0, 5, 10),
        )
        .unwrap();
        // The nearest valid cut below the domain is 90, above it 116; 90 is closer.
        assert_eq!(halves.cut, 90);
        assert!(is_valid_cut(halves.next_start, &domains, 199));
        assert!(halves.first.len() >= 40);
        assert!(halves.second.len() >= 40);
    }

    #[test]
    fn first_half_stops_before_domain_starting_at_cut() {
        let p = protein(200, &[(90, 115)]);
        let domains = p.domains().to_vec();
        let halves = bisect(
            &p.full_view(),
            &domains,
            &Profile::new(40, 50, 60),
            &Profile::new(0, 5, 10),
        )
        .unwrap();
        assert_eq!(halves.cut, 90);
        assert_eq!(halves.first.last_res(), 89);
        assert_eq!(halves.first.domains_in_window().count(), 0);
        assert!(halves.second.first_res() <= 90);
    }

    #[test]
    fn halves_overlap_and_cover_the_subsection() {
        let p = protein(300, &[]);
        let sub = p.subsection(50, 249).unwrap();
        let halves = bisect(&sub, &[], &Profile::new(30, 40, 50), &Profile::new(0, 5, 10)).unwrap();
        assert_eq!(halves.first.first_res(), 50);
        assert_eq!(halves.second.last_res(), 249);
        assert!(halves.second.first_res() <= halves.first.last_res() + 1);
    }

    #[test]
    fn no_valid_midpoint_when_domain_fills_subsection() {
        let p = protein(100, &[(5, 95)]);
        let domains = p.domains().to_vec();
        let result = bisect(
            &p.full_view(),
            &domains,
            &Profile::new(20, 30, 40),
            &Profile::new(0, 5, 10),
        );
        assert_eq!(result, None);
    }
}
