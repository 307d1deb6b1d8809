use crate::core::domains::merge::merge_overlapping_domains;
use crate::core::models::fragment::Fragment;
use crate::core::models::protein::{Protein, ProteinSubsection};
use crate::engine::bisection::bisect;
use crate::engine::config::FragmentationConfig;
use crate::engine::error::FragmentationError;
use crate::engine::long_domains::handle_long_domains;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::search::{SearchOutcome, search_fragments};
use tracing::{debug, info, instrument, warn};

/// Fragments a protein's residue window.
///
/// Long domains are isolated first; every remaining subsection is then searched on its
/// own. An exhausted search is retried with `length.max` widened by
/// `length_increment` (never past the subsection's length), while a search that runs out
/// of time is bisected and both halves are resolved again from the start. The returned
/// fragments are sorted by start and cover the window without gaps.
#[instrument(skip_all, name = "fragmentation_workflow", fields(protein = %protein.name))]
pub fn run(
    protein: &Protein,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Fragment>, FragmentationError> {
    config.validate()?;
    info!(
        residues = protein.len(),
        domains = protein.domains().len(),
        "Starting fragmentation."
    );

    // === Phase 1: Long-domain isolation ===
    reporter.report(Progress::PhaseStart {
        name: "Long-domain isolation",
    });
    let split = handle_long_domains(&protein.full_view(), &config.length, &config.overlap)?;
    info!(
        long_domain_fragments = split.fragments.len(),
        subsections = split.subsections.len(),
        "Long domains isolated."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Subsection search ===
    reporter.report(Progress::PhaseStart {
        name: "Subsection search",
    });
    reporter.report(Progress::TaskStart {
        total_steps: split.subsections.len() as u64,
    });
    let planner = Planner { config, reporter };
    let mut fragments = split.fragments;
    for subsection in split.subsections {
        planner.resolve_subsection(subsection, &mut fragments)?;
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    fragments.sort();
    info!(num_fragments = fragments.len(), "Fragmentation complete.");
    Ok(fragments)
}

struct Planner<'c, 'r> {
    config: &'c FragmentationConfig,
    reporter: &'c ProgressReporter<'r>,
}

impl Planner<'_, '_> {
    fn resolve_window(
        &self,
        window: ProteinSubsection<'_>,
        out: &mut Vec<Fragment>,
    ) -> Result<(), FragmentationError> {
        let split = handle_long_domains(&window, &self.config.length, &self.config.overlap)?;
        out.extend(split.fragments);
        for subsection in split.subsections {
            self.resolve_subsection(subsection, out)?;
        }
        Ok(())
    }

    fn resolve_subsection(
        &self,
        subsection: ProteinSubsection<'_>,
        out: &mut Vec<Fragment>,
    ) -> Result<(), FragmentationError> {
        let domains = merge_overlapping_domains(subsection.domains_in_window());
        let overlap = &self.config.overlap;
        let mut length = self.config.length;

        loop {
            if subsection.len() <= length.max {
                out.push(Fragment::new(subsection.first_res(), subsection.end()));
                return Ok(());
            }

            match search_fragments(
                &subsection,
                &domains,
                &length,
                overlap,
                self.config.time_limit,
            ) {
                SearchOutcome::Complete(found) => {
                    debug!(
                        first_res = subsection.first_res(),
                        last_res = subsection.last_res(),
                        num_fragments = found.len(),
                        "Subsection fragmented."
                    );
                    out.extend(found);
                    return Ok(());
                }
                SearchOutcome::Exhausted => {
                    length.max = (length.max + self.config.length_increment).min(subsection.len());
                    debug!(
                        first_res = subsection.first_res(),
                        last_res = subsection.last_res(),
                        max_len = length.max,
                        "No valid fragmentation; widening maximum fragment length."
                    );
                    self.reporter.report(Progress::LengthWidened {
                        first_res: subsection.first_res(),
                        last_res: subsection.last_res(),
                        max_len: length.max,
                    });
                }
                SearchOutcome::TimedOut => {
                    let Some(halves) = bisect(&subsection, &domains, &length, overlap) else {
                        warn!(
                            first_res = subsection.first_res(),
                            last_res = subsection.last_res(),
                            "Search timed out and no valid bisection point exists."
                        );
                        return Err(FragmentationError::BisectionFailed {
                            first_res: subsection.first_res(),
                            last_res: subsection.last_res(),
                            min_len: length.min,
                        });
                    };
                    debug!(
                        first_res = subsection.first_res(),
                        last_res = subsection.last_res(),
                        cut = halves.cut,
                        next_start = halves.next_start,
                        "Search timed out; bisecting subsection."
                    );
                    self.reporter.report(Progress::Bisected {
                        first_res: subsection.first_res(),
                        last_res: subsection.last_res(),
                        cut: halves.cut,
                    });
                    self.resolve_window(halves.first, out)?;
                    return self.resolve_window(halves.second, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::domain::{Domain, DomainOrigin};
    use crate::engine::config::Profile;
    use crate::engine::cutpoint::is_valid_cut;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn protein(len: usize, domains: &[(usize, usize)]) -> Protein {
        Protein::new("P", "ACC", "A".repeat(len))
            .unwrap()
            .with_domains(domains.iter().enumerate().map(|(i, &(s, e))| {
                Domain::new(format!("D{}", i + 1), s, e, DomainOrigin::Manual).unwrap()
            }))
    }

    fn small_config(time_limit: Duration) -> FragmentationConfig {
        FragmentationConfig {
            length: Profile::new(20, 30, 40),
            overlap: Profile::new(0, 5, 10),
            length_increment: 10,
            time_limit,
        }
    }

    fn assert_covers(fragments: &[Fragment], protein: &Protein, overlap: &Profile) {
        assert_eq!(fragments.first().unwrap().start, protein.first_res());
        assert_eq!(fragments.last().unwrap().end, protein.last_res() + 1);
        for pair in fragments.windows(2) {
            assert!(pair[1].start <= pair[0].end, "gap between {} and {}", pair[0], pair[1]);
            let o = pair[0].overlap_with(&pair[1]);
            assert!(
                o >= overlap.min && o <= overlap.max,
                "overlap {} between {} and {} out of band",
                o,
                pair[0],
                pair[1]
            );
        }
    }

    fn assert_no_domain_split(fragments: &[Fragment], protein: &Protein) {
        for f in fragments {
            for boundary in [f.start, f.end] {
                assert!(
                    is_valid_cut(boundary, protein.domains(), protein.last_res()),
                    "fragment {} splits a domain",
                    f
                );
            }
        }
    }

    #[test]
    fn short_protein_yields_single_fragment() {
        let p = protein(180, &[(20, 60)]);
        let fragments = run(&p, &FragmentationConfig::default(), &ProgressReporter::new()).unwrap();
        assert_eq!(fragments, vec![Fragment::new(0, 180)]);
    }

    #[test]
    fn fragments_cover_protein_without_splitting_domains() {
        let p = protein(
            1000,
            &[(100, 130), (300, 379), (320, 340), (500, 520), (700, 740)],
        );
        let config = FragmentationConfig {
            length: Profile::new(40, 50, 60),
            overlap: Profile::new(0, 5, 10),
            length_increment: 10,
            time_limit: Duration::from_secs(30),
        };
        let fragments = run(&p, &config, &ProgressReporter::new()).unwrap();
        assert_covers(&fragments, &p, &config.overlap);
        assert_no_domain_split(&fragments, &p);
        // The long domain sits in a single fragment.
        assert!(fragments.iter().any(|f| f.start <= 300 && f.end >= 380));
    }

    #[test]
    fn default_profile_fragments_long_protein() {
        let p = protein(1200, &[(150, 260), (400, 700), (900, 950)]);
        let config = FragmentationConfig::default();
        let fragments = run(&p, &config, &ProgressReporter::new()).unwrap();
        assert_covers(&fragments, &p, &config.overlap);
        assert_no_domain_split(&fragments, &p);
    }

    #[test]
    fn exhausted_search_widens_maximum_length() {
        // No cut between 20 and 50 avoids the domain, so only one 60-residue fragment fits.
        let p = protein(60, &[(12, 50)]);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        let fragments = run(&p, &small_config(Duration::from_secs(30)), &reporter).unwrap();
        assert_eq!(fragments, vec![Fragment::new(0, 60)]);

        let widened: Vec<usize> = events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Progress::LengthWidened { max_len, .. } => Some(*max_len),
                _ => None,
            })
            .collect();
        assert_eq!(widened, vec![50, 60]);
    }

    #[test]
    fn forced_timeout_bisects_around_central_domain() {
        let p = protein(200, &[(85, 114)]);
        let config = small_config(Duration::ZERO);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        let fragments = run(&p, &config, &reporter).unwrap();
        assert_covers(&fragments, &p, &config.overlap);
        assert_no_domain_split(&fragments, &p);
        assert!(fragments.iter().all(|f| f.len() >= config.length.min));
        assert!(fragments.iter().any(|f| f.start <= 85 && f.end >= 115));

        let first_cut = events.lock().unwrap().iter().find_map(|e| match e {
            Progress::Bisected { first_res: 0, last_res: 199, cut } => Some(*cut),
            _ => None,
        });
        assert_eq!(first_cut, Some(115));
    }

    #[test]
    fn timeout_without_valid_midpoint_is_an_error() {
        let p = protein(60, &[(12, 50)]);
        let result = run(&p, &small_config(Duration::ZERO), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(FragmentationError::BisectionFailed {
                first_res: 0,
                last_res: 59,
                min_len: 20
            })
        ));
    }

    #[test]
    fn invalid_configuration_fails_before_search() {
        let p = protein(100, &[]);
        let config = FragmentationConfig {
            overlap: Profile::new(0, 5, 25),
            ..small_config(Duration::from_secs(1))
        };
        let result = run(&p, &config, &ProgressReporter::new());
        assert!(matches!(result, Err(FragmentationError::Config { .. })));
    }

    #[test]
    fn reports_phases_and_subsection_progress() {
        let p = protein(300, &[(100, 179)]);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        run(&p, &small_config(Duration::from_secs(30)), &reporter).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(
            events.first(),
            Some(&Progress::PhaseStart {
                name: "Long-domain isolation"
            })
        );
        assert!(events.contains(&Progress::TaskStart { total_steps: 2 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == Progress::TaskIncrement)
                .count(),
            2
        );
        assert_eq!(events.last(), Some(&Progress::PhaseFinish));
    }
}
