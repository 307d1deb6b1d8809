use super::config::Profile;
use super::cutpoint::{find_next_start, is_valid_cut};
use crate::core::models::domain::Domain;
use crate::core::models::fragment::Fragment;
use crate::core::models::protein::ProteinSubsection;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Fragments covering the whole subsection, in order.
    Complete(Vec<Fragment>),
    /// Every candidate was tried without reaching the end of the subsection.
    Exhausted,
    /// The time budget ran out before a solution was found.
    TimedOut,
}

/// One fragment under construction: where it starts and which candidate length to try next.
struct Frame {
    start: usize,
    next_candidate: usize,
}

/// Depth-first search for a chain of overlapping fragments covering `subsection`.
///
/// `domains` should be the merged working list for the subsection. Candidate lengths are
/// tried closest to `length.ideal` first, and each fragment end must be a valid cut with a
/// valid overlapping start for the next fragment. A subsection no longer than
/// `length.max` is returned as a single fragment.
///
/// The budget covers the whole search and is checked each time a new fragment is opened.
pub fn search_fragments(
    subsection: &ProteinSubsection,
    domains: &[Domain],
    length: &Profile,
    overlap: &Profile,
    time_limit: Duration,
) -> SearchOutcome {
    let first_res = subsection.first_res();
    let last_res = subsection.last_res();
    let end = subsection.end();

    if subsection.len() <= length.max {
        return SearchOutcome::Complete(vec![Fragment::new(first_res, end)]);
    }

    let started = Instant::now();
    if started.elapsed() >= time_limit {
        return SearchOutcome::TimedOut;
    }

    let candidates: Vec<usize> = length.closest_first().collect();
    let mut frames = vec![Frame {
        start: first_res,
        next_candidate: 0,
    }];
    let mut fragments: Vec<Fragment> = Vec::new();

    while let Some(frame) = frames.last_mut() {
        let Some(&candidate) = candidates.get(frame.next_candidate) else {
            // Every length failed from this start; undo the fragment that led here.
            frames.pop();
            fragments.pop();
            continue;
        };
        frame.next_candidate += 1;

        let cut = frame.start + candidate;
        if !is_valid_cut(cut, domains, last_res) {
            continue;
        }
        if cut == end {
            fragments.push(Fragment::new(frame.start, cut));
            trace!(num_fragments = fragments.len(), "Search reached end of subsection.");
            return SearchOutcome::Complete(fragments);
        }
        let Some(next_start) = find_next_start(cut, domains, last_res, overlap) else {
            continue;
        };

        fragments.push(Fragment::new(frame.start, cut));
        if started.elapsed() >= time_limit {
            return SearchOutcome::TimedOut;
        }
        frames.push(Frame {
            start: next_start,
            next_candidate: 0,
        });
    }

    SearchOutcome::Exhausted
}
