//! # Engine Module
//!
//! The fragmentation planner: everything needed to turn a residue window and its domains
//! into a gap-free chain of overlapping fragments that never cut through a domain.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Length and overlap bands, widening increment, time budget
//! - **Cutpoints** ([`cutpoint`]) - The single rule deciding whether a slicing position splits a domain
//! - **Long Domains** ([`long_domains`]) - Isolates domains too large for an ordinary fragment
//! - **Search** ([`search`]) - Time-bounded backtracking over cutpoints and overlaps
//! - **Bisection** ([`bisection`]) - Splits a subsection near its midpoint when search runs out of time
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for phase and subsection events
//! - **Error Handling** ([`error`]) - Engine and domain-source errors
//!
//! The pieces are combined by [`crate::workflows::fragment::run`].

pub mod bisection;
pub mod config;
pub mod cutpoint;
pub mod error;
pub mod long_domains;
pub mod progress;
pub mod search;
