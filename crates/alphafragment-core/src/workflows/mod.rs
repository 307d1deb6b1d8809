//! # Workflows Module
//!
//! Top-level entry points that combine the models, domain sources and planner.
//!
//! - **Domain Compilation** ([`domains`]) - Collects domains from a PAE matrix and manual input
//! - **Fragmentation** ([`fragment`]) - Long-domain isolation, per-subsection search with length
//!   widening and bisection, and the final sorted fragment list

pub mod domains;
pub mod fragment;
