//! # Domain Identification Module
//!
//! Produces the domain intervals that fragmentation must respect.
//!
//! - [`finder`] - Groups residues into domains from a predicted aligned error (PAE) matrix
//! - [`thresholds`] - The `cautious` and `definite` presets plus custom threshold triples
//! - [`merge`] - Collapses overlapping domain sets into a non-overlapping working list
//! - [`error`] - Validation errors for matrices and threshold profiles

pub mod error;
pub mod finder;
pub mod merge;
pub mod thresholds;
