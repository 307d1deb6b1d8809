//! # Core Models Module
//!
//! Value types describing a protein and the residue intervals attached to it.
//!
//! - [`domain`] - Inclusive residue intervals that must not be split, tagged with their origin
//! - [`fragment`] - Half-open residue intervals produced by fragmentation
//! - [`protein`] - The protein itself and the borrowed [`protein::ProteinSubsection`] view
//! - [`error`] - Construction and validation errors for the above
//!
//! All positions are 0-based residue indices. Domains are inclusive on both ends while
//! fragments use slicing semantics (`end` is one past the last included residue).
//!
//! ```ignore
//! use alphafragment::core::models::{domain::{Domain, DomainOrigin}, protein::Protein};
//!
//! let mut protein = Protein::new("Plp", "Q400N1", sequence)?;
//! protein.add_domain(Domain::new("manual_D1", 10, 120, DomainOrigin::Manual)?);
//! let whole = protein.full_view();
//! ```

pub mod domain;
pub mod error;
pub mod fragment;
pub mod protein;
