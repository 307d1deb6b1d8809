//! # Core Module
//!
//! Stateless building blocks for domain-aware protein fragmentation.
//!
//! - **Models** ([`models`]) - Domains, fragments, proteins and subsection views
//! - **Domain Identification** ([`domains`]) - Turning predicted aligned error matrices into
//!   domains, threshold presets, and merging overlapping domain sets
//! - **File I/O** ([`io`]) - PAE JSON files, manually specified domains and protein tables
//!
//! Nothing in this module searches for fragments; that lives in [`crate::engine`].

pub mod domains;
pub mod io;
pub mod models;
