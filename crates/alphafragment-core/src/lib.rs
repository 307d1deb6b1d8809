//! # AlphaFragment Core Library
//!
//! Domain-aware fragmentation of protein sequences for structure prediction. Long
//! sequences are cut into overlapping fragments of bounded length without ever cutting
//! through a domain, where domains come from predicted aligned error (PAE) matrices or
//! manual input.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Protein`, `Domain`, `Fragment`),
//!   domain identification from PAE matrices, and file I/O for PAE JSON files and protein
//!   tables.
//!
//! - **[`engine`]: The Planner.** Cutpoint validation, long-domain isolation, the
//!   time-bounded backtracking search and its bisection fallback.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together: compiling a
//!   protein's domains from all enabled sources and fragmenting a whole protein.

pub mod core;
pub mod engine;
pub mod workflows;
