//! Reading and writing the files that surround fragmentation.
//!
//! PAE matrices arrive as JSON (either the AlphaFold database download layout or a
//! locally produced file), manually specified domains arrive as list literals inside a
//! protein table, and the protein table itself is CSV in both directions.

pub mod manual;
pub mod pae;
pub mod table;
