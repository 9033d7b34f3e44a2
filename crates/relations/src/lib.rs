//! # Shard Relations
//!
//! Second-pass relationship engine: given the completed [`SymbolTable`],
//! rank the chunks related to each chunk and write the result back as
//! `related_chunks`. Runs only after every file has been processed, since
//! the candidate rules need the full definition and reference maps.
//!
//! [`SymbolTable`]: shard_model::SymbolTable

mod engine;

pub use engine::{annotate, related_chunks, MAX_RELATED};
