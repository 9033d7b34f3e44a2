//! # Shard Detect
//!
//! File classification consulted once per file before chunker dispatch:
//! language tag, optional framework tag, and a binary-extension predicate.
//! Pure functions over (path, content); no filesystem access.

mod binary;
mod framework;
mod language;

pub use binary::is_binary_path;
pub use framework::detect_framework;
pub use language::detect_language;
