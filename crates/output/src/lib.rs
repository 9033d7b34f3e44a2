//! # Shard Output
//!
//! Serialization of the finished chunk collection. Nothing is written
//! before the run completes, so a formatter failure aborts with no partial
//! file left behind.

mod formatter;

pub use formatter::{FormatError, Formatter};
