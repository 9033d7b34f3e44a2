//! # Shard Indexer
//!
//! The two-phase pipeline tying the pieces together.
//!
//! ```text
//! Directory
//!     │
//!     ├──> File Scanner (.gitignore aware, sorted)
//!     │      └─> candidate files
//!     │
//!     ├──> Phase 1: classify -> dispatch -> chunk
//!     │      └─> chunks + symbol table
//!     │
//!     └──> Phase 2: relationship pass
//!            └─> annotated ChunkResult
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use shard_chunker::ChunkingOptions;
//! use shard_indexer::Indexer;
//!
//! fn main() -> shard_indexer::Result<()> {
//!     let indexer = Indexer::new(ChunkingOptions::default());
//!     let result = indexer.run("/path/to/project")?;
//!     println!("{} chunks", result.len());
//!     Ok(())
//! }
//! ```

mod error;
mod pipeline;
mod scanner;

pub use error::{IndexError, Result};
pub use pipeline::Indexer;
pub use scanner::FileScanner;
