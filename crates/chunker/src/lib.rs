//! # Shard Chunker
//!
//! Boundary detection for the chunking pipeline: one chunker per
//! structurally-aware content type plus a line-window fallback, dispatched
//! through an ordered registry.
//!
//! ```text
//! (path, language, framework)
//!         │
//!         ├──> ChunkerRegistry ── first matching predicate
//!         │        ├─> GoChunker          (tree-sitter syntax tree)
//!         │        ├─> ShellChunker       (two-state line machine)
//!         │        ├─> DockerfileChunker  (instruction boundaries)
//!         │        └─> GenericChunker     (fixed line windows)
//!         │
//!         └──> Vec<Chunk> + definitions/references into the SymbolTable
//! ```
//!
//! Every chunker is deterministic for identical inputs and degrades on
//! malformed input instead of failing the run.

mod config;
mod dockerfile;
mod error;
mod generic;
mod go;
mod linewise;
mod registry;
mod shell;

pub use config::ChunkingOptions;
pub use dockerfile::DockerfileChunker;
pub use error::{ChunkError, Result};
pub use generic::GenericChunker;
pub use go::GoChunker;
pub use registry::{ChunkerRegistry, FileChunker};
pub use shell::ShellChunker;
