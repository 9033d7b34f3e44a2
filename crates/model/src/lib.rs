//! # Shard Model
//!
//! Core data model for the chunking pipeline: the [`Chunk`] record with its
//! content-addressed identity, the symbol aggregate ([`SymbolTable`]) built
//! while files are processed, and the [`RelationStrength`] ordering used to
//! rank cross-chunk relationships.
//!
//! Everything here is plain data. Chunkers populate it during the single
//! walk over the source tree; the relationship pass reads it back once the
//! walk is complete.

mod chunk;
mod id;
mod relation;
mod symbol;

pub use chunk::{Chunk, ChunkResult};
pub use id::{chunk_id, estimate_tokens};
pub use relation::RelationStrength;
pub use symbol::{SymbolDefinition, SymbolKind, SymbolReference, SymbolTable};
