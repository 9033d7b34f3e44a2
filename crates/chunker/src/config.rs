use serde::{Deserialize, Serialize};

/// Configuration passed unchanged to every chunker invocation.
///
/// Sizes are in lines. `max_chunk_size` bounds how large an unstructured
/// block may grow before being forcibly flushed. `min_chunk_size` is part
/// of the public surface but no chunker consults it when deciding to flush;
/// it is carried for callers that post-filter tiny chunks themselves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkingOptions {
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            min_chunk_size: 5,
            max_chunk_size: 200,
        }
    }
}

impl ChunkingOptions {
    #[must_use]
    pub const fn new(min_chunk_size: usize, max_chunk_size: usize) -> Self {
        Self {
            min_chunk_size,
            max_chunk_size,
        }
    }

    /// Validate the option pair.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be > 0".to_string());
        }
        if self.min_chunk_size > self.max_chunk_size {
            return Err(format!(
                "min_chunk_size ({}) cannot exceed max_chunk_size ({})",
                self.min_chunk_size, self.max_chunk_size
            ));
        }
        Ok(())
    }
}
