use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur while chunking a file.
///
/// Malformed input is never an error: structurally-aware chunkers degrade
/// to line windows instead. What remains is environment-level failure.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// The embedded grammar could not be loaded into the parser.
    #[error("parser setup failed: {0}")]
    Parser(String),
}

impl ChunkError {
    pub fn parser(msg: impl Into<String>) -> Self {
        Self::Parser(msg.into())
    }
}
