use crate::id;
use serde::{Deserialize, Serialize};

/// A contiguous, semantically bounded span of one file's text.
///
/// The unit of retrieval indexing: downstream jobs embed `content` and key
/// the vector by `id`. Optional fields are omitted from serialized output
/// when empty, never emitted as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Stable content-addressed id: sha256 of (relative path, text).
    pub id: String,

    /// Path relative to the scanned root.
    pub file_path: String,

    /// Start line (1-indexed, inclusive).
    pub start_line: usize,

    /// End line (1-indexed, inclusive).
    pub end_line: usize,

    /// The raw chunk text.
    pub content: String,

    /// Detected language tag.
    pub language: String,

    /// Detected framework tag, when the classifier found one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub framework: Option<String>,

    /// Names declared in this chunk, in extraction order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub symbols: Vec<String>,

    /// Import identifiers the chunk's file declares.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub imports: Vec<String>,

    /// Ids of related chunks, strongest first. Empty until the
    /// relationship pass runs.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub related_chunks: Vec<String>,

    /// Approximate token count of `content`.
    #[serde(skip_serializing_if = "is_zero", default)]
    pub token_count: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Chunk {
    /// Create a chunk, deriving its id and token estimate from the
    /// (path, content) pair.
    #[must_use]
    pub fn new(
        file_path: impl Into<String>,
        start_line: usize,
        end_line: usize,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        let file_path = file_path.into();
        let content = content.into();
        let id = id::chunk_id(&file_path, &content);
        let token_count = id::estimate_tokens(&content);

        Self {
            id,
            file_path,
            start_line,
            end_line,
            content,
            language: language.into(),
            framework: None,
            symbols: Vec::new(),
            imports: Vec::new(),
            related_chunks: Vec::new(),
            token_count,
        }
    }

    /// Number of lines this chunk spans.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check whether a 1-based line falls inside this chunk's span.
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// The finished chunk collection handed to a formatter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkResult {
    pub chunks: Vec<Chunk>,
}

impl ChunkResult {
    #[must_use]
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
