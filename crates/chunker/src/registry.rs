use crate::config::ChunkingOptions;
use crate::dockerfile::DockerfileChunker;
use crate::error::Result;
use crate::generic::GenericChunker;
use crate::go::GoChunker;
use crate::shell::ShellChunker;
use shard_model::{Chunk, SymbolTable};

/// A content-type chunker. The set is closed: supporting a new content type
/// means appending one variant and its module, never touching the others.
#[derive(Debug)]
pub enum FileChunker {
    Go(GoChunker),
    Shell(ShellChunker),
    Dockerfile(DockerfileChunker),
    Generic(GenericChunker),
}

impl FileChunker {
    /// The content type this chunker handles.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Go(c) => c.content_type(),
            Self::Shell(c) => c.content_type(),
            Self::Dockerfile(c) => c.content_type(),
            Self::Generic(c) => c.content_type(),
        }
    }

    /// Pure selection predicate over the (path, language, framework) triple.
    #[must_use]
    pub fn can_handle(&self, file_path: &str, language: &str, framework: Option<&str>) -> bool {
        match self {
            Self::Go(c) => c.can_handle(file_path, language, framework),
            Self::Shell(c) => c.can_handle(file_path, language, framework),
            Self::Dockerfile(c) => c.can_handle(file_path, language, framework),
            Self::Generic(c) => c.can_handle(file_path, language, framework),
        }
    }

    /// Split `content` into chunks, registering definitions and references
    /// in `table`. Deterministic for identical inputs; malformed input
    /// degrades rather than failing.
    pub fn chunk(
        &self,
        file_path: &str,
        content: &str,
        table: &mut SymbolTable,
        options: &ChunkingOptions,
    ) -> Result<Vec<Chunk>> {
        match self {
            Self::Go(c) => c.chunk(file_path, content, table, options),
            Self::Shell(c) => c.chunk(file_path, content, table, options),
            Self::Dockerfile(c) => c.chunk(file_path, content, table, options),
            Self::Generic(c) => c.chunk(file_path, content, table, options),
        }
    }
}

/// Ordered chunker dispatch: the first registered chunker whose predicate
/// matches claims the file, and the generic line-window chunker backstops
/// everything else.
#[derive(Debug)]
pub struct ChunkerRegistry {
    chunkers: Vec<FileChunker>,
}

impl ChunkerRegistry {
    /// An empty registry. Files dispatched through it all fall back to the
    /// generic chunker.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            chunkers: Vec::new(),
        }
    }

    /// Append a chunker. Registration order is dispatch order.
    pub fn register(&mut self, chunker: FileChunker) {
        self.chunkers.push(chunker);
    }

    /// First registered chunker whose predicate matches.
    #[must_use]
    pub fn find(
        &self,
        file_path: &str,
        language: &str,
        framework: Option<&str>,
    ) -> Option<&FileChunker> {
        self.chunkers
            .iter()
            .find(|c| c.can_handle(file_path, language, framework))
    }

    /// Dispatch one file: the matching chunker, or the generic fallback
    /// when nothing claims it.
    pub fn chunk(
        &self,
        file_path: &str,
        content: &str,
        language: &str,
        framework: Option<&str>,
        table: &mut SymbolTable,
        options: &ChunkingOptions,
    ) -> Result<Vec<Chunk>> {
        match self.find(file_path, language, framework) {
            Some(chunker) => chunker.chunk(file_path, content, table, options),
            None => GenericChunker::new().chunk(file_path, content, table, options),
        }
    }
}

impl Default for ChunkerRegistry {
    /// The standard dispatch order: Go, shell, Dockerfile, then the
    /// catch-all generic chunker.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(FileChunker::Go(GoChunker::new()));
        registry.register(FileChunker::Shell(ShellChunker::new()));
        registry.register(FileChunker::Dockerfile(DockerfileChunker::new()));
        registry.register(FileChunker::Generic(GenericChunker::new()));
        registry
    }
}
