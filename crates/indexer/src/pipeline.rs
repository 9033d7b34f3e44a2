use crate::error::{IndexError, Result};
use crate::scanner::FileScanner;
use shard_chunker::{ChunkerRegistry, ChunkingOptions};
use shard_model::{ChunkResult, SymbolTable};
use std::fs;
use std::path::Path;

/// Two-phase batch run over a source tree.
///
/// Phase 1 walks the files sequentially, dispatching each to a chunker that
/// emits chunks and populates the shared [`SymbolTable`]. Phase 2 starts
/// only once phase 1 has seen every file, since the relationship pass needs
/// the complete table. Per-file failures are logged and skipped; the run
/// never retries a file.
pub struct Indexer {
    registry: ChunkerRegistry,
    options: ChunkingOptions,
}

impl Indexer {
    #[must_use]
    pub fn new(options: ChunkingOptions) -> Self {
        Self {
            registry: ChunkerRegistry::default(),
            options,
        }
    }

    /// Use a custom chunker registry instead of the standard set.
    #[must_use]
    pub fn with_registry(registry: ChunkerRegistry, options: ChunkingOptions) -> Self {
        Self { registry, options }
    }

    /// Run the full pipeline and return the annotated chunk collection,
    /// ordered by scan order.
    pub fn run(&self, root: impl AsRef<Path>) -> Result<ChunkResult> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(IndexError::InvalidRoot(root.display().to_string()));
        }

        let files = FileScanner::new(root).scan();
        let mut table = SymbolTable::new();

        for path in &files {
            self.process_file(root, path, &mut table);
        }

        shard_relations::annotate(&mut table);

        log::info!("{} chunks from {} files", table.len(), files.len());
        Ok(ChunkResult::new(table.into_chunks()))
    }

    fn process_file(&self, root: &Path, path: &Path, table: &mut SymbolTable) {
        if shard_detect::is_binary_path(path) {
            log::debug!("skipping binary file {}", path.display());
            return;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative = relative.to_string_lossy();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("skipping unreadable file {}: {e}", path.display());
                return;
            }
        };

        let language = shard_detect::detect_language(&relative, content.as_bytes());
        let framework = shard_detect::detect_framework(&relative, &content, language);

        match self.registry.chunk(
            &relative,
            &content,
            language,
            framework,
            table,
            &self.options,
        ) {
            Ok(chunks) => {
                for mut chunk in chunks {
                    if chunk.framework.is_none() {
                        chunk.framework = framework.map(str::to_string);
                    }
                    table.insert_chunk(chunk);
                }
            }
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(ChunkingOptions::default())
    }
}
