use crate::config::ChunkingOptions;
use crate::error::Result;
use crate::linewise;
use once_cell::sync::Lazy;
use regex::Regex;
use shard_model::{Chunk, SymbolDefinition, SymbolKind, SymbolTable};
use std::path::Path;

static DECLARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(function|func|def|method|void|int|string|bool|class|struct|interface)\s+(\w+)")
        .expect("declarator pattern")
});

/// Line-window fallback for files no specialized chunker claims.
/// Always succeeds; symbol extraction is best-effort.
#[derive(Debug, Default)]
pub struct GenericChunker;

impl GenericChunker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn content_type(&self) -> &'static str {
        "generic"
    }

    pub(crate) fn can_handle(
        &self,
        _file_path: &str,
        _language: &str,
        _framework: Option<&str>,
    ) -> bool {
        true
    }

    pub(crate) fn chunk(
        &self,
        file_path: &str,
        content: &str,
        table: &mut SymbolTable,
        options: &ChunkingOptions,
    ) -> Result<Vec<Chunk>> {
        let language = Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string();

        let mut chunks =
            linewise::window_chunks(file_path, content, &language, options.max_chunk_size);

        for chunk in &mut chunks {
            let symbols = extract_generic_symbols(&chunk.content);
            chunk.symbols = symbols.clone();

            for name in symbols {
                table.add_definition(SymbolDefinition {
                    name,
                    chunk_id: chunk.id.clone(),
                    file_path: file_path.to_string(),
                    start_line: chunk.start_line,
                    end_line: chunk.end_line,
                    kind: SymbolKind::Generic,
                });
            }
        }

        Ok(chunks)
    }
}

/// Cross-language declarator followed by an identifier, first occurrence
/// wins. Deliberately shallow.
fn extract_generic_symbols(content: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();

    for captures in DECLARATOR.captures_iter(content) {
        let name = captures[2].to_string();
        if !symbols.contains(&name) {
            symbols.push(name);
        }
    }

    symbols
}
