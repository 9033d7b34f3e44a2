use crate::config::ChunkingOptions;
use crate::error::Result;
use crate::linewise;
use once_cell::sync::Lazy;
use regex::Regex;
use shard_model::{Chunk, SymbolDefinition, SymbolKind, SymbolTable};

static BARE_FUNC_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\w+\s*\(\s*\)\s*\{").expect("bare function pattern"));

static FUNC_KEYWORD_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s+(\w+)\s*\(\s*\)").expect("function() pattern"));
static FUNC_KEYWORD_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s+(\w+)\s*\{").expect("function{ pattern"));
static BARE_FUNC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w+)\s*\(\s*\)\s*\{").expect("name() pattern"));

/// Two-state chunker for shell scripts: function bodies become chunks of
/// their own, everything between them accumulates into blocks bounded by
/// `max_chunk_size`.
#[derive(Debug, Default)]
pub struct ShellChunker;

impl ShellChunker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn content_type(&self) -> &'static str {
        "shell"
    }

    pub(crate) fn can_handle(
        &self,
        _file_path: &str,
        language: &str,
        _framework: Option<&str>,
    ) -> bool {
        matches!(language, "shell" | "bash" | "zsh")
    }

    pub(crate) fn chunk(
        &self,
        file_path: &str,
        content: &str,
        table: &mut SymbolTable,
        options: &ChunkingOptions,
    ) -> Result<Vec<Chunk>> {
        let lines = linewise::split_lines(content);
        let max = options.max_chunk_size.max(1);

        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut start_line = 1;
        let mut in_function = false;

        for (i, line) in lines.iter().copied().enumerate() {
            let trimmed = line.trim();

            if !in_function && is_function_start(trimmed) {
                if !current.is_empty() {
                    chunks.push(self.emit(file_path, &current, start_line, i, table));
                    current.clear();
                }
                in_function = true;
                start_line = i + 1;
            }

            // A line that is exactly `}` (or `}` plus a trailing comment)
            // closes the function, inclusive of that line.
            if in_function && (trimmed == "}" || trimmed.starts_with("} #")) {
                current.push(line);
                chunks.push(self.emit(file_path, &current, start_line, i + 1, table));
                current.clear();
                in_function = false;
                start_line = i + 2;
                continue;
            }

            current.push(line);

            if !in_function && current.len() >= max {
                chunks.push(self.emit(file_path, &current, start_line, i + 1, table));
                current.clear();
                start_line = i + 2;
            }
        }

        if !current.is_empty() {
            chunks.push(self.emit(file_path, &current, start_line, lines.len(), table));
        }

        Ok(chunks)
    }

    fn emit(
        &self,
        file_path: &str,
        lines: &[&str],
        start_line: usize,
        end_line: usize,
        table: &mut SymbolTable,
    ) -> Chunk {
        let content = lines.join("\n");
        let symbols = extract_functions(&content);

        let mut chunk = Chunk::new(file_path, start_line, end_line, content, "shell");
        chunk.symbols = symbols.clone();

        for name in symbols {
            table.add_definition(SymbolDefinition {
                name,
                chunk_id: chunk.id.clone(),
                file_path: file_path.to_string(),
                start_line,
                end_line,
                kind: SymbolKind::Function,
            });
        }

        chunk
    }
}

/// Recognize `function name() {`, `function name {`, and bare `name() {`.
fn is_function_start(line: &str) -> bool {
    if line.starts_with("function ") && (line.contains("()") || line.ends_with('{')) {
        return true;
    }
    BARE_FUNC_START.is_match(line)
}

/// Pull function names out of a chunk's text, first occurrence wins.
fn extract_functions(content: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();

    for pattern in [&FUNC_KEYWORD_PARENS, &FUNC_KEYWORD_BRACE, &BARE_FUNC] {
        for captures in pattern.captures_iter(content) {
            let name = captures[1].to_string();
            if !symbols.contains(&name) {
                symbols.push(name);
            }
        }
    }

    symbols
}
