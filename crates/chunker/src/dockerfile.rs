use crate::config::ChunkingOptions;
use crate::error::Result;
use crate::linewise;
use once_cell::sync::Lazy;
use regex::Regex;
use shard_model::{Chunk, SymbolDefinition, SymbolKind, SymbolTable};

/// Instructions that open a logical section of a build file.
const MAJOR_INSTRUCTIONS: &[&str] = &[
    "FROM",
    "MAINTAINER",
    "RUN",
    "CMD",
    "LABEL",
    "EXPOSE",
    "ENV",
    "ADD",
    "COPY",
    "ENTRYPOINT",
    "VOLUME",
    "USER",
    "WORKDIR",
    "ARG",
    "ONBUILD",
    "STOPSIGNAL",
    "HEALTHCHECK",
    "SHELL",
];

static INSTRUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(FROM|RUN|CMD|LABEL|EXPOSE|ENV|ADD|COPY|ENTRYPOINT|VOLUME|USER|WORKDIR|ARG|ONBUILD|STOPSIGNAL|HEALTHCHECK|SHELL)\s+",
    )
    .expect("instruction pattern")
});

static STAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)FROM\s+\S+\s+AS\s+(\S+)").expect("stage pattern"));

/// Single forward scan over a Dockerfile: a new chunk opens before every
/// major instruction, with `max_chunk_size` as the hard cap for oversized
/// blocks (multi-line RUNs and the like).
#[derive(Debug, Default)]
pub struct DockerfileChunker;

impl DockerfileChunker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn content_type(&self) -> &'static str {
        "dockerfile"
    }

    pub(crate) fn can_handle(
        &self,
        _file_path: &str,
        language: &str,
        _framework: Option<&str>,
    ) -> bool {
        language == "dockerfile"
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

        for (i, line) in lines.iter().copied().enumerate() {
            let trimmed = line.trim();

            // Blank and comment lines opening a pending block stay with it.
            if current.is_empty() && (trimmed.is_empty() || trimmed.starts_with('#')) {
                current.push(line);
                continue;
            }

            if is_boundary(trimmed) && !current.is_empty() {
                chunks.push(self.emit(file_path, &current, start_line, i, table));
                current.clear();
                start_line = i + 1;
            }

            current.push(line);

            if current.len() >= max {
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
        let symbols = extract_instructions(&content);

        let mut chunk = Chunk::new(file_path, start_line, end_line, content, "dockerfile");
        chunk.symbols = symbols.clone();

        for name in symbols {
            table.add_definition(SymbolDefinition {
                name,
                chunk_id: chunk.id.clone(),
                file_path: file_path.to_string(),
                start_line,
                end_line,
                kind: SymbolKind::Instruction,
            });
        }

        chunk
    }
}

/// A boundary opens immediately before any major-instruction line.
/// Continuation lines of a multi-line instruction never match.
fn is_boundary(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    let upper = line.to_uppercase();
    MAJOR_INSTRUCTIONS
        .iter()
        .any(|instruction| upper.starts_with(&format!("{instruction} ")))
}

/// Instruction keywords and `stage:<name>` markers present in a chunk,
/// first occurrence wins.
fn extract_instructions(content: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();

    for captures in INSTRUCTION.captures_iter(content) {
        let name = captures[1].to_string();
        if !symbols.contains(&name) {
            symbols.push(name);
        }
    }

    for captures in STAGE.captures_iter(content) {
        let name = format!("stage:{}", &captures[1]);
        if !symbols.contains(&name) {
            symbols.push(name);
        }
    }

    symbols
}
