use shard_model::ChunkResult;
use std::io::Write;
use thiserror::Error;

/// Errors from writing the chunk collection. Always fatal to the run.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Output formatter for the finished chunk collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// A single `{"chunks": [...]}` document.
    Json { pretty: bool },
    /// One chunk object per line.
    JsonLines,
}

impl Formatter {
    /// Write the whole collection to `writer`.
    pub fn write(&self, writer: &mut dyn Write, result: &ChunkResult) -> Result<(), FormatError> {
        match self {
            Self::Json { pretty: true } => {
                serde_json::to_writer_pretty(&mut *writer, result)?;
                writer.write_all(b"\n")?;
            }
            Self::Json { pretty: false } => {
                serde_json::to_writer(&mut *writer, result)?;
                writer.write_all(b"\n")?;
            }
            Self::JsonLines => {
                for chunk in &result.chunks {
                    serde_json::to_writer(&mut *writer, chunk)?;
                    writer.write_all(b"\n")?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shard_model::Chunk;

    fn sample() -> ChunkResult {
        let mut a = Chunk::new("main.go", 1, 3, "package main", "go");
        a.symbols.push("main".to_string());
        let b = Chunk::new("run.sh", 1, 1, "echo hi", "shell");
        ChunkResult::new(vec![a, b])
    }

    #[test]
    fn json_wraps_chunks_in_a_document() {
        let mut out = Vec::new();
        Formatter::Json { pretty: false }
            .write(&mut out, &sample())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\"chunks\":["));
        assert!(text.ends_with("\n"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["chunks"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn jsonl_emits_one_object_per_line() {
        let mut out = Vec::new();
        Formatter::JsonLines.write(&mut out, &sample()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.trim_end().split('\n').collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(parsed["id"].is_string());
        }
    }

    #[test]
    fn write_failures_surface_as_errors() {
        struct Failing;
        impl Write for Failing {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut failing = Failing;
        let result = Formatter::JsonLines.write(&mut failing, &sample());
        assert!(result.is_err());
    }
}
