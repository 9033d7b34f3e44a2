use shard_model::Chunk;

/// Split content the way the pattern-based chunkers enumerate lines: every
/// `\n` is a separator, so a trailing newline yields a final empty line.
/// Partition coverage is judged against this enumeration.
pub(crate) fn split_lines(content: &str) -> Vec<&str> {
    content.split('\n').collect()
}

/// Number of lines under the same enumeration.
pub(crate) fn count_lines(content: &str) -> usize {
    content.split('\n').count()
}

/// Fixed, non-overlapping windows of at most `max_lines` lines. Always
/// succeeds; used directly by the generic chunker and as the degraded mode
/// of the structurally-aware one.
pub(crate) fn window_chunks(
    file_path: &str,
    content: &str,
    language: &str,
    max_lines: usize,
) -> Vec<Chunk> {
    let max_lines = max_lines.max(1);
    let lines = split_lines(content);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < lines.len() {
        let end = (start + max_lines).min(lines.len());
        let text = lines[start..end].join("\n");
        chunks.push(Chunk::new(file_path, start + 1, end, text, language));
        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trailing_newline_counts_as_final_empty_line() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn windows_partition_exactly() {
        let content = (1..=21).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let chunks = window_chunks("f.txt", &content, "text", 10);

        assert_eq!(chunks.len(), 3);
        assert_eq!((chunks[0].start_line, chunks[0].end_line), (1, 10));
        assert_eq!((chunks[1].start_line, chunks[1].end_line), (11, 20));
        assert_eq!((chunks[2].start_line, chunks[2].end_line), (21, 21));
    }

    #[test]
    fn single_window_when_short() {
        let chunks = window_chunks("f.txt", "a\nb", "text", 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "a\nb");
    }
}
