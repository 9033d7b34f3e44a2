use sha2::{Digest, Sha256};

/// Compute the stable identity of a chunk from its relative file path and
/// raw text. The id changes if and only if either input changes, which is
/// what lets downstream vector stores re-ingest only what moved.
#[must_use]
pub fn chunk_id(file_path: &str, content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file_path.as_bytes());
    hasher.update(b"\n");
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Rough token estimate: ~4 characters per token for source code.
#[must_use]
pub fn estimate_tokens(content: &str) -> usize {
    content.len() / 4
}
