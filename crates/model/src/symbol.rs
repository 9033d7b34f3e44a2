use crate::chunk::Chunk;
use std::collections::HashMap;

/// Kind of a declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Function or method declaration.
    Function,
    /// Type declaration (struct, alias, ...).
    Type,
    /// Interface type declaration.
    Interface,
    /// Constant declaration.
    Const,
    /// Variable declaration.
    Var,
    /// Build-file instruction keyword.
    Instruction,
    /// Best-effort match from the generic chunker.
    Generic,
}

impl SymbolKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Const => "const",
            Self::Var => "var",
            Self::Instruction => "instruction",
            Self::Generic => "generic",
        }
    }
}

/// Location of a named declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDefinition {
    pub name: String,
    pub chunk_id: String,
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub kind: SymbolKind,
}

/// A usage of a name away from its definition site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReference {
    pub name: String,
    pub chunk_id: String,
    pub file_path: String,
    pub line: usize,
}

/// Process-wide aggregate of definitions, references, and the chunk
/// collection, built incrementally as files are processed.
///
/// One owned value is threaded `&mut` through phase 1 and read-only through
/// the relationship pass; chunks are kept in insertion order so output stays
/// deterministic across runs.
#[derive(Debug, Default)]
pub struct SymbolTable {
    definitions: HashMap<String, Vec<SymbolDefinition>>,
    references: HashMap<String, Vec<SymbolReference>>,
    chunks: Vec<Chunk>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a symbol definition.
    pub fn add_definition(&mut self, def: SymbolDefinition) {
        self.definitions.entry(def.name.clone()).or_default().push(def);
    }

    /// Record a symbol reference.
    pub fn add_reference(&mut self, reference: SymbolReference) {
        self.references
            .entry(reference.name.clone())
            .or_default()
            .push(reference);
    }

    /// Add a chunk to the collection. The first insertion wins when the same
    /// (path, text) pair is emitted twice.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        if self.index.contains_key(&chunk.id) {
            return;
        }
        self.index.insert(chunk.id.clone(), self.chunks.len());
        self.chunks.push(chunk);
    }

    #[must_use]
    pub fn get_chunk(&self, id: &str) -> Option<&Chunk> {
        self.index.get(id).map(|&i| &self.chunks[i])
    }

    /// All chunks, in insertion order.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[must_use]
    pub fn definitions(&self) -> &HashMap<String, Vec<SymbolDefinition>> {
        &self.definitions
    }

    #[must_use]
    pub fn references(&self) -> &HashMap<String, Vec<SymbolReference>> {
        &self.references
    }

    /// Definitions registered under `name`, possibly empty.
    #[must_use]
    pub fn definitions_of(&self, name: &str) -> &[SymbolDefinition] {
        self.definitions.get(name).map_or(&[], Vec::as_slice)
    }

    /// References registered under `name`, possibly empty.
    #[must_use]
    pub fn references_of(&self, name: &str) -> &[SymbolReference] {
        self.references.get(name).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Write a chunk's related-chunk list. Called exactly once per chunk by
    /// the relationship pass.
    pub fn set_related(&mut self, chunk_id: &str, related: Vec<String>) {
        if let Some(&i) = self.index.get(chunk_id) {
            self.chunks[i].related_chunks = related;
        }
    }

    /// Consume the table, yielding the ordered chunk collection.
    #[must_use]
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
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
