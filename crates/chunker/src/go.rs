use crate::config::ChunkingOptions;
use crate::error::{ChunkError, Result};
use crate::linewise;
use shard_model::{Chunk, SymbolDefinition, SymbolKind, SymbolReference, SymbolTable};
use tree_sitter::{Node, Parser};

/// Structurally-aware chunker for Go sources, backed by the tree-sitter
/// grammar.
///
/// Emits one whole-file chunk (the package-level chunk) alongside one chunk
/// per top-level declaration, so chunks of a Go file overlap by design. A
/// second traversal of the same tree records symbol references for the
/// relationship pass.
#[derive(Debug, Default)]
pub struct GoChunker;

impl GoChunker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn content_type(&self) -> &'static str {
        "go"
    }

    pub(crate) fn can_handle(
        &self,
        _file_path: &str,
        language: &str,
        _framework: Option<&str>,
    ) -> bool {
        language == "go"
    }

    pub(crate) fn chunk(
        &self,
        file_path: &str,
        content: &str,
        table: &mut SymbolTable,
        options: &ChunkingOptions,
    ) -> Result<Vec<Chunk>> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ChunkError::parser(format!("loading Go grammar: {e}")))?;

        let Some(tree) = parser.parse(content, None) else {
            return Ok(degrade(file_path, content, options));
        };
        let root = tree.root_node();
        if root.has_error() {
            log::debug!("parse failed for {file_path}, falling back to line windows");
            return Ok(degrade(file_path, content, options));
        }

        let package = package_name(root, content);
        let imports = extract_imports(root, content);

        let mut chunks = Vec::new();

        // (a) the package-level chunk spanning the whole file
        let mut file_chunk = Chunk::new(
            file_path,
            1,
            linewise::count_lines(content),
            content,
            "go",
        );
        if let Some(pkg) = &package {
            file_chunk.symbols.push(pkg.clone());
        }
        file_chunk.imports = imports.clone();
        chunks.push(file_chunk);

        // (b) one chunk per top-level function or method
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            if matches!(node.kind(), "function_declaration" | "method_declaration") {
                if let Some(chunk) = self.function_chunk(file_path, content, node, &imports, table)
                {
                    chunks.push(chunk);
                }
            }
        }

        // (c) one chunk per type/const/var declaration group
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            if matches!(
                node.kind(),
                "type_declaration" | "const_declaration" | "var_declaration"
            ) {
                if let Some(chunk) =
                    self.declaration_chunk(file_path, content, node, &imports, table)
                {
                    chunks.push(chunk);
                }
            }
        }

        // (d) the import block
        if let Some(chunk) = self.imports_chunk(file_path, content, root) {
            chunks.push(chunk);
        }

        self.collect_references(file_path, content, root, &chunks, table);

        Ok(chunks)
    }

    /// Chunk a `function_declaration` or `method_declaration`. Methods are
    /// registered as `Receiver.Name` and additionally reference their
    /// receiver's base type, seeding the method-type relation.
    fn function_chunk(
        &self,
        file_path: &str,
        content: &str,
        node: Node<'_>,
        imports: &[String],
        table: &mut SymbolTable,
    ) -> Option<Chunk> {
        let name = node_text(node.child_by_field_name("name")?, content);
        let receiver = receiver_base_type(node, content);

        let symbol = match receiver {
            Some(base) => format!("{base}.{name}"),
            None => name.to_string(),
        };

        let (start_line, end_line) = node_lines(node);
        let mut chunk = Chunk::new(
            file_path,
            start_line,
            end_line,
            node_text(node, content),
            "go",
        );
        chunk.symbols.push(symbol.clone());
        chunk.imports = imports.to_vec();

        table.add_definition(SymbolDefinition {
            name: symbol,
            chunk_id: chunk.id.clone(),
            file_path: file_path.to_string(),
            start_line,
            end_line,
            kind: SymbolKind::Function,
        });

        if let Some(base) = receiver {
            table.add_reference(SymbolReference {
                name: base.to_string(),
                chunk_id: chunk.id.clone(),
                file_path: file_path.to_string(),
                line: start_line,
            });
        }

        Some(chunk)
    }

    /// Chunk a grouped `type`/`const`/`var` declaration. Every introduced
    /// name registers a definition; interface types get their own kind so
    /// the implementer heuristic can key on it.
    fn declaration_chunk(
        &self,
        file_path: &str,
        content: &str,
        node: Node<'_>,
        imports: &[String],
        table: &mut SymbolTable,
    ) -> Option<Chunk> {
        let mut names: Vec<(String, SymbolKind)> = Vec::new();

        let mut cursor = node.walk();
        match node.kind() {
            "type_declaration" => {
                for spec in node.named_children(&mut cursor) {
                    if !matches!(spec.kind(), "type_spec" | "type_alias") {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let kind = if spec
                        .child_by_field_name("type")
                        .is_some_and(|t| t.kind() == "interface_type")
                    {
                        SymbolKind::Interface
                    } else {
                        SymbolKind::Type
                    };
                    names.push((node_text(name, content).to_string(), kind));
                }
            }
            "const_declaration" | "var_declaration" => {
                let kind = if node.kind() == "const_declaration" {
                    SymbolKind::Const
                } else {
                    SymbolKind::Var
                };
                for spec in node.named_children(&mut cursor) {
                    if !matches!(spec.kind(), "const_spec" | "var_spec") {
                        continue;
                    }
                    let mut name_cursor = spec.walk();
                    for name in spec.children_by_field_name("name", &mut name_cursor) {
                        names.push((node_text(name, content).to_string(), kind));
                    }
                }
            }
            _ => {}
        }

        if names.is_empty() {
            return None;
        }

        let (start_line, end_line) = node_lines(node);
        let mut chunk = Chunk::new(
            file_path,
            start_line,
            end_line,
            node_text(node, content),
            "go",
        );
        chunk.symbols = names.iter().map(|(name, _)| name.clone()).collect();
        chunk.imports = imports.to_vec();

        for (name, kind) in names {
            table.add_definition(SymbolDefinition {
                name,
                chunk_id: chunk.id.clone(),
                file_path: file_path.to_string(),
                start_line,
                end_line,
                kind,
            });
        }

        Some(chunk)
    }

    /// Chunk the first import block, if any.
    fn imports_chunk(&self, file_path: &str, content: &str, root: Node<'_>) -> Option<Chunk> {
        let mut cursor = root.walk();
        let node = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "import_declaration")?;

        let (start_line, end_line) = node_lines(node);
        let mut chunk = Chunk::new(
            file_path,
            start_line,
            end_line,
            node_text(node, content),
            "go",
        );
        chunk.symbols.push("imports".to_string());
        Some(chunk)
    }

    /// Second traversal: attribute every identifier that names a known
    /// symbol to the chunk containing its line. Declaration chunks are
    /// consulted before the whole-file chunk so the overlap resolves to the
    /// tightest range; uses inside a chunk that defines the name are the
    /// definition site and are not references.
    fn collect_references(
        &self,
        file_path: &str,
        content: &str,
        root: Node<'_>,
        chunks: &[Chunk],
        table: &mut SymbolTable,
    ) {
        let mut lookup: Vec<&Chunk> = chunks[1..].iter().collect();
        lookup.push(&chunks[0]);

        let mut identifiers = Vec::new();
        visit_identifiers(root, content, &mut identifiers);

        for (name, line) in identifiers {
            if is_reserved_word(name) || is_builtin_type(name) || !table.is_defined(name) {
                continue;
            }
            let Some(containing) = lookup.iter().find(|c| c.contains_line(line)) else {
                continue;
            };
            if containing.symbols.iter().any(|s| s == name) {
                continue;
            }
            table.add_reference(SymbolReference {
                name: name.to_string(),
                chunk_id: containing.id.clone(),
                file_path: file_path.to_string(),
                line,
            });
        }
    }
}

/// Line-window degradation for files the grammar rejects: no symbols, no
/// references, the run continues.
fn degrade(file_path: &str, content: &str, options: &ChunkingOptions) -> Vec<Chunk> {
    linewise::window_chunks(file_path, content, "go", options.max_chunk_size)
}

fn node_text<'a>(node: Node<'_>, content: &'a str) -> &'a str {
    &content[node.byte_range()]
}

fn node_lines(node: Node<'_>) -> (usize, usize) {
    (
        node.start_position().row + 1,
        node.end_position().row + 1,
    )
}

fn package_name(root: Node<'_>, content: &str) -> Option<String> {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_clause")?;

    let mut inner = clause.walk();
    let name = clause
        .named_children(&mut inner)
        .find(|n| n.kind() == "package_identifier")
        .map(|n| node_text(n, content).to_string());
    name
}

/// All import paths in the file, quotes stripped, in source order.
fn extract_imports(root: Node<'_>, content: &str) -> Vec<String> {
    let mut imports = Vec::new();

    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        if node.kind() == "import_declaration" {
            collect_import_paths(node, content, &mut imports);
        }
    }

    imports
}

fn collect_import_paths(node: Node<'_>, content: &str, out: &mut Vec<String>) {
    if matches!(
        node.kind(),
        "interpreted_string_literal" | "raw_string_literal"
    ) {
        let path = node_text(node, content)
            .trim_matches(|c| c == '"' || c == '`')
            .to_string();
        if !path.is_empty() {
            out.push(path);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_import_paths(child, content, out);
    }
}

/// Base type of a method receiver, with one layer of pointer indirection
/// stripped: `(p *Person)` and `(p Person)` both yield `Person`.
fn receiver_base_type<'a>(method: Node<'_>, content: &'a str) -> Option<&'a str> {
    let receiver = method.child_by_field_name("receiver")?;

    let mut cursor = receiver.walk();
    for param in receiver.named_children(&mut cursor) {
        if param.kind() != "parameter_declaration" {
            continue;
        }
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let base = if ty.kind() == "pointer_type" {
            ty.named_child(0)?
        } else {
            ty
        };
        if base.kind() == "type_identifier" {
            return Some(node_text(base, content));
        }
    }

    None
}

fn visit_identifiers<'a>(node: Node<'_>, content: &'a str, out: &mut Vec<(&'a str, usize)>) {
    if matches!(
        node.kind(),
        "identifier" | "type_identifier" | "field_identifier"
    ) {
        out.push((node_text(node, content), node.start_position().row + 1));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_identifiers(child, content, out);
    }
}

fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "break"
            | "case"
            | "chan"
            | "const"
            | "continue"
            | "default"
            | "defer"
            | "else"
            | "fallthrough"
            | "for"
            | "func"
            | "go"
            | "goto"
            | "if"
            | "import"
            | "interface"
            | "map"
            | "package"
            | "range"
            | "return"
            | "select"
            | "struct"
            | "switch"
            | "type"
            | "var"
    )
}

fn is_builtin_type(name: &str) -> bool {
    matches!(
        name,
        "bool"
            | "byte"
            | "complex64"
            | "complex128"
            | "error"
            | "float32"
            | "float64"
            | "int"
            | "int8"
            | "int16"
            | "int32"
            | "int64"
            | "rune"
            | "string"
            | "uint"
            | "uint8"
            | "uint16"
            | "uint32"
            | "uint64"
            | "uintptr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = r#"package greeting

import (
	"fmt"
)

// Simple function
func HelloWorld() string {
	return "Hello, World!"
}

// Struct definition
type Person struct {
	Name string
	Age  int
}

// Method definition
func (p *Person) Greet() string {
	return fmt.Sprintf("Hello, my name is %s", p.Name)
}
"#;

    fn chunk(content: &str) -> (Vec<Chunk>, SymbolTable) {
        let chunker = GoChunker::new();
        let mut table = SymbolTable::new();
        let options = ChunkingOptions::default();
        let chunks = chunker
            .chunk("greeting.go", content, &mut table, &options)
            .unwrap();
        (chunks, table)
    }

    #[test]
    fn whole_file_chunk_comes_first_and_spans_everything() {
        let (chunks, _) = chunk(SOURCE);

        let file_chunk = &chunks[0];
        assert_eq!(file_chunk.start_line, 1);
        assert_eq!(file_chunk.end_line, linewise::count_lines(SOURCE));
        assert_eq!(file_chunk.symbols, vec!["greeting"]);
        assert_eq!(file_chunk.imports, vec!["fmt"]);

        for decl in &chunks[1..] {
            assert!(decl.start_line >= file_chunk.start_line);
            assert!(decl.end_line <= file_chunk.end_line);
        }
    }

    #[test]
    fn declarations_become_chunks_with_symbols() {
        let (chunks, _) = chunk(SOURCE);
        assert!(chunks.len() >= 4);

        let symbols: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.symbols.iter().map(String::as_str))
            .collect();
        assert!(symbols.contains(&"HelloWorld"));
        assert!(symbols.contains(&"Person"));
        assert!(symbols.contains(&"Person.Greet"));
        assert!(symbols.contains(&"imports"));
    }

    #[test]
    fn method_symbol_strips_pointer_receiver() {
        let (_, table) = chunk(SOURCE);
        let defs = table.definitions_of("Person.Greet");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind, SymbolKind::Function);
    }

    #[test]
    fn value_receiver_is_also_resolved() {
        let source = "package p\n\ntype Counter int\n\nfunc (c Counter) Add() {}\n";
        let (_, table) = chunk(source);
        assert_eq!(table.definitions_of("Counter.Add").len(), 1);
    }

    #[test]
    fn method_references_its_receiver_type() {
        let (chunks, table) = chunk(SOURCE);
        let greet = chunks
            .iter()
            .find(|c| c.symbols.iter().any(|s| s == "Person.Greet"))
            .unwrap();

        assert!(table
            .references_of("Person")
            .iter()
            .any(|r| r.chunk_id == greet.id));
    }

    #[test]
    fn grouped_consts_register_each_name() {
        let source = "package p\n\nconst (\n\tA = 1\n\tB = 2\n)\n";
        let (chunks, table) = chunk(source);

        let decl = chunks
            .iter()
            .find(|c| c.symbols.iter().any(|s| s == "A"))
            .unwrap();
        assert_eq!(decl.symbols, vec!["A", "B"]);
        assert_eq!(table.definitions_of("B")[0].kind, SymbolKind::Const);
    }

    #[test]
    fn interfaces_get_their_own_kind() {
        let source = "package p\n\ntype Greeter interface {\n\tGreet() string\n}\n";
        let (_, table) = chunk(source);
        assert_eq!(
            table.definitions_of("Greeter")[0].kind,
            SymbolKind::Interface
        );
    }

    #[test]
    fn call_sites_record_references() {
        let source = r#"package p

func helper() int {
	return 1
}

func caller() int {
	return helper()
}
"#;
        let (chunks, table) = chunk(source);
        let caller = chunks
            .iter()
            .find(|c| c.symbols.iter().any(|s| s == "caller"))
            .unwrap();

        assert!(table
            .references_of("helper")
            .iter()
            .any(|r| r.chunk_id == caller.id));
        // The definition site itself is not a reference.
        let helper = chunks
            .iter()
            .find(|c| c.symbols.iter().any(|s| s == "helper"))
            .unwrap();
        assert!(!table
            .references_of("helper")
            .iter()
            .any(|r| r.chunk_id == helper.id));
    }

    #[test]
    fn builtins_and_keywords_are_not_references() {
        let (_, table) = chunk(SOURCE);
        assert!(table.references_of("string").is_empty());
        assert!(table.references_of("func").is_empty());
    }

    #[test]
    fn invalid_source_degrades_to_line_windows() {
        let source = "package p\n\nfunc broken( {\n!!!\n";
        let chunker = GoChunker::new();
        let mut table = SymbolTable::new();
        let options = ChunkingOptions::new(5, 2);
        let chunks = chunker
            .chunk("broken.go", source, &mut table, &options)
            .unwrap();

        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| c.symbols.is_empty()));
        assert!(table.definitions().is_empty());

        let mut next = 1;
        for c in &chunks {
            assert_eq!(c.start_line, next);
            next = c.end_line + 1;
        }
    }
}
