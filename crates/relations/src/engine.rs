use shard_model::{Chunk, RelationStrength, SymbolKind, SymbolTable};
use std::collections::HashMap;
use std::path::Path;

/// Cap on related chunk ids per chunk, to avoid overwhelming the vector
/// store with low-value edges.
pub const MAX_RELATED: usize = 10;

/// Annotate every chunk in the table with its ranked related-chunk list.
/// Each list is computed against the completed table, then written exactly
/// once.
pub fn annotate(table: &mut SymbolTable) {
    let computed: Vec<(String, Vec<String>)> = table
        .chunks()
        .iter()
        .map(|chunk| (chunk.id.clone(), related_chunks(table, chunk)))
        .collect();

    log::debug!("relationship pass over {} chunks", computed.len());

    for (id, related) in computed {
        table.set_related(&id, related);
    }
}

/// Up to [`MAX_RELATED`] chunk ids related to `chunk`, strongest first,
/// ties broken by ascending id so output is deterministic.
///
/// Each rule proposes (candidate, strength) pairs; a candidate's final
/// strength is the maximum across rules, never a sum.
#[must_use]
pub fn related_chunks(table: &SymbolTable, chunk: &Chunk) -> Vec<String> {
    let mut related: HashMap<String, RelationStrength> = HashMap::new();

    // 1. Symbols defined here, referenced elsewhere.
    for symbol in &chunk.symbols {
        for reference in table.references_of(symbol) {
            if reference.chunk_id != chunk.id {
                upgrade(&mut related, &reference.chunk_id, RelationStrength::Strong);
            }
        }
    }

    // 2. Symbols referenced here, defined elsewhere.
    for (name, defs) in table.definitions() {
        let referenced_here = table
            .references_of(name)
            .iter()
            .any(|r| r.chunk_id == chunk.id);
        if !referenced_here {
            continue;
        }
        for def in defs {
            if def.chunk_id != chunk.id {
                upgrade(&mut related, &def.chunk_id, RelationStrength::Strong);
            }
        }
    }

    // 3. Method-type pairing, both directions.
    for symbol in &chunk.symbols {
        if let Some((type_name, _)) = split_method(symbol) {
            for def in table.definitions_of(type_name) {
                if def.chunk_id != chunk.id {
                    upgrade(&mut related, &def.chunk_id, RelationStrength::Strong);
                }
            }
        }
    }
    for symbol in &chunk.symbols {
        let prefix = format!("{symbol}.");
        for (name, defs) in table.definitions() {
            if !name.starts_with(&prefix) {
                continue;
            }
            for def in defs {
                if def.chunk_id != chunk.id {
                    upgrade(&mut related, &def.chunk_id, RelationStrength::Strong);
                }
            }
        }
    }

    // 4. Interface to probable implementers. A substring match on the bare
    // method name, not type resolution: false positives are expected.
    for symbol in &chunk.symbols {
        let defines_interface_here = table
            .definitions_of(symbol)
            .iter()
            .any(|d| d.kind == SymbolKind::Interface && d.chunk_id == chunk.id);
        if !defines_interface_here {
            continue;
        }
        for (name, defs) in table.definitions() {
            let Some((_, method_name)) = split_method(name) else {
                continue;
            };
            if !chunk.content.contains(method_name) {
                continue;
            }
            for def in defs {
                if def.chunk_id != chunk.id {
                    upgrade(&mut related, &def.chunk_id, RelationStrength::Medium);
                }
            }
        }
    }

    // 5. Imports: the import path's last segment matched against other
    // chunks' containing-directory names.
    for import in &chunk.imports {
        let package = last_segment(import);
        for other in table.chunks() {
            if other.id != chunk.id && directory_name(&other.file_path) == package {
                upgrade(&mut related, &other.id, RelationStrength::Medium);
            }
        }
    }

    // 6. Same-directory fallback, only where nothing stronger fired.
    // Root-level files have no containing-directory name and stay out.
    let package = directory_name(&chunk.file_path);
    if !package.is_empty() {
        for other in table.chunks() {
            if other.id != chunk.id && directory_name(&other.file_path) == package {
                related
                    .entry(other.id.clone())
                    .or_insert(RelationStrength::Weak);
            }
        }
    }

    let mut pairs: Vec<(String, RelationStrength)> = related.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs.truncate(MAX_RELATED);
    pairs.into_iter().map(|(id, _)| id).collect()
}

fn upgrade(related: &mut HashMap<String, RelationStrength>, id: &str, strength: RelationStrength) {
    let entry = related.entry(id.to_string()).or_insert(strength);
    if *entry < strength {
        *entry = strength;
    }
}

/// Split a `Type.Method` shaped symbol; anything else returns None.
fn split_method(symbol: &str) -> Option<(&str, &str)> {
    let (type_name, method) = symbol.split_once('.')?;
    if type_name.is_empty() || method.is_empty() || method.contains('.') {
        return None;
    }
    Some((type_name, method))
}

/// Last segment of an import path: `github.com/a/b/pkg` -> `pkg`.
fn last_segment(import: &str) -> &str {
    import.rsplit('/').next().unwrap_or(import)
}

/// Base name of the file's containing directory, empty for root-level
/// paths.
fn directory_name(file_path: &str) -> &str {
    Path::new(file_path)
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shard_model::{SymbolDefinition, SymbolReference};

    fn define(table: &mut SymbolTable, name: &str, chunk_id: &str, kind: SymbolKind) {
        table.add_definition(SymbolDefinition {
            name: name.to_string(),
            chunk_id: chunk_id.to_string(),
            file_path: "x.go".to_string(),
            start_line: 1,
            end_line: 1,
            kind,
        });
    }

    fn reference(table: &mut SymbolTable, name: &str, chunk_id: &str) {
        table.add_reference(SymbolReference {
            name: name.to_string(),
            chunk_id: chunk_id.to_string(),
            file_path: "x.go".to_string(),
            line: 1,
        });
    }

    fn chunk_with(
        table: &mut SymbolTable,
        path: &str,
        content: &str,
        symbols: &[&str],
        imports: &[&str],
    ) -> String {
        let mut chunk = Chunk::new(path, 1, 1, content, "go");
        chunk.symbols = symbols.iter().map(|s| s.to_string()).collect();
        chunk.imports = imports.iter().map(|s| s.to_string()).collect();
        let id = chunk.id.clone();
        table.insert_chunk(chunk);
        id
    }

    #[test]
    fn definition_and_reference_relate_both_ways() {
        let mut table = SymbolTable::new();
        let a = chunk_with(&mut table, "a.go", "func Compute() {}", &["Compute"], &[]);
        let b = chunk_with(&mut table, "b.go", "Compute()", &[], &[]);
        define(&mut table, "Compute", &a, SymbolKind::Function);
        reference(&mut table, "Compute", &b);

        let a_related = related_chunks(&table, table.get_chunk(&a).unwrap());
        let b_related = related_chunks(&table, table.get_chunk(&b).unwrap());

        assert!(a_related.contains(&b), "rule 1: definer sees referencer");
        assert!(b_related.contains(&a), "rule 2: referencer sees definer");
    }

    #[test]
    fn method_and_type_pair_strongly() {
        let mut table = SymbolTable::new();
        let ty = chunk_with(&mut table, "p.go", "type Person struct{}", &["Person"], &[]);
        let method = chunk_with(
            &mut table,
            "p.go",
            "func (p Person) Greet() {}",
            &["Person.Greet"],
            &[],
        );
        define(&mut table, "Person", &ty, SymbolKind::Type);
        define(&mut table, "Person.Greet", &method, SymbolKind::Function);

        assert!(related_chunks(&table, table.get_chunk(&method).unwrap()).contains(&ty));
        assert!(related_chunks(&table, table.get_chunk(&ty).unwrap()).contains(&method));
    }

    #[test]
    fn interface_links_to_matching_method_names() {
        let mut table = SymbolTable::new();
        let iface = chunk_with(
            &mut table,
            "i.go",
            "type Greeter interface { Greet() string }",
            &["Greeter"],
            &[],
        );
        let person = chunk_with(
            &mut table,
            "person.go",
            "func (p Person) Greet() string { return p.Name }",
            &["Person.Greet"],
            &[],
        );
        let robot = chunk_with(
            &mut table,
            "robot.go",
            "func (r Robot) Beep() {}",
            &["Robot.Beep"],
            &[],
        );
        define(&mut table, "Greeter", &iface, SymbolKind::Interface);
        define(&mut table, "Person.Greet", &person, SymbolKind::Function);
        define(&mut table, "Robot.Beep", &robot, SymbolKind::Function);

        let related = related_chunks(&table, table.get_chunk(&iface).unwrap());
        assert!(related.contains(&person), "Greet appears in the interface");
        assert!(!related.contains(&robot), "Beep does not");
    }

    #[test]
    fn imports_relate_to_package_directories() {
        let mut table = SymbolTable::new();
        let user = chunk_with(
            &mut table,
            "cmd/main.go",
            "auth.Login()",
            &[],
            &["example.com/project/auth"],
        );
        let provider = chunk_with(&mut table, "auth/login.go", "func Login() {}", &["Login"], &[]);

        let related = related_chunks(&table, table.get_chunk(&user).unwrap());
        assert!(related.contains(&provider));
    }

    #[test]
    fn same_directory_is_weak_and_never_downgrades() {
        let mut table = SymbolTable::new();
        let a = chunk_with(&mut table, "pkg/a.go", "func A() {}", &["A"], &[]);
        let b = chunk_with(&mut table, "pkg/b.go", "A()", &[], &[]);
        let c = chunk_with(&mut table, "pkg/c.go", "// nothing", &[], &[]);
        define(&mut table, "A", &a, SymbolKind::Function);
        reference(&mut table, "A", &b);

        // b relates to a strongly (reference) and to c weakly (directory).
        let related = related_chunks(&table, table.get_chunk(&b).unwrap());
        assert_eq!(related[0], a, "strong relation sorts first");
        assert!(related.contains(&c));
    }

    #[test]
    fn root_level_files_get_no_directory_relations() {
        let mut table = SymbolTable::new();
        let a = chunk_with(&mut table, "main.go", "func main() {}", &["main"], &[]);
        let _b = chunk_with(&mut table, "script.sh", "echo hi", &[], &[]);

        assert!(related_chunks(&table, table.get_chunk(&a).unwrap()).is_empty());
    }

    #[test]
    fn result_is_capped_and_deterministic() {
        let mut table = SymbolTable::new();
        let target = chunk_with(&mut table, "pkg/hub.go", "func Hub() {}", &["Hub"], &[]);
        for i in 0..15 {
            let other = chunk_with(
                &mut table,
                &format!("pkg/n{i}.go"),
                &format!("Hub() // {i}"),
                &[],
                &[],
            );
            reference(&mut table, "Hub", &other);
        }
        define(&mut table, "Hub", &target, SymbolKind::Function);

        let first = related_chunks(&table, table.get_chunk(&target).unwrap());
        let second = related_chunks(&table, table.get_chunk(&target).unwrap());

        assert_eq!(first.len(), MAX_RELATED);
        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted, "equal strengths tie-break by id");
    }

    #[test]
    fn annotate_writes_every_chunk_once() {
        let mut table = SymbolTable::new();
        let a = chunk_with(&mut table, "pkg/a.go", "func A() {}", &["A"], &[]);
        let b = chunk_with(&mut table, "pkg/b.go", "A()", &[], &[]);
        define(&mut table, "A", &a, SymbolKind::Function);
        reference(&mut table, "A", &b);

        annotate(&mut table);

        assert_eq!(table.get_chunk(&a).unwrap().related_chunks, vec![b.clone()]);
        assert!(table
            .get_chunk(&b)
            .unwrap()
            .related_chunks
            .contains(&a));
    }
}
