use std::collections::HashMap;

use tree_sitter::Node;

use crate::util::{trim_quotes, txt};

/// Sentinel binding for namespace imports (`import * as ns from ...`).
///
/// A namespace import cannot itself match a component or hook usage name,
/// so it is bound under a marker instead of its local identifier.
pub const NAMESPACE_BINDING: &str = "*";

/// Map every locally bound import name to the specifier it came from.
///
/// Covers default imports, namespace imports, and named imports (using the
/// local alias when one is given). If the same local name is imported more
/// than once the later import wins. Side-effect-only imports contribute
/// nothing.
pub fn import_bindings(root: Node, src: &[u8]) -> HashMap<String, String> {
    let mut bindings = HashMap::new();

    let mut cursor = root.walk();
    for statement in root.children(&mut cursor) {
        if statement.kind() != "import_statement" {
            continue;
        }

        let Some(source) = statement.child_by_field_name("source") else {
            continue;
        };
        let specifier = trim_quotes(txt(source, src)).to_string();

        let mut stmt_cursor = statement.walk();
        for part in statement.children(&mut stmt_cursor) {
            if part.kind() == "import_clause" {
                collect_clause_bindings(part, src, &specifier, &mut bindings);
            }
        }
    }

    bindings
}

fn collect_clause_bindings(
    clause: Node,
    src: &[u8],
    specifier: &str,
    bindings: &mut HashMap<String, String>,
) {
    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        match child.kind() {
            // Default import: `import Button from './Button'`
            "identifier" => {
                bindings.insert(txt(child, src).to_string(), specifier.to_string());
            }
            // `import * as ns from './lib'`
            "namespace_import" => {
                bindings.insert(NAMESPACE_BINDING.to_string(), specifier.to_string());
            }
            // `import { a, b as c } from './lib'`
            "named_imports" => {
                let mut inner = child.walk();
                for spec in child.children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let local = spec
                        .child_by_field_name("alias")
                        .or_else(|| spec.child_by_field_name("name"));
                    if let Some(local) = local {
                        bindings.insert(txt(local, src).to_string(), specifier.to_string());
                    }
                }
            }
            _ => {}
        }
    }
}
