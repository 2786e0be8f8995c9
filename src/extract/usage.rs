use tree_sitter::Node;

use crate::model::{SymbolUsage, UsageKind};
use crate::util::txt;

/// Extract every component and hook used in a parsed source fragment.
///
/// Components are capitalized JSX tag names (paired and self-closing; for
/// member tags like `Namespace.Widget` only the rightmost segment counts).
/// Hooks are bare-identifier call expressions matching `^use[A-Z]`.
///
/// Both sets are deduplicated; the result lists components in first-seen
/// order, then hooks in first-seen order, so downstream output stays
/// deterministic.
pub fn used_symbols(root: Node, src: &[u8]) -> Vec<SymbolUsage> {
    let mut components = Vec::new();
    let mut hooks = Vec::new();
    walk(root, src, &mut components, &mut hooks);

    components
        .into_iter()
        .map(|name| SymbolUsage {
            name,
            kind: UsageKind::Component,
        })
        .chain(hooks.into_iter().map(|name| SymbolUsage {
            name,
            kind: UsageKind::Hook,
        }))
        .collect()
}

fn walk(node: Node, src: &[u8], components: &mut Vec<String>, hooks: &mut Vec<String>) {
    match node.kind() {
        "jsx_element" => {
            let tag = node
                .child_by_field_name("open_tag")
                .and_then(|open| open.child_by_field_name("name"))
                .map(|n| txt(n, src));
            record_component(tag, components);
        }
        "jsx_self_closing_element" => {
            let tag = node.child_by_field_name("name").map(|n| txt(n, src));
            record_component(tag, components);
        }
        "call_expression" => {
            if let Some(func) = node.child_by_field_name("function") {
                if func.kind() == "identifier" {
                    let name = txt(func, src);
                    if is_hook_name(name) && !hooks.iter().any(|h| h == name) {
                        hooks.push(name.to_string());
                    }
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, src, components, hooks);
    }
}

/// Record a JSX tag name if it names a component (capitalized).
///
/// Member tags contribute only their rightmost segment: `Form.Item` is the
/// component `Item`. Lowercase tags are intrinsic HTML elements and never
/// count.
fn record_component(tag: Option<&str>, components: &mut Vec<String>) {
    let Some(tag) = tag else { return };
    let Some(name) = tag.rsplit('.').next() else {
        return;
    };

    if name.chars().next().is_some_and(char::is_uppercase)
        && !components.iter().any(|c| c == name)
    {
        components.push(name.to_string());
    }
}

/// Hook naming convention: `use` followed by an uppercase letter.
fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}
