//! Rendering of the resolution tree: human-readable box-drawing output and
//! the JSON wire format consumed by external renderers.

use std::fmt::Write;

use serde_json::{Map, Value};

use crate::model::ResolutionRecord;

/// Serialize records to the wire format: `import`, `kind`, `path`,
/// `absolutePath` (followable records only, `""` when unresolved), `child`
/// (followable records only), `cycle` (cycle markers only).
pub fn to_json(records: &[ResolutionRecord]) -> Value {
    Value::Array(records.iter().map(record_to_json).collect())
}

fn record_to_json(record: &ResolutionRecord) -> Value {
    let mut map = Map::new();
    map.insert("import".to_string(), Value::String(record.name.clone()));
    map.insert(
        "kind".to_string(),
        Value::String(record.kind.label().to_string()),
    );
    map.insert("path".to_string(), Value::String(record.specifier.clone()));

    if let Some(children) = &record.children {
        map.insert(
            "absolutePath".to_string(),
            Value::String(record.location.to_string()),
        );
        map.insert("child".to_string(), to_json(children));
    }
    if record.cycle {
        map.insert("cycle".to_string(), Value::Bool(true));
    }

    Value::Object(map)
}

/// Render the resolution tree with box-drawing characters.
pub fn render(records: &[ResolutionRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "{}", record_label(record));
        if let Some(children) = &record.children {
            render_level(&mut out, children, "");
        }
    }
    out
}

fn render_level(out: &mut String, children: &[ResolutionRecord], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let continuation = if is_last { "    " } else { "│   " };

        let _ = writeln!(out, "{prefix}{connector}{}", record_label(child));

        if let Some(grandchildren) = &child.children {
            if !grandchildren.is_empty() {
                render_level(out, grandchildren, &format!("{prefix}{continuation}"));
            }
        }
    }
}

fn record_label(record: &ResolutionRecord) -> String {
    let mut label = format!("{}  [{}]", record.name, record.kind.label());

    if record.specifier.is_empty() {
        label.push_str("  (not imported)");
    } else if record.children.is_none() {
        // Non-followable specifier: an external package.
        label.push_str(&format!("  {}  (external)", record.specifier));
    } else if record.location.is_unresolved() {
        label.push_str(&format!("  {}  (unresolved)", record.specifier));
    } else {
        label.push_str(&format!("  {} → {}", record.specifier, record.location));
    }

    if record.cycle {
        label.push_str("  (cycle)");
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Located, SymbolUsage, UsageKind};
    use std::path::PathBuf;

    fn hook_leaf(name: &str, specifier: &str) -> ResolutionRecord {
        ResolutionRecord::leaf(
            &SymbolUsage {
                name: name.to_string(),
                kind: UsageKind::Hook,
            },
            specifier.to_string(),
        )
    }

    fn resolved_component(name: &str, specifier: &str, path: &str, line: usize) -> ResolutionRecord {
        ResolutionRecord {
            name: name.to_string(),
            kind: UsageKind::Component,
            specifier: specifier.to_string(),
            location: Located::FileAndLine(PathBuf::from(path), line),
            cycle: false,
            children: Some(Vec::new()),
        }
    }

    #[test]
    fn json_leaf_omits_absolute_path_and_child() {
        let value = to_json(&[hook_leaf("useAmbient", "")]);
        let obj = &value[0];
        assert_eq!(obj["import"], "useAmbient");
        assert_eq!(obj["kind"], "hook");
        assert_eq!(obj["path"], "");
        assert!(obj.get("absolutePath").is_none());
        assert!(obj.get("child").is_none());
        assert!(obj.get("cycle").is_none());
    }

    #[test]
    fn json_followable_record_carries_location_and_children() {
        let mut record = resolved_component("Button", "./Button", "/p/Button/index.tsx", 3);
        record.children = Some(vec![hook_leaf("useTheme", "")]);

        let value = to_json(&[record]);
        let obj = &value[0];
        assert_eq!(obj["absolutePath"], "/p/Button/index.tsx:3");
        assert_eq!(obj["child"][0]["import"], "useTheme");
    }

    #[test]
    fn json_cycle_marker_is_flagged() {
        let record = ResolutionRecord {
            name: "A".to_string(),
            kind: UsageKind::Component,
            specifier: "./a".to_string(),
            location: Located::FileAndLine(PathBuf::from("/p/a.tsx"), 2),
            cycle: true,
            children: Some(Vec::new()),
        };
        let value = to_json(&[record]);
        assert_eq!(value[0]["cycle"], true);
    }

    #[test]
    fn render_marks_unimported_and_external_leaves() {
        let out = render(&[hook_leaf("useAmbient", ""), hook_leaf("useState", "react")]);
        assert!(out.contains("useAmbient  [hook]  (not imported)"));
        assert!(out.contains("useState  [hook]  react  (external)"));
    }

    #[test]
    fn render_nests_children_with_box_drawing() {
        let mut parent = resolved_component("Page", "./Page", "/p/Page.tsx", 1);
        parent.children = Some(vec![
            resolved_component("Card", "./Card", "/p/Card.tsx", 1),
            hook_leaf("useData", "@/hooks"),
        ]);
        let out = render(&[parent]);
        assert!(out.contains("Page  [component]  ./Page → /p/Page.tsx:1"));
        assert!(out.contains("├── Card"));
        assert!(out.contains("└── useData"));
    }

    #[test]
    fn render_marks_unresolved_followable_records() {
        let record = ResolutionRecord {
            name: "Ghost".to_string(),
            kind: UsageKind::Component,
            specifier: "./Ghost".to_string(),
            location: Located::Unresolved,
            cycle: false,
            children: Some(Vec::new()),
        };
        let out = render(&[record]);
        assert!(out.contains("Ghost  [component]  ./Ghost  (unresolved)"));
    }
}
