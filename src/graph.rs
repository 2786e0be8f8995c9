//! Recursive resolution tree build.

use std::path::{Path, PathBuf};

use crate::error::WhenceError;
use crate::extract;
use crate::locate;
use crate::model::{Located, ResolutionRecord};
use crate::parser;
use crate::resolve::{self, AliasMap};

/// Build the resolution tree for an entry file.
///
/// When `selection` is given, usage extraction runs on the selection text
/// while import bindings still come from the full file (a selection may use
/// names imported outside it). Children are resolved strictly depth-first
/// in usage order, so the output is deterministic. Any file already entered
/// on the current root-to-node path terminates its branch as a cycle marker
/// instead of recursing.
pub fn analyze(
    aliases: &AliasMap,
    file_path: &Path,
    selection: Option<&str>,
) -> Result<Vec<ResolutionRecord>, WhenceError> {
    if file_path.as_os_str().is_empty() {
        return Err(WhenceError::EmptyEntryPath);
    }

    let mut visited = vec![canonical(file_path)];
    analyze_file(aliases, file_path, selection, &mut visited)
}

fn analyze_file(
    aliases: &AliasMap,
    file_path: &Path,
    selection: Option<&str>,
    visited: &mut Vec<PathBuf>,
) -> Result<Vec<ResolutionRecord>, WhenceError> {
    let (tree, content) = parser::parse_file(file_path)?;

    // Usage extraction always parses with the TSX grammar (selections are
    // component-body fragments); bindings come from the full file's tree.
    let usage_source = selection.unwrap_or(&content);
    let usage_tree = parser::parse_fragment(usage_source)?;
    let usages = extract::used_symbols(usage_tree.root_node(), usage_source.as_bytes());

    let bindings = extract::import_bindings(tree.root_node(), content.as_bytes());

    let mut records = Vec::new();
    for usage in &usages {
        let specifier = bindings.get(&usage.name).cloned().unwrap_or_default();

        if !resolve::is_followable(&specifier, aliases) {
            records.push(ResolutionRecord::leaf(usage, specifier));
            continue;
        }

        let mut located = Located::Unresolved;
        for base in resolve::resolve_bases(file_path, &specifier, aliases) {
            located = locate::probe_base(&base, &usage.name, aliases)?;
            if !located.is_unresolved() {
                break;
            }
        }

        let (children, cycle) = match located.file() {
            Some(target) => {
                let target_canonical = canonical(target);
                if visited.contains(&target_canonical) {
                    (Vec::new(), true)
                } else {
                    visited.push(target_canonical);
                    let children = analyze_file(aliases, target, None, visited)?;
                    visited.pop();
                    (children, false)
                }
            }
            None => (Vec::new(), false),
        };

        records.push(ResolutionRecord {
            name: usage.name.clone(),
            kind: usage.kind,
            specifier,
            location: located,
            cycle,
            children: Some(children),
        });
    }

    Ok(records)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
