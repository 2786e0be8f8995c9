//! Declaration location and re-export following.
//!
//! Given a base path from the module resolver and a symbol name, probe the
//! stem candidates in order until one both exists and either declares the
//! symbol or re-exports it (`export { default as name } from ...`), in
//! which case the chain is followed recursively to the physical
//! declaration.

use std::path::{Path, PathBuf};

use tree_sitter::Node;

use crate::error::WhenceError;
use crate::model::Located;
use crate::parser;
use crate::resolve::{self, AliasMap};
use crate::util::{trim_quotes, txt};

/// Resolve a symbol starting from a base path.
///
/// A base that already carries a source extension is final (file-level, no
/// line). Otherwise each stem candidate is probed in order; a candidate
/// that exists but neither declares nor re-exports the symbol is discarded
/// and the next one tried.
pub fn probe_base(base: &Path, symbol: &str, aliases: &AliasMap) -> Result<Located, WhenceError> {
    let mut chain = Vec::new();
    probe_base_inner(base, symbol, aliases, &mut chain)
}

fn probe_base_inner(
    base: &Path,
    symbol: &str,
    aliases: &AliasMap,
    chain: &mut Vec<PathBuf>,
) -> Result<Located, WhenceError> {
    if resolve::has_source_extension(base) {
        return Ok(Located::FileOnly(base.to_path_buf()));
    }

    for candidate in resolve::stem_candidates(base) {
        let located = probe_file(&candidate, symbol, aliases, chain)?;
        if !located.is_unresolved() {
            return Ok(located);
        }
    }

    Ok(Located::Unresolved)
}

/// Probe one concrete file: missing is a normal negative result; an
/// existing file is scanned for a declaration, then for a default
/// re-export to follow.
fn probe_file(
    path: &Path,
    symbol: &str,
    aliases: &AliasMap,
    chain: &mut Vec<PathBuf>,
) -> Result<Located, WhenceError> {
    if !path.is_file() {
        return Ok(Located::Unresolved);
    }

    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    // Re-export cycle: this file is already on the follow chain.
    if chain.contains(&canonical) {
        return Ok(Located::Unresolved);
    }

    let (tree, source) = parser::parse_file(path)?;
    let src = source.as_bytes();

    if let Some(line) = declaration_line(tree.root_node(), src, symbol) {
        return Ok(Located::FileAndLine(path.to_path_buf(), line));
    }

    let Some(specifier) = default_reexport_source(tree.root_node(), src, symbol) else {
        return Ok(Located::Unresolved);
    };

    chain.push(canonical);
    let mut located = Located::Unresolved;
    for next_base in resolve::resolve_bases(path, &specifier, aliases) {
        located = probe_base_inner(&next_base, symbol, aliases, chain)?;
        if !located.is_unresolved() {
            break;
        }
    }
    chain.pop();

    Ok(located)
}

/// Find the 1-based line of a top-level declaration binding `symbol`.
///
/// Matches function declarations and variable declarators (including
/// `export`-wrapped ones) with an identifier name equal to `symbol`. First
/// match in document order wins.
pub fn declaration_line(root: Node, src: &[u8], symbol: &str) -> Option<usize> {
    let mut cursor = root.walk();
    for statement in root.children(&mut cursor) {
        let declaration = if statement.kind() == "export_statement" {
            match statement.child_by_field_name("declaration") {
                Some(decl) => decl,
                None => continue,
            }
        } else {
            statement
        };

        if let Some(line) = declaration_matches(declaration, src, symbol) {
            return Some(line);
        }
    }
    None
}

fn declaration_matches(declaration: Node, src: &[u8], symbol: &str) -> Option<usize> {
    match declaration.kind() {
        "function_declaration" | "generator_function_declaration" => {
            let name = declaration.child_by_field_name("name")?;
            (txt(name, src) == symbol).then(|| declaration.start_position().row + 1)
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = declaration.walk();
            for declarator in declaration.children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(name) = declarator.child_by_field_name("name") else {
                    continue;
                };
                if name.kind() == "identifier" && txt(name, src) == symbol {
                    return Some(declarator.start_position().row + 1);
                }
            }
            None
        }
        _ => None,
    }
}

/// Find the specifier of a `export { default as <symbol> } from '<module>'`
/// clause, if the file has one. First match wins.
pub fn default_reexport_source(root: Node, src: &[u8], symbol: &str) -> Option<String> {
    let mut cursor = root.walk();
    for statement in root.children(&mut cursor) {
        if statement.kind() != "export_statement" {
            continue;
        }
        let Some(source) = statement.child_by_field_name("source") else {
            continue;
        };

        let mut stmt_cursor = statement.walk();
        for part in statement.children(&mut stmt_cursor) {
            if part.kind() != "export_clause" {
                continue;
            }
            let mut clause_cursor = part.walk();
            for spec in part.children(&mut clause_cursor) {
                if spec.kind() != "export_specifier" {
                    continue;
                }
                let Some(name) = spec.child_by_field_name("name") else {
                    continue;
                };
                let Some(alias) = spec.child_by_field_name("alias") else {
                    continue;
                };
                if txt(name, src) == "default" && txt(alias, src) == symbol {
                    return Some(trim_quotes(txt(source, src)).to_string());
                }
            }
        }
    }
    None
}
