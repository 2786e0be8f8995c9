use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::error::WhenceError;

/// Detect the tree-sitter language from a file extension.
pub fn detect_language(ext: &str) -> Result<Language, WhenceError> {
    match ext {
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "ts" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        _ => Err(WhenceError::UnsupportedExtension(ext.to_string())),
    }
}

/// Parse source text with the given language.
pub fn parse_source(source: &str, language: &Language) -> Result<Tree, WhenceError> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| WhenceError::ParseFailed(e.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| WhenceError::ParseFailed("parser returned no tree".to_string()))
}

/// Parse a source fragment that may contain JSX.
///
/// Selections are cut from component bodies, so they parse with the TSX
/// grammar regardless of the entry file's extension.
pub fn parse_fragment(source: &str) -> Result<Tree, WhenceError> {
    parse_source(source, &tree_sitter_typescript::LANGUAGE_TSX.into())
}

/// Read and parse a source file, returning the tree and source text.
pub fn parse_file(path: &Path) -> Result<(Tree, String), WhenceError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let source = std::fs::read_to_string(path).map_err(|e| WhenceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let language = detect_language(ext)?;
    let tree = parse_source(&source, &language)?;

    Ok((tree, source))
}
