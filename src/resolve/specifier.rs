use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use super::AliasMap;

/// Extensions that terminate candidate probing.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Whether a path already carries a recognized source extension.
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Whether a specifier should be followed into its resolved file.
///
/// Relative specifiers and alias-matching specifiers are followable; bare
/// package names (`react`) and empty specifiers are not.
pub fn is_followable(specifier: &str, aliases: &AliasMap) -> bool {
    !specifier.is_empty() && (specifier.starts_with('.') || aliases.matches(specifier))
}

/// Resolve a specifier to its ordered absolute base paths.
///
/// Relative specifiers resolve against the importing file's directory;
/// alias specifiers expand through the alias map (one base per configured
/// target directory). External specifiers produce nothing.
pub fn resolve_bases(from_file: &Path, specifier: &str, aliases: &AliasMap) -> Vec<PathBuf> {
    if specifier.starts_with('.') {
        let parent = from_file.parent().unwrap_or(Path::new("."));
        return vec![normalize(&parent.join(specifier))];
    }

    aliases
        .expand(specifier)
        .iter()
        .map(|base| normalize(base))
        .collect()
}

/// Probe candidates for a stem without a source extension, in order:
/// `<stem>.ts`, `<stem>.tsx`, `<stem>/index.ts`, `<stem>/index.tsx`.
pub fn stem_candidates(stem: &Path) -> [PathBuf; 4] {
    [
        append_extension(stem, ".ts"),
        append_extension(stem, ".tsx"),
        stem.join("index.ts"),
        stem.join("index.tsx"),
    ]
}

/// Append an extension without replacing an existing dotted segment
/// (`./use.chat` + `.ts` must become `use.chat.ts`, not `use.ts`).
fn append_extension(stem: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(stem.as_os_str());
    s.push(ext);
    PathBuf::from(s)
}

/// Lexically fold `.` and `..` components so resolved paths display
/// cleanly.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}
