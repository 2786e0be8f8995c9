use std::path::{Path, PathBuf};

use crate::error::WhenceError;

/// Config files probed (in order) when walking up from the entry file.
const CONFIG_FILE_NAMES: &[&str] = &["tsconfig.json", "webpack.config.json"];

/// Fallback alias root when no project configuration exists.
pub const DEFAULT_ALIAS_ROOT: &str = "/src";

/// Alias prefix → ordered candidate base directories.
///
/// Derived from a project's `compilerOptions.paths`, or synthesized as a
/// single `@/*` entry when no configuration file is found. Immutable for
/// the duration of one top-level resolution call.
pub struct AliasMap {
    entries: Vec<(String, Vec<PathBuf>)>,
}

impl AliasMap {
    pub fn new(entries: Vec<(String, Vec<PathBuf>)>) -> Self {
        Self { entries }
    }

    /// Load the alias map for an entry file.
    ///
    /// Walks up from the entry looking for `tsconfig.json` then
    /// `webpack.config.json`. A found but unusable config is a hard error;
    /// only a missing config falls back to the default map.
    pub fn load(entry: &Path, alias_root: &str) -> Result<Self, WhenceError> {
        match find_config_file(entry) {
            Some(config_path) => Self::from_config_file(&config_path),
            None => Ok(Self::fallback(entry, alias_root)),
        }
    }

    /// Default map: `@/*` resolves under the portion of the entry path up
    /// to and including the alias root segment (e.g. `/src`).
    pub fn fallback(entry: &Path, alias_root: &str) -> Self {
        let entry_str = entry.to_string_lossy();
        let head = entry_str.split(alias_root).next().unwrap_or("");
        let base = PathBuf::from(format!("{head}{alias_root}"));

        Self {
            entries: vec![("@/*".to_string(), vec![base])],
        }
    }

    /// Parse `compilerOptions.paths` (plus `baseUrl`) from a JSON/JSONC
    /// config file.
    fn from_config_file(config_path: &Path) -> Result<Self, WhenceError> {
        let content = std::fs::read_to_string(config_path).map_err(|e| WhenceError::Io {
            path: config_path.display().to_string(),
            source: e,
        })?;
        let stripped = strip_jsonc_comments(&content);

        let config_err = |reason: String| WhenceError::Config {
            path: config_path.display().to_string(),
            reason,
        };

        let val: serde_json::Value =
            serde_json::from_str(&stripped).map_err(|e| config_err(e.to_string()))?;

        let compiler = val
            .get("compilerOptions")
            .ok_or_else(|| config_err("compilerOptions is not defined".to_string()))?;

        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        let base_url = compiler
            .get("baseUrl")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| config_dir.to_path_buf(), |b| config_dir.join(b));

        let paths = compiler
            .get("paths")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| config_err("paths are not defined".to_string()))?;

        let mut entries = Vec::new();
        for (pattern, targets) in paths {
            let targets = targets
                .as_array()
                .ok_or_else(|| config_err(format!("paths entry '{pattern}' is not an array")))?;

            let dirs: Vec<PathBuf> = targets
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(|t| base_url.join(t.trim_end_matches('*').trim_end_matches('/')))
                .collect();

            entries.push((pattern.clone(), dirs));
        }

        Ok(Self { entries })
    }

    /// Whether a specifier is covered by an alias entry.
    ///
    /// A bare `*` key never classifies: bare package specifiers must not
    /// become followable through a catch-all entry.
    pub fn matches(&self, specifier: &str) -> bool {
        self.best_entry(specifier).is_some()
    }

    /// Expand a specifier through the best (longest-prefix) alias entry
    /// into its ordered candidate base paths.
    pub fn expand(&self, specifier: &str) -> Vec<PathBuf> {
        let Some((pattern, dirs)) = self.best_entry(specifier) else {
            return Vec::new();
        };

        if let Some(prefix) = pattern.strip_suffix('*') {
            let rest = &specifier[prefix.len()..];
            dirs.iter().map(|d| d.join(rest)).collect()
        } else {
            dirs.clone()
        }
    }

    /// Exact-prefix match, longest-prefix-wins when multiple keys could
    /// match. Ties keep the earlier entry.
    fn best_entry(&self, specifier: &str) -> Option<&(String, Vec<PathBuf>)> {
        let mut best: Option<(&(String, Vec<PathBuf>), usize)> = None;

        for entry in &self.entries {
            let (pattern, _) = entry;
            if pattern == "*" {
                continue;
            }

            let score = if let Some(prefix) = pattern.strip_suffix('*') {
                specifier.strip_prefix(prefix).map(|_| prefix.len())
            } else if specifier == pattern {
                Some(pattern.len())
            } else {
                None
            };

            if let Some(score) = score {
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((entry, score));
                }
            }
        }

        best.map(|(entry, _)| entry)
    }
}

/// Walk up directories from the entry file looking for a config file.
fn find_config_file(entry: &Path) -> Option<PathBuf> {
    let mut dir = if entry.is_dir() {
        entry.to_path_buf()
    } else {
        entry.parent()?.to_path_buf()
    };

    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Strip JSONC comments (`//` line and `/* */` block) while respecting
/// strings.
fn strip_jsonc_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        let ch = bytes[i];

        // String literal: copy verbatim until closing quote
        if ch == b'"' {
            out.push('"');
            i += 1;
            while i < len {
                let c = bytes[i];
                out.push(c as char);
                i += 1;
                if c == b'\\' && i < len {
                    out.push(bytes[i] as char);
                    i += 1;
                } else if c == b'"' {
                    break;
                }
            }
            continue;
        }

        // Line comment
        if ch == b'/' && i + 1 < len && bytes[i + 1] == b'/' {
            while i < len && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        // Block comment
        if ch == b'/' && i + 1 < len && bytes[i + 1] == b'*' {
            i += 2;
            while i + 1 < len && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                i += 1;
            }
            if i + 1 < len {
                i += 2;
            }
            continue;
        }

        out.push(ch as char);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn strip_jsonc_removes_line_comments() {
        let input = "{\n  // comment\n  \"key\": \"value\"\n}";
        let result = strip_jsonc_comments(input);
        assert!(!result.contains("//"));
        assert!(result.contains("\"key\": \"value\""));
    }

    #[test]
    fn strip_jsonc_removes_block_comments() {
        let input = "{\n  /* block */\n  \"key\": \"value\"\n}";
        let result = strip_jsonc_comments(input);
        assert!(!result.contains("/*"));
        assert!(result.contains("\"key\": \"value\""));
    }

    #[test]
    fn strip_jsonc_preserves_strings_with_slashes() {
        let input = r#"{ "url": "https://example.com/api" }"#;
        assert_eq!(strip_jsonc_comments(input), input);
    }

    #[test]
    fn fallback_cuts_entry_path_at_alias_root() {
        let map = AliasMap::fallback(Path::new("/work/app/src/pages/Home.tsx"), "/src");
        assert_eq!(
            map.expand("@/hooks/useFoo"),
            vec![PathBuf::from("/work/app/src/hooks/useFoo")]
        );
    }

    #[test]
    fn fallback_matches_at_prefixed_specifiers_only() {
        let map = AliasMap::fallback(Path::new("/work/app/src/App.tsx"), "/src");
        assert!(map.matches("@/hooks/useFoo"));
        assert!(!map.matches("react"));
    }

    #[test]
    fn expand_wildcard_joins_rest_onto_base() {
        let map = AliasMap::new(vec![(
            "@/*".to_string(),
            vec![PathBuf::from("/proj/src")],
        )]);
        assert_eq!(
            map.expand("@/components/Button"),
            vec![PathBuf::from("/proj/src/components/Button")]
        );
    }

    #[test]
    fn expand_exact_key_returns_targets() {
        let map = AliasMap::new(vec![(
            "@config".to_string(),
            vec![PathBuf::from("/proj/config/special")],
        )]);
        assert_eq!(
            map.expand("@config"),
            vec![PathBuf::from("/proj/config/special")]
        );
        assert!(map.expand("@config/deep").is_empty());
    }

    #[test]
    fn longest_prefix_wins_across_keys() {
        let map = AliasMap::new(vec![
            ("@/*".to_string(), vec![PathBuf::from("/proj/src")]),
            (
                "@/lib/*".to_string(),
                vec![PathBuf::from("/proj/vendored/lib")],
            ),
        ]);
        assert_eq!(
            map.expand("@/lib/hooks"),
            vec![PathBuf::from("/proj/vendored/lib/hooks")]
        );
        assert_eq!(
            map.expand("@/components/Button"),
            vec![PathBuf::from("/proj/src/components/Button")]
        );
    }

    #[test]
    fn bare_wildcard_key_never_classifies() {
        let map = AliasMap::new(vec![("*".to_string(), vec![PathBuf::from("/proj/src")])]);
        assert!(!map.matches("react"));
        assert!(map.expand("react").is_empty());
    }

    #[test]
    fn multiple_targets_keep_configured_order() {
        let map = AliasMap::new(vec![(
            "@/*".to_string(),
            vec![PathBuf::from("/proj/src"), PathBuf::from("/proj/generated")],
        )]);
        assert_eq!(
            map.expand("@/api"),
            vec![
                PathBuf::from("/proj/src/api"),
                PathBuf::from("/proj/generated/api")
            ]
        );
    }

    #[test]
    fn load_parses_tsconfig_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{
  "compilerOptions": {
    "baseUrl": ".",
    "paths": {
      "@/*": ["src/*"]
    }
  }
}"#,
        )
        .unwrap();
        let entry = dir.path().join("src").join("App.tsx");

        let map = AliasMap::load(&entry, DEFAULT_ALIAS_ROOT).unwrap();
        assert_eq!(
            map.expand("@/utils"),
            vec![dir.path().join(".").join("src").join("utils")]
        );
    }

    #[test]
    fn load_handles_jsonc_comments() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            "{\n  // compiler settings\n  \"compilerOptions\": {\n    /* aliases */\n    \"paths\": { \"@/*\": [\"src/*\"] }\n  }\n}",
        )
        .unwrap();

        let map = AliasMap::load(&dir.path().join("App.tsx"), DEFAULT_ALIAS_ROOT).unwrap();
        assert!(map.matches("@/anything"));
    }

    #[test]
    fn load_falls_back_when_no_config_found() {
        let dir = tempfile::tempdir().unwrap();
        let entry = dir.path().join("src").join("App.tsx");

        let map = AliasMap::load(&entry, DEFAULT_ALIAS_ROOT).unwrap();
        assert!(map.matches("@/hooks"));
    }

    #[test]
    fn load_errors_on_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{ not json").unwrap();

        let result = AliasMap::load(&dir.path().join("App.tsx"), DEFAULT_ALIAS_ROOT);
        assert!(matches!(result, Err(WhenceError::Config { .. })));
    }

    #[test]
    fn load_errors_on_missing_paths_section() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "compilerOptions": { "strict": true } }"#,
        )
        .unwrap();

        let result = AliasMap::load(&dir.path().join("App.tsx"), DEFAULT_ALIAS_ROOT);
        assert!(matches!(result, Err(WhenceError::Config { .. })));
    }

    #[test]
    fn load_picks_up_webpack_config_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("webpack.config.json"),
            r#"{ "compilerOptions": { "paths": { "~/*": ["app/*"] } } }"#,
        )
        .unwrap();

        let map = AliasMap::load(&dir.path().join("App.tsx"), DEFAULT_ALIAS_ROOT).unwrap();
        assert!(map.matches("~/pages/Home"));
        assert!(!map.matches("@/pages/Home"));
    }
}
