use std::fmt;
use std::path::{Path, PathBuf};

/// Whether a used name is a JSX component or a hook call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Component,
    Hook,
}

impl UsageKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Hook => "hook",
        }
    }
}

/// A name used as a JSX tag or as a hook call inside a component body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolUsage {
    pub name: String,
    pub kind: UsageKind,
}

/// Where a symbol's resolution bottomed out.
///
/// `FileOnly` means the chain terminated at a module without locating the
/// exact declaration statement (e.g. a re-export pointing at a file that
/// already carries a source extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Unresolved,
    FileOnly(PathBuf),
    FileAndLine(PathBuf, usize),
}

impl Located {
    /// The resolved file, if any.
    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::Unresolved => None,
            Self::FileOnly(path) | Self::FileAndLine(path, _) => Some(path),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }
}

impl fmt::Display for Located {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => Ok(()),
            Self::FileOnly(path) => write!(f, "{}", path.display()),
            Self::FileAndLine(path, line) => write!(f, "{}:{line}", path.display()),
        }
    }
}

/// One node of the resolution tree: a used name, the specifier it was
/// imported with, where it resolved, and the subtree of the resolved file's
/// own usages.
///
/// `children` is `Some` exactly when the specifier was classified as
/// followable (relative or alias-matching) at construction time; it stays
/// empty when resolution failed or a cycle was cut.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolutionRecord {
    pub name: String,
    pub kind: UsageKind,
    pub specifier: String,
    pub location: Located,
    pub cycle: bool,
    pub children: Option<Vec<ResolutionRecord>>,
}

impl ResolutionRecord {
    /// A terminal leaf: unimported or external specifier, no resolution.
    pub fn leaf(usage: &SymbolUsage, specifier: String) -> Self {
        Self {
            name: usage.name.clone(),
            kind: usage.kind,
            specifier,
            location: Located::Unresolved,
            cycle: false,
            children: None,
        }
    }
}
