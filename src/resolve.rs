mod alias;
mod specifier;

pub use alias::{AliasMap, DEFAULT_ALIAS_ROOT};
pub use specifier::{has_source_extension, is_followable, resolve_bases, stem_candidates};
