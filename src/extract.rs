mod imports;
mod usage;

pub use imports::import_bindings;
pub use usage::used_symbols;
