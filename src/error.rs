/// Errors produced by whence during resolution.
#[derive(Debug, thiserror::Error)]
pub enum WhenceError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("parse failed: {0}")]
    ParseFailed(String),

    #[error("{path}: {reason}")]
    Config { path: String, reason: String },

    #[error("entry file path is empty")]
    EmptyEntryPath,
}
