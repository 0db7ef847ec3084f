//! Engine error kinds shared across the registry, loader, and writer.

use std::path::PathBuf;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the config-transform engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    #[error("IO failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Extract failed: {0}")]
    ExtractFailed(String),
}

impl EngineError {
    /// Build a ParseFailed for a file path with an underlying cause
    pub fn parse_failed(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ParseFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
