//! Error types for guidegen.
//!
//! Library crates use [`GuideGenError`] via `thiserror`.
//! App crates (cli/dev-server) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all guidegen operations.
#[derive(Debug, thiserror::Error)]
pub enum GuideGenError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source document has no anchor heading, so there is nothing to publish.
    #[error("could not find the beginning of the guide: no '{anchor}' heading")]
    AnchorNotFound { anchor: String },

    /// JSON serialization error while writing an output document.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// File watcher setup or delivery error.
    #[error("watch error: {0}")]
    Watch(String),

    /// A configuration that parses but cannot produce a usable build.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GuideGenError>;

impl GuideGenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Report a missing anchor heading.
    pub fn anchor_not_found(anchor: impl Into<String>) -> Self {
        Self::AnchorNotFound {
            anchor: anchor.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GuideGenError::config("failed to parse guidegen.toml");
        assert_eq!(err.to_string(), "config error: failed to parse guidegen.toml");

        let err = GuideGenError::validation("dev.port must be non-zero");
        assert_eq!(err.to_string(), "validation error: dev.port must be non-zero");

        let err = GuideGenError::anchor_not_found("## The Golden Rules");
        assert!(err.to_string().contains("## The Golden Rules"));
    }

    #[test]
    fn io_error_includes_path() {
        let err = GuideGenError::io(
            "/tmp/missing/README.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("README.md"));
    }
}
