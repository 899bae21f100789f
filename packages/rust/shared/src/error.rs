//! Error types for autocrumb.
//!
//! Library crates use [`AutocrumbError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! The breadcrumb generator itself never fails: a missing root or a bad level
//! marker degrades by omission. Errors only come from the edges (files, config,
//! URLs).

use std::path::PathBuf;

/// Top-level error type for all autocrumb operations.
#[derive(Debug, thiserror::Error)]
pub enum AutocrumbError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Page URL could not be parsed or derived.
    #[error("invalid URL '{input}': {source}")]
    Url {
        input: String,
        source: url::ParseError,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AutocrumbError>;

impl AutocrumbError {
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

    /// Wrap a URL parse failure together with the offending input.
    pub fn url(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::Url {
            input: input.into(),
            source,
        }
    }
}
