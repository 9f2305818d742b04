//! Error types for wordquiz-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using VocabularyError.
pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Errors that can occur while loading a vocabulary file.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vocabulary line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Errors raised by a synonym source. Never surfaced to the quiz taker.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),
}
