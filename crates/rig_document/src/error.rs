//! Error types for document access.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::Codec;

/// Result type alias for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while reading, writing or validating documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid {codec} in file {path}: {message}")]
    InvalidFormat {
        path: PathBuf,
        codec: Codec,
        message: String,
    },

    #[error("Invalid schema {path}: {message}")]
    InvalidSchema { path: PathBuf, message: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocumentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error comes from the filesystem rather than from document content.
    pub fn is_io(&self) -> bool {
        matches!(self, DocumentError::Io { .. })
    }
}
