//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),

    #[error("Unknown template variant '{variant}' for {file_type} (available: {available})")]
    UnknownTemplateVariant {
        variant: String,
        file_type: String,
        available: String,
    },

    #[error("Template not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid manifest in template {template}: {message}")]
    InvalidManifest { template: String, message: String },

    #[error("Template rendering failed for {path}: {message}")]
    RenderingFailed { path: PathBuf, message: String },

    #[error("Render task failed: {0}")]
    TaskFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] rig_document::DocumentError),
}

impl TemplateError {
    /// Whether the error is a configuration mistake the user can fix from the command line.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TemplateError::UnknownFileType(_) | TemplateError::UnknownTemplateVariant { .. }
        )
    }
}
