//! Error types for the core module.

use std::path::PathBuf;
use thiserror::Error;

use rig_document::DocumentError;
use rig_templates::TemplateError;

/// Result type alias for core operations.
pub type RigResult<T> = Result<T, RigError>;

/// Errors that can occur during rig operations.
#[derive(Error, Debug)]
pub enum RigError {
    #[error("Cluster must be one of: dev, int or prod (got '{0}')")]
    InvalidCluster(String),

    #[error("No image tag provided")]
    MissingImageTag,

    #[error("Document {0} is not a mapping")]
    NotAMapping(PathBuf),

    #[error("Template '{template}' not found in {repo}")]
    TemplateNotFound { template: String, repo: String },

    #[error("Version '{version}' of template '{template}' not found")]
    VersionNotFound { template: String, version: String },

    #[error("Template digest does not match: {actual} (rig.yaml pins {expected})")]
    DigestMismatch { expected: String, actual: String },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Unable to parse template uri: {0}")]
    InvalidTemplateUri(String),

    #[error("Invalid parameter '{0}': expected key=value")]
    InvalidParameter(String),

    #[error("{0} already exists. Use --force to overwrite it")]
    AlreadyExists(PathBuf),

    #[error("No rig.yaml found in {0}")]
    DescriptorNotFound(PathBuf),

    #[error("Invalid rig descriptor {path}: {message}")]
    InvalidDescriptor { path: PathBuf, message: String },

    #[error("Unable to determine the home directory")]
    HomeDirUnavailable,

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RigError {
    /// Whether the error is an expected failure the user can act on.
    ///
    /// Everything else is treated as a bug or environment failure and
    /// reported with its full chain.
    pub fn is_user_facing(&self) -> bool {
        match self {
            RigError::Io(_) => false,
            RigError::Document(e) => !e.is_io(),
            RigError::Template(TemplateError::Io(_)) | RigError::Template(TemplateError::TaskFailed(_)) => false,
            RigError::Template(TemplateError::Document(e)) => !e.is_io(),
            _ => true,
        }
    }

    /// Whether the error was raised by the remote template repository.
    pub fn is_repository(&self) -> bool {
        matches!(
            self,
            RigError::TemplateNotFound { .. }
                | RigError::VersionNotFound { .. }
                | RigError::DigestMismatch { .. }
                | RigError::Git(_)
        )
    }

    /// Whether the error is a configuration or precondition failure.
    pub fn is_configuration(&self) -> bool {
        match self {
            RigError::InvalidCluster(_)
            | RigError::MissingImageTag
            | RigError::InvalidTemplateUri(_)
            | RigError::InvalidParameter(_)
            | RigError::AlreadyExists(_)
            | RigError::DescriptorNotFound(_)
            | RigError::InvalidDescriptor { .. }
            | RigError::Document(DocumentError::NotFound(_)) => true,
            RigError::Template(e) => e.is_configuration(),
            _ => false,
        }
    }
}
