//! Error types for TODO orchestration services.

use crate::todo::ports::{MessagingError, TaskStoreError};
use thiserror::Error;

/// A template could not be rendered into an artifact body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render template '{template}': {reason}")]
pub struct RenderError {
    /// Template name.
    pub template: &'static str,
    /// Renderer failure description.
    pub reason: String,
}

/// Service-level errors for TODO lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum TodoLifecycleError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Messaging surface operation failed.
    #[error(transparent)]
    Messaging(#[from] MessagingError),
    /// Artifact rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for TODO lifecycle operations.
pub type TodoLifecycleResult<T> = Result<T, TodoLifecycleError>;
