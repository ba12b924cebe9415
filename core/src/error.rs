//! Error types for prompt building and repair runs.
//!
//! Prompt-build failures are contract violations by the caller and surface
//! immediately. Backend flakiness never appears here when the backend is
//! wrapped with the retry policy; it degrades to the sentinel response
//! instead.

use runbook_backend::BackendError;
use thiserror::Error;

/// Prompt template build failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromptError {
    #[error("template {template}: missing required field {field}")]
    MissingField {
        template: &'static str,
        field: String,
    },

    #[error("template {template}: {cause}")]
    MalformedTemplate {
        template: &'static str,
        cause: String,
    },
}

/// Structured error type for repair operations.
#[derive(Error, Debug)]
pub enum RepairError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("search lookup failed: {cause}")]
    Search { cause: String },
}

/// Result type alias for repair operations.
pub type Result<T> = std::result::Result<T, RepairError>;
