//! Error taxonomy for generation backends.
//!
//! Every variant here is treated as transient by the retry wrapper: the
//! policy retries the identical request and degrades to a sentinel after
//! the attempt cap, so none of these escape a wrapped backend. Only
//! construction-time configuration problems surface to callers directly.

use thiserror::Error;

/// Structured error type for backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend configuration invalid: {0}")]
    Configuration(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("api error: provider={provider}, status={status}, message={message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("response missing expected content: provider={provider}, cause={cause}")]
    EmptyResponse {
        provider: &'static str,
        cause: String,
    },
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
