//! Structured error types for corpus loading.
//!
//! Malformed records are not represented here: a record missing `title`,
//! `body`, or `comments` defaults those fields instead of failing the load.

use std::path::PathBuf;

use thiserror::Error;

/// Structured error type for retrieval operations.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("corpus file read failed: path={path:?}, cause={cause}")]
    CorpusRead { path: PathBuf, cause: String },

    #[error("corpus parse failed: {cause}")]
    CorpusParse { cause: String },
}

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
