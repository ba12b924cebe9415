//! External search boundary.

use async_trait::async_trait;

use crate::error::Result;

/// Capability of answering a free-text query with a reference text.
///
/// Assumed synchronous-in-sequence; retry, if any, is the implementor's
/// concern, not this layer's.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<String>;
}
