//! Provider client implementations behind [`crate::GenerationBackend`].

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::AnthropicBackend;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

use crate::error::BackendError;

/// Map a non-success HTTP response to an API error, keeping the body as
/// the message.
pub(crate) async fn error_for_status(
    provider: &'static str,
    response: reqwest::Response,
) -> BackendError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    BackendError::Api {
        provider,
        status,
        message,
    }
}
