//! Generation backend capability and provider clients.
//!
//! A backend maps `(prompt, system_instruction)` to a response string and
//! may fail for any transport or service reason; the retry wrapper in
//! [`retry`] absorbs those failures into a sentinel response so callers
//! upstream never crash on backend flakiness.

use std::sync::Arc;

use async_trait::async_trait;

pub mod config;
pub mod error;
pub mod providers;
pub mod retry;

pub use config::BackendConfig;
pub use config::ProviderKind;
pub use error::BackendError;
pub use error::Result;
pub use providers::AnthropicBackend;
pub use providers::GeminiBackend;
pub use providers::OpenAiBackend;
pub use retry::DEGRADED_RESPONSE;
pub use retry::RetryPolicy;
pub use retry::Retrying;
pub use retry::is_degraded;

/// Capability of mapping a prompt to a response string.
///
/// Implementations may fail for any transport or backend reason; no
/// contract on the error shape is relied upon beyond [`BackendError`].
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Generate a response for `prompt` under `system_instruction`.
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String>;
}

#[async_trait]
impl<B: GenerationBackend + ?Sized> GenerationBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        (**self).generate(prompt, system_instruction).await
    }
}

#[async_trait]
impl<B: GenerationBackend + ?Sized> GenerationBackend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        (**self).generate(prompt, system_instruction).await
    }
}

/// Construct the provider implementation selected by `config`.
pub fn backend_from_config(config: BackendConfig) -> Result<Box<dyn GenerationBackend>> {
    match config.provider {
        ProviderKind::Anthropic => Ok(Box::new(AnthropicBackend::new(config)?)),
        ProviderKind::OpenAi => Ok(Box::new(OpenAiBackend::new(config)?)),
        ProviderKind::Gemini => Ok(Box::new(GeminiBackend::new(config)?)),
    }
}
