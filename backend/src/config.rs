//! Backend selection and client configuration.
//!
//! The provider is a closed enum chosen once at construction time. Nothing
//! inspects model identifier strings to guess a provider.

use std::time::Duration;

use crate::error::BackendError;
use crate::error::Result;

/// The closed set of generation service providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Environment variable holding this provider's API key.
    pub const fn api_key_env(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Configuration for a generation backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Which provider implementation to construct.
    pub provider: ProviderKind,

    /// Model identifier passed through to the provider.
    pub model: String,

    /// API key for authentication.
    pub api_key: String,

    /// Override for the provider's base URL (used by tests and proxies).
    pub base_url: Option<String>,

    /// Request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Default timeout (10 minutes for long-running requests).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

    /// Create a new backend configuration.
    pub fn new(
        provider: ProviderKind,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Create a configuration reading the API key from the provider's
    /// environment variable.
    pub fn from_env(provider: ProviderKind, model: impl Into<String>) -> Result<Self> {
        let env = provider.api_key_env();
        let api_key = std::env::var(env)
            .map_err(|_| BackendError::Configuration(format!("missing {env} environment variable")))?;
        Ok(Self::new(provider, model, api_key))
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
