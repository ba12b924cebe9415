//! OpenAI chat completions client.

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::error_for_status;
use crate::GenerationBackend;
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Backend speaking the OpenAI chat completions API.
pub struct OpenAiBackend {
    http: reqwest::Client,
    config: BackendConfig,
}

impl OpenAiBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BackendError::Configuration(
                "API key is required".to_string(),
            ));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url());
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status("openai", response).await);
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(BackendError::EmptyResponse {
                provider: "openai",
                cause: "no choices with message content".to_string(),
            })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
