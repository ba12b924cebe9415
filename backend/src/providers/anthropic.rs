//! Anthropic messages API client.

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::error_for_status;
use crate::GenerationBackend;
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::error::Result;

/// API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Upper bound on generated tokens; repair responses are single commands.
const MAX_TOKENS: u32 = 4096;

/// Backend speaking the Anthropic messages API.
pub struct AnthropicBackend {
    http: reqwest::Client,
    config: BackendConfig,
}

impl AnthropicBackend {
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
impl GenerationBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url());
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            system: system_instruction,
            messages: vec![MessageParam {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status("anthropic", response).await);
        }

        let parsed: MessagesResponse = response.json().await?;
        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(BackendError::EmptyResponse {
                provider: "anthropic",
                cause: "no text content block".to_string(),
            })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::header;
    use wiremock::matchers::method;
    use wiremock::matchers::path;

    use super::*;
    use crate::config::ProviderKind;

    fn config(base_url: &str) -> BackendConfig {
        BackendConfig::new(ProviderKind::Anthropic, "test-model", "test-key").base_url(base_url)
    }

    #[tokio::test]
    async fn extracts_text_from_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "```bash\npip install -e .\n```"}]
            })))
            .mount(&server)
            .await;

        let backend = AnthropicBackend::new(config(&server.uri())).unwrap();
        let out = backend.generate("prompt", "system").await.unwrap();
        assert_eq!(out, "```bash\npip install -e .\n```");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let backend = AnthropicBackend::new(config(&server.uri())).unwrap();
        let err = backend.generate("prompt", "system").await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::Api {
                provider: "anthropic",
                status: 529,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_text_block_is_an_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let backend = AnthropicBackend::new(config(&server.uri())).unwrap();
        let err = backend.generate("prompt", "system").await.unwrap_err();
        assert!(matches!(err, BackendError::EmptyResponse { .. }));
    }
}
