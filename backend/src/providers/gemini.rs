//! Google Gemini generateContent client.

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::error_for_status;
use crate::GenerationBackend;
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Backend speaking the Gemini generateContent API.
pub struct GeminiBackend {
    http: reqwest::Client,
    config: BackendConfig,
}

impl GeminiBackend {
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
impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url(),
            urlencoding::encode(&self.config.model)
        );
        let body = GenerateRequest {
            system_instruction: PartList {
                parts: vec![TextPart {
                    text: system_instruction,
                }],
            },
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status("gemini", response).await);
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(BackendError::EmptyResponse {
                provider: "gemini",
                cause: "no candidates with text parts".to_string(),
            });
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    system_instruction: PartList<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct PartList<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}
