//! LLM Client: the single point of entry for all Gemini API calls in Folio.
//!
//! No other module may call the generation API directly.
//! One attempt per request: failures surface to the caller, nothing is retried.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error};

pub mod prompts;
pub mod types;

pub use types::{Content, GenerateContentRequest, GenerationConfig, Part, Role};

use types::{ApiErrorEnvelope, GenerateContentResponse};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY not found in environment variables.")]
    MissingApiKey,

    #[error("Gemini API request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Non-success status; `message` is the upstream's own message when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response structure from Gemini API")]
    InvalidResponse,
}

// The request URL carries the credential, so it never reaches messages or logs.
impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Http(e.without_url())
    }
}

/// Thin wrapper over Gemini's `generateContent` endpoint.
/// The credential is passed as the `key` query parameter.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends one `generateContent` call and returns the first candidate's text.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        debug!(
            model = %self.model,
            turns = request.contents.len(),
            structured = request.generation_config.is_some(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Gemini API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: upstream_error_message(status.as_u16(), &body),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|_| LlmError::InvalidResponse)?;

        let text = parsed.text().ok_or(LlmError::InvalidResponse)?;
        debug!(chars = text.len(), "generateContent call succeeded");
        Ok(text.to_string())
    }
}

/// Extracts `error.message` from an upstream error body, or falls back to a
/// status-coded message when the body is absent or not in that shape.
fn upstream_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Gemini API request failed with status {status}"))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
