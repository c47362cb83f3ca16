//! Gemini text-completion client behind the `LlmClient` seam.
//!
//! Single-shot `generateContent` calls only; no streaming and no
//! function-calling surface. The API key travels in the `x-goog-api-key`
//! header so it never appears in URLs or logs.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;
use wayfarer_agent::llm::LlmClient;
use wayfarer_core::config::LlmConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm api key is not configured")]
    MissingApiKey,
    #[error("llm http client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("llm request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("llm returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("llm response contained no candidate text")]
    EmptyCompletion,
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or(LlmError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let payload: Value = response.json().await?;
        let text = extract_text(&payload).ok_or(LlmError::EmptyCompletion)?;
        debug!(model = %self.model, chars = text.len(), "llm completion received");
        Ok(text)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        Ok(self.generate(prompt).await?)
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

/// Concatenate the text parts of the first candidate. Returns `None` when the
/// payload has no usable candidate.
fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload
        .pointer("/candidates/0/content/parts")?
        .as_array()?;

    let text: String =
        parts.iter().filter_map(|part| part["text"].as_str()).collect::<Vec<_>>().join("");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{extract_text, request_body};

    #[test]
    fn request_body_wraps_prompt_in_contents() {
        let body = request_body("analyze this");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "analyze this");
    }

    #[test]
    fn extract_text_joins_candidate_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "traveler" }] }
            }]
        });

        assert_eq!(extract_text(&payload).as_deref(), Some("Hello traveler"));
    }

    #[test]
    fn extract_text_rejects_payload_without_candidates() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(
            extract_text(&json!({ "candidates": [{ "content": { "parts": [] } }] })),
            None
        );
    }

    #[test]
    fn extract_text_ignores_non_text_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png" } }, { "text": "ok" }] }
            }]
        });

        assert_eq!(extract_text(&payload).as_deref(), Some("ok"));
    }
}
