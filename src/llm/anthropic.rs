//! Anthropic Messages API client.
//!
//! Sends one system prompt and one user turn to `/v1/messages` and joins the
//! text blocks of the reply. Body decoding lives in `parse_completion` so it
//! can be tested without a network.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{Completion, LlmChat, LlmError, Prompt, Usage};

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns `NoApiKey` when no key is configured, or `Transport` if the
    /// HTTP client cannot be built.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(&LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for AnthropicClient {
    async fn complete(&self, prompt: &Prompt) -> Result<Completion, LlmError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request_body(&self.model, prompt))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        if status != 200 {
            tracing::warn!(status, model = %self.model, "anthropic request rejected");
            return Err(LlmError::Upstream { status, body });
        }

        parse_completion(&body)
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: [WireMessage<'a>; 1],
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct WireResponse {
    content: Vec<WireBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

fn request_body<'a>(model: &'a str, prompt: &'a Prompt) -> WireRequest<'a> {
    WireRequest {
        model,
        max_tokens: prompt.max_tokens,
        system: &prompt.system,
        messages: [WireMessage { role: "user", content: &prompt.user }],
    }
}

fn parse_completion(body: &str) -> Result<Completion, LlmError> {
    let wire: WireResponse = serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;

    let text: String = wire
        .content
        .into_iter()
        .filter_map(|block| match block {
            WireBlock::Text { text } => Some(text),
            WireBlock::Other => None,
        })
        .collect();
    if text.trim().is_empty() {
        return Err(LlmError::EmptyReply);
    }

    Ok(Completion { text, model: wire.model, stop_reason: wire.stop_reason, usage: wire.usage })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
