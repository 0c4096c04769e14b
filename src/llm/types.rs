//! Prompt and completion types shared by the client and its callers.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("no API key: set {var}")]
    NoApiKey { var: String },
    #[error("llm transport error: {0}")]
    Transport(String),
    #[error("llm upstream error: status {status}")]
    Upstream { status: u16, body: String },
    #[error("llm reply did not decode: {0}")]
    Decode(String),
    #[error("llm reply had no text")]
    EmptyReply,
}

/// A single-turn request: one system prompt, one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

impl Prompt {
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self { system: system.into(), user: user.into(), max_tokens: DEFAULT_MAX_TOKENS }
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// The model's reply with its text blocks already joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

impl Completion {
    /// True when the model stopped because it ran out of tokens.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.stop_reason.as_deref() == Some("max_tokens")
    }
}

/// Completion seam. Analysis is driven through this so tests can mock it.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, a non-200 reply, or a
    /// body without text.
    async fn complete(&self, prompt: &Prompt) -> Result<Completion, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
