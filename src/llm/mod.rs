//! LLM adapter used by poem analysis.
//!
//! `AnthropicClient` implements the `LlmChat` seam. Startup treats a missing
//! key as "analysis disabled", not as a fatal error.

pub mod anthropic;
pub mod config;
pub mod types;

pub use anthropic::AnthropicClient;
pub use config::LlmConfig;
pub use types::{Completion, LlmChat, LlmError, Prompt, Usage};
