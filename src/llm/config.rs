//! LLM settings read from the environment.
//!
//! The key is read from `ANTHROPIC_API_KEY` unless `LLM_API_KEY_ENV` names a
//! different variable.

use super::types::LlmError;
use crate::config::{env_parse, env_string};

pub const DEFAULT_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl LlmConfig {
    /// Defaults around an explicit key.
    #[must_use]
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            request_timeout_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Read the key plus `LLM_MODEL`, `LLM_ENDPOINT`,
    /// `LLM_REQUEST_TIMEOUT_SECS` and `LLM_CONNECT_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `NoApiKey` naming the variable that should hold the key.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = env_string("LLM_API_KEY_ENV").unwrap_or_else(|| DEFAULT_KEY_VAR.to_owned());
        let Some(api_key) = env_string(&key_var) else {
            return Err(LlmError::NoApiKey { var: key_var });
        };

        let defaults = Self::with_key(api_key);
        Ok(Self {
            model: env_string("LLM_MODEL").unwrap_or(defaults.model),
            endpoint: env_string("LLM_ENDPOINT").unwrap_or(defaults.endpoint),
            request_timeout_secs: env_parse("LLM_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            connect_timeout_secs: env_parse("LLM_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
            api_key: defaults.api_key,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
