//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Persistence sits behind the `PoemStore`/`AccountStore` traits so the same
//! router runs over Postgres in production and the in-memory store in tests
//! or when no database is configured. Upstream collaborators (LLM, speech
//! synthesis) are optional; handlers answer 503 when theirs is absent.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::analysis::DEFAULT_ANALYSIS_MAX_TOKENS;
use crate::services::tts::{SpeechSynth, TtsConfig};
use crate::store::{AccountStore, PoemStore};

/// Shared application state. Clone is required by Axum; every field is
/// `Arc`-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub poems: Arc<dyn PoemStore>,
    pub accounts: Arc<dyn AccountStore>,
    /// `None` when no LLM key is configured; analysis answers 503.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// `None` when no Fish Audio key is configured; TTS answers 503.
    pub tts: Option<Arc<dyn SpeechSynth>>,
    pub tts_config: TtsConfig,
    pub rate_limiter: RateLimiter,
    pub config: ServerConfig,
    pub analysis_max_tokens: u32,
}

impl AppState {
    /// State over one backend that serves both poems and accounts.
    #[must_use]
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: PoemStore + AccountStore + 'static,
    {
        Self {
            poems: store.clone(),
            accounts: store,
            llm: None,
            tts: None,
            tts_config: TtsConfig::disabled(),
            rate_limiter: RateLimiter::default(),
            config,
            analysis_max_tokens: DEFAULT_ANALYSIS_MAX_TOKENS,
        }
    }

    #[must_use]
    pub fn with_llm(mut self, llm: Option<Arc<dyn LlmChat>>, max_tokens: u32) -> Self {
        self.llm = llm;
        self.analysis_max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_tts(mut self, tts: Option<Arc<dyn SpeechSynth>>, tts_config: TtsConfig) -> Self {
        self.tts = tts;
        self.tts_config = tts_config;
        self
    }

    #[must_use]
    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
