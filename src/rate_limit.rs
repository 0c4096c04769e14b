//! In-memory rate limiting for upstream-backed requests (TTS and analysis).
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<Uuid, VecDeque<Instant>>`.
//! Two limits share one window:
//! - Per-user: 10 requests/min
//! - Global: 30 requests/min
//!
//! A rejected request is not recorded, so hammering a full window does not
//! extend it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::env_parse;

const DEFAULT_PER_USER_LIMIT: usize = 10;
const DEFAULT_GLOBAL_LIMIT: usize = 30;
const DEFAULT_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_user_limit: usize,
    pub global_limit: usize,
    pub window: Duration,
}

impl RateLimitConfig {
    /// Read `RATE_LIMIT_PER_USER`, `RATE_LIMIT_GLOBAL` and `RATE_LIMIT_WINDOW_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            per_user_limit: env_parse("RATE_LIMIT_PER_USER", DEFAULT_PER_USER_LIMIT),
            global_limit: env_parse("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            window: Duration::from_secs(env_parse("RATE_LIMIT_WINDOW_SECS", DEFAULT_WINDOW_SECS)),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_user_limit: DEFAULT_PER_USER_LIMIT,
            global_limit: DEFAULT_GLOBAL_LIMIT,
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("per-user rate limit exceeded (max {limit} requests/{window_secs}s)")]
    PerUserExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct RateLimiterInner {
    user_requests: HashMap<Uuid, VecDeque<Instant>>,
    global_requests: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(RateLimiterInner::default())), config }
    }

    /// Check both limits, then record the request.
    ///
    /// # Errors
    ///
    /// Returns which limit is exhausted.
    pub fn check_and_record(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.check_and_record_at(user_id, Instant::now())
    }

    fn check_and_record_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;
        let window_secs = cfg.window.as_secs();

        prune_window(&mut inner.global_requests, now, cfg.window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded { limit: cfg.global_limit, window_secs });
        }

        // Users with nothing left in the window are dropped, so the map never
        // holds more entries than the global window does.
        inner.user_requests.retain(|_, deque| {
            prune_window(deque, now, cfg.window);
            !deque.is_empty()
        });

        let user_deque = inner.user_requests.entry(user_id).or_default();
        if user_deque.len() >= cfg.per_user_limit {
            return Err(RateLimitError::PerUserExceeded { limit: cfg.per_user_limit, window_secs });
        }

        user_deque.push_back(now);
        inner.global_requests.push_back(now);
        Ok(())
    }
}

#[cfg(test)]
impl RateLimiter {
    fn tracked_users(&self) -> usize {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner).user_requests.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
