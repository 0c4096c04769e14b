//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` before calling [`ServerConfig::from_env`].
//! Feature-specific settings (TTS, LLM, rate limits) live next to the code
//! that uses them and are read through the same helpers.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUDIO_DIR: &str = "temp_audio";

/// Parse `key` as `T`, falling back to `default` when unset or invalid.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Parse a boolean flag. Accepts `1/true/yes/on` and `0/false/no/off`.
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// A non-empty, trimmed env var.
pub(crate) fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Prefix for audio URLs handed back to clients, without trailing slash.
    pub public_base_url: String,
    pub audio_dir: PathBuf,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Read `PORT`, `DATABASE_URL`, `PUBLIC_BASE_URL`, `AUDIO_DIR` and
    /// `COOKIE_SECURE`.
    #[must_use]
    pub fn from_env() -> Self {
        let port = env_parse("PORT", DEFAULT_PORT);
        let public_base_url = env_string("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| public_base_url.starts_with("https://"));

        Self {
            port,
            database_url: env_string("DATABASE_URL"),
            public_base_url,
            audio_dir: env_string("AUDIO_DIR").map_or_else(|| PathBuf::from(DEFAULT_AUDIO_DIR), PathBuf::from),
            cookie_secure,
        }
    }

    /// Config for tests: in-memory store, audio under the OS temp dir.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
            audio_dir: std::env::temp_dir().join("fridge_test_audio"),
            cookie_secure: false,
        }
    }
}
