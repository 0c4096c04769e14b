//! Upstream diagnostics.
//!
//! `check_fish_audio` sends a minimal TTS request to verify the configured
//! key. It never fails: transport errors are reported in the body with
//! `status: 0`. Only the first four characters of the key are revealed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::tts::{DEFAULT_VOICE, TtsConfig, resolve_voice};

const PROBE_TIMEOUT_SECS: u64 = 10;
const SERVICE_NAME: &str = "Fish Audio API";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    pub starts_with: Option<String>,
    pub length: usize,
}

impl KeyInfo {
    #[must_use]
    pub fn of(key: Option<&str>) -> Self {
        match key {
            Some(key) => Self { starts_with: Some(key.chars().take(4).collect()), length: key.chars().count() },
            None => Self { starts_with: None, length: 0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub service: String,
    /// Upstream HTTP status, or 0 when no response was received.
    pub status: u16,
    pub success: bool,
    pub error: Option<String>,
    pub key_info: KeyInfo,
}

impl DiagnosticReport {
    fn failed(key_info: KeyInfo, error: String) -> Self {
        Self { service: SERVICE_NAME.to_owned(), status: 0, success: false, error: Some(error), key_info }
    }
}

/// Probe the Fish Audio endpoint with the configured key.
pub async fn check_fish_audio(config: &TtsConfig) -> DiagnosticReport {
    let key_info = KeyInfo::of(config.api_key.as_deref());
    let Some(api_key) = config.api_key.as_deref() else {
        return DiagnosticReport::failed(key_info, "FISH_AUDIO_API_KEY is not set".to_owned());
    };

    let http = match reqwest::Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .build()
    {
        Ok(http) => http,
        Err(e) => return DiagnosticReport::failed(key_info, e.to_string()),
    };

    let payload = serde_json::json!({
        "text": "test",
        "reference_id": resolve_voice(DEFAULT_VOICE, DEFAULT_VOICE),
        "format": "mp3",
    });

    tracing::info!(endpoint = %config.endpoint, "probing fish audio");
    let response = match http
        .post(&config.endpoint)
        .bearer_auth(api_key)
        .json(&payload)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "fish audio probe failed");
            return DiagnosticReport::failed(key_info, e.to_string());
        }
    };

    let status = response.status().as_u16();
    let error = if status == 200 {
        None
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status, %body, "fish audio probe rejected");
        Some(body)
    };

    DiagnosticReport { service: SERVICE_NAME.to_owned(), status, success: status == 200, error, key_info }
}

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod tests;
