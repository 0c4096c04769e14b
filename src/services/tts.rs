//! Text-to-speech through Fish Audio.
//!
//! ARCHITECTURE
//! ============
//! `SpeechSynth` is the seam: `FishAudioClient` posts to the Fish Audio TTS
//! endpoint and returns mp3 bytes; tests substitute a mock. `generate_audio`
//! stores the bytes as `{uuid}.mp3` under the audio directory and hands back
//! a public URL served by `GET /audio/{id}`.
//!
//! Voices are addressed by friendly name. Unknown names fall back to the
//! default `poem` voice rather than failing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{env_parse, env_string};

pub const DEFAULT_ENDPOINT: &str = "https://api.fish.audio/v1/tts";
pub const DEFAULT_VOICE: &str = "poem";
pub const DEFAULT_TTS_REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Friendly voice name to Fish Audio reference model id.
pub const VOICE_MODELS: &[(&str, &str)] = &[
    ("poem", "2253ebf60c844c36addfd8939f12e5c2"),
    ("poem2", "b66ab2250cc840e1974c53ffa0196d4b"),
    ("spongebob", "54e3a85ac9594ffa83264b8a494b901b"),
    ("horror", "ef9c79b62ef34530bf452c0e50e3c260"),
    ("alle", "59e9dc1cb20c452584788a2690c80970"),
    ("king_von", "15f5e9388ddd4d7cafebb98e0cae8b8e"),
    ("cringe", "e9325769eb0b4ba688c8e36fee36e7ae"),
];

// =============================================================================
// ERRORS AND CONFIG
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("text-to-speech is not configured")]
    NotConfigured,
    #[error("nothing to read")]
    EmptyText,
    #[error("TTS request failed: {0}")]
    Request(String),
    #[error("TTS upstream error: status {status}")]
    Upstream { status: u16, body: String },
    #[error("TTS upstream returned empty audio")]
    EmptyAudio,
    #[error("audio not found")]
    AudioNotFound,
    #[error("audio storage failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsConfig {
    /// `None` disables synthesis.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub default_voice: String,
    pub request_timeout_secs: u64,
}

impl TtsConfig {
    /// Read `FISH_AUDIO_API_KEY`, `FISH_AUDIO_ENDPOINT`, `TTS_DEFAULT_VOICE`
    /// and `TTS_REQUEST_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: env_string("FISH_AUDIO_API_KEY"),
            endpoint: env_string("FISH_AUDIO_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            default_voice: env_string("TTS_DEFAULT_VOICE").unwrap_or_else(|| DEFAULT_VOICE.to_owned()),
            request_timeout_secs: env_parse("TTS_REQUEST_TIMEOUT_SECS", DEFAULT_TTS_REQUEST_TIMEOUT_SECS),
        }
    }

    /// A config with synthesis disabled.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            default_voice: DEFAULT_VOICE.to_owned(),
            request_timeout_secs: DEFAULT_TTS_REQUEST_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

fn default_rate() -> f64 {
    1.0
}

/// Body of `POST /api/tts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default = "default_rate")]
    pub pitch: f64,
    #[serde(default = "default_rate")]
    pub speed: f64,
    /// Blank or unknown names use the configured default voice.
    #[serde(default)]
    pub voice_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtsResponse {
    pub audio_url: String,
}

/// Reference model id for `name`, falling back to `fallback`, then to the
/// first table entry.
#[must_use]
pub fn resolve_voice(name: &str, fallback: &str) -> &'static str {
    VOICE_MODELS
        .iter()
        .find(|(voice, _)| *voice == name)
        .or_else(|| VOICE_MODELS.iter().find(|(voice, _)| *voice == fallback))
        .map_or(VOICE_MODELS[0].1, |(_, id)| *id)
}

#[must_use]
pub fn voice_names() -> Vec<&'static str> {
    VOICE_MODELS.iter().map(|(name, _)| *name).collect()
}

// =============================================================================
// SYNTH SEAM
// =============================================================================

/// Turns text into encoded audio. Enables mocking in tests.
#[async_trait::async_trait]
pub trait SpeechSynth: Send + Sync {
    /// Synthesize `request` and return mp3 bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`TtsError`] if the upstream call fails.
    async fn synthesize(&self, request: &TtsRequest) -> Result<Vec<u8>, TtsError>;
}

#[derive(Serialize)]
struct Prosody {
    speed: f64,
    volume: i32,
}

#[derive(Serialize)]
struct FishPayload<'a> {
    text: &'a str,
    reference_id: &'a str,
    temperature: f64,
    top_p: f64,
    prosody: Prosody,
    chunk_length: u32,
    normalize: bool,
    format: &'a str,
    latency: &'a str,
}

pub struct FishAudioClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    default_voice: String,
}

impl FishAudioClient {
    /// Build a client from config. Returns `Ok(None)` when no key is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &TtsConfig) -> Result<Option<Self>, TtsError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TtsError::Request(e.to_string()))?;
        Ok(Some(Self {
            http,
            api_key,
            endpoint: config.endpoint.clone(),
            default_voice: config.default_voice.clone(),
        }))
    }
}

#[async_trait::async_trait]
impl SpeechSynth for FishAudioClient {
    async fn synthesize(&self, request: &TtsRequest) -> Result<Vec<u8>, TtsError> {
        let reference_id = resolve_voice(&request.voice_name, &self.default_voice);
        let payload = FishPayload {
            text: &request.text,
            reference_id,
            temperature: 0.9,
            top_p: 0.9,
            prosody: Prosody { speed: request.speed, volume: 0 },
            chunk_length: 200,
            normalize: true,
            format: "mp3",
            latency: "normal",
        };
        tracing::debug!(voice = %request.voice_name, %reference_id, "fish audio request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TtsError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Upstream { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TtsError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

// =============================================================================
// AUDIO STORAGE
// =============================================================================

fn audio_path(audio_dir: &Path, audio_id: Uuid) -> PathBuf {
    audio_dir.join(format!("{audio_id}.mp3"))
}

/// Synthesize `request`, store the mp3, and return its public URL.
///
/// # Errors
///
/// Fails on blank text, upstream errors, empty audio, or storage errors.
pub async fn generate_audio(
    synth: &dyn SpeechSynth,
    audio_dir: &Path,
    public_base_url: &str,
    request: &TtsRequest,
) -> Result<String, TtsError> {
    if request.text.trim().is_empty() {
        return Err(TtsError::EmptyText);
    }
    let audio = synth.synthesize(request).await?;
    if audio.is_empty() {
        return Err(TtsError::EmptyAudio);
    }

    let audio_id = Uuid::new_v4();
    tokio::fs::create_dir_all(audio_dir).await?;
    tokio::fs::write(audio_path(audio_dir, audio_id), &audio).await?;
    tracing::info!(%audio_id, bytes = audio.len(), voice = %request.voice_name, "audio stored");

    Ok(format!("{public_base_url}/audio/{audio_id}"))
}

/// Read a stored mp3. Ids that are not UUIDs are treated as missing.
///
/// # Errors
///
/// Returns `AudioNotFound` for unknown ids.
pub async fn read_audio(audio_dir: &Path, audio_id: &str) -> Result<Vec<u8>, TtsError> {
    let id = Uuid::parse_str(audio_id).map_err(|_| TtsError::AudioNotFound)?;
    match tokio::fs::read(audio_path(audio_dir, id)).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TtsError::AudioNotFound),
        Err(e) => Err(TtsError::Io(e)),
    }
}

#[cfg(test)]
#[path = "tts_test.rs"]
mod tests;
