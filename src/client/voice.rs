//! Speech and analysis as seen by the view model.

use async_trait::async_trait;

use super::ClientError;
use crate::canvas::{detect_mood, poem_text};
use crate::poem::PlacedMagnet;
use crate::services::analysis::PoemAnalysis;
use crate::services::tts::TtsRequest;

#[async_trait]
pub trait VoiceApi: Send + Sync {
    /// Synthesize `request` and return a playable audio URL.
    async fn tts(&self, request: &TtsRequest) -> Result<String, ClientError>;

    async fn analyze(&self, text: &str) -> Result<PoemAnalysis, ClientError>;
}

/// TTS request for a poem: words in reading order, voice shaped by mood.
#[must_use]
pub fn reading_request(magnets: &[PlacedMagnet], voice_name: &str) -> TtsRequest {
    let params = detect_mood(magnets.iter().map(|m| m.text.as_str())).voice_params();
    TtsRequest {
        text: poem_text(magnets),
        pitch: params.pitch,
        speed: params.speed,
        voice_name: voice_name.to_owned(),
    }
}

#[cfg(test)]
#[path = "voice_test.rs"]
mod tests;
