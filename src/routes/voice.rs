//! Voice routes: text-to-speech, stored audio, poem analysis, and the
//! Fish Audio key probe.
//!
//! TTS and analysis call paid upstreams, so both require a session and pass
//! through the rate limiter before any upstream work starts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::auth::AuthUser;
use crate::rate_limit::RateLimitError;
use crate::services::analysis::{self, AnalysisError, AnalysisRequest, PoemAnalysis};
use crate::services::diagnostics::{self, DiagnosticReport};
use crate::services::tts::{self, TtsError, TtsRequest, TtsResponse};
use crate::state::AppState;

pub(crate) fn tts_error_to_status(err: &TtsError) -> StatusCode {
    match err {
        TtsError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        TtsError::EmptyText => StatusCode::BAD_REQUEST,
        TtsError::Request(_) | TtsError::Upstream { .. } | TtsError::EmptyAudio => StatusCode::BAD_GATEWAY,
        TtsError::AudioNotFound => StatusCode::NOT_FOUND,
        TtsError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn analysis_error_to_status(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisError::EmptyPoem => StatusCode::BAD_REQUEST,
        AnalysisError::Llm(_) | AnalysisError::Parse(_) => StatusCode::BAD_GATEWAY,
    }
}

fn rate_limited(err: &RateLimitError, user: uuid::Uuid) -> StatusCode {
    tracing::warn!(error = %err, user_id = %user, "rate limited");
    StatusCode::TOO_MANY_REQUESTS
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

/// `GET /api/voices`: friendly voice names accepted by `/api/tts`.
pub async fn voices() -> Json<VoicesResponse> {
    Json(VoicesResponse { voices: tts::voice_names().into_iter().map(str::to_owned).collect() })
}

/// `POST /api/tts`: synthesize speech and return the stored audio URL.
pub async fn tts(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, StatusCode> {
    let Some(synth) = state.tts.clone() else {
        return Err(tts_error_to_status(&TtsError::NotConfigured));
    };
    state
        .rate_limiter
        .check_and_record(auth.user.id)
        .map_err(|e| rate_limited(&e, auth.user.id))?;

    let audio_url = tts::generate_audio(synth.as_ref(), &state.config.audio_dir, &state.config.public_base_url, &body)
        .await
        .map_err(|e| {
            let status = tts_error_to_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, user_id = %auth.user.id, "tts failed");
            }
            status
        })?;
    Ok(Json(TtsResponse { audio_url }))
}

/// `GET /audio/{id}`: a stored mp3.
pub async fn audio(State(state): State<AppState>, Path(audio_id): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    let bytes = tts::read_audio(&state.config.audio_dir, &audio_id)
        .await
        .map_err(|e| {
            let status = tts_error_to_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, %audio_id, "audio read failed");
            }
            status
        })?;
    Ok(([(CONTENT_TYPE, "audio/mpeg")], bytes))
}

/// `POST /api/analyze-poem`: LLM critique of the poem text.
pub async fn analyze(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<AnalysisRequest>,
) -> Result<Json<PoemAnalysis>, StatusCode> {
    let Some(llm) = state.llm.clone() else {
        return Err(analysis_error_to_status(&AnalysisError::NotConfigured));
    };
    state
        .rate_limiter
        .check_and_record(auth.user.id)
        .map_err(|e| rate_limited(&e, auth.user.id))?;

    let result = analysis::analyze_poem(llm.as_ref(), state.analysis_max_tokens, &body.text)
        .await
        .map_err(|e| {
            let status = analysis_error_to_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, user_id = %auth.user.id, "poem analysis failed");
            }
            status
        })?;
    Ok(Json(result))
}

/// `GET /api/debug/check-fish-audio`: probe the configured TTS key.
pub async fn check_fish_audio(State(state): State<AppState>) -> Json<DiagnosticReport> {
    Json(diagnostics::check_fish_audio(&state.tts_config).await)
}

#[cfg(test)]
#[path = "voice_test.rs"]
mod tests;
