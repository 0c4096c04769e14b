//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the JSON API, the stored audio files, and a health
//! probe. Handlers are grouped by concern: accounts, words, poems, and
//! voice (TTS, analysis, diagnostics). Every handler maps its service error
//! to a bare `StatusCode` through a `*_to_status` function.

pub mod auth;
pub mod poems;
pub mod voice;
pub mod words;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/words", get(words::sample))
        .route("/api/words/categories", get(words::get_categories).put(words::put_categories))
        .route("/api/poems", get(poems::gallery).post(poems::save))
        .route("/api/feed", get(poems::feed))
        .route("/api/poems/{id}/like", post(poems::like))
        .route("/api/poems/{id}/reading", get(poems::reading))
        .route("/api/stickers", get(poems::stickers))
        .route("/api/voices", get(voice::voices))
        .route("/api/tts", post(voice::tts))
        .route("/audio/{id}", get(voice::audio))
        .route("/api/analyze-poem", post(voice::analyze))
        .route("/api/debug/check-fish-audio", get(voice::check_fish_audio))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Poetry TTS API is running!" }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
