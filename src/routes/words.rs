//! Word bank routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::auth::AuthUser;
use crate::poem::WordCategories;
use crate::services::words;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct WordsResponse {
    pub words: Vec<String>,
}

/// `GET /api/words`: a freshly sampled word bank. Empty when the category
/// record is missing or unreadable.
pub async fn sample(State(state): State<AppState>) -> Json<WordsResponse> {
    Json(WordsResponse { words: words::word_bank(state.poems.as_ref()).await })
}

/// `GET /api/words/categories`: the stored category record.
pub async fn get_categories(State(state): State<AppState>) -> Result<Json<WordCategories>, StatusCode> {
    state
        .poems
        .word_categories()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "word categories read failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `PUT /api/words/categories`: replace the category record.
pub async fn put_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<WordCategories>,
) -> Result<Json<WordCategories>, StatusCode> {
    if body.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    state
        .poems
        .put_word_categories(&body)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "word categories write failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    tracing::info!(
        user_id = %auth.user.id,
        nouns = body.nouns.len(),
        verbs = body.verbs.len(),
        adjectives = body.adjectives.len(),
        conjunctions = body.conjunctions.len(),
        "word categories replaced"
    );
    Ok(Json(body))
}

#[cfg(test)]
#[path = "words_test.rs"]
mod tests;
