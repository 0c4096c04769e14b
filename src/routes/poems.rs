//! Poem routes: gallery, feed, save, likes, readings, sticker unlocks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::poem::{LikeOutcome, Poem, PoemDraft, PoemScope};
use crate::services::poems::{self as poem_svc, PoemError, PoemReading, StickerCatalog};
use crate::state::AppState;
use crate::store::{DEFAULT_PAGE_LIMIT, Page};

pub(crate) fn poem_error_to_status(err: &PoemError) -> StatusCode {
    match err {
        PoemError::Empty => StatusCode::BAD_REQUEST,
        PoemError::NotFound(_) => StatusCode::NOT_FOUND,
        PoemError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: &PoemError) -> StatusCode {
    let status = poem_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "poem request failed");
    }
    status
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl PageQuery {
    fn page(&self) -> Page {
        Page::new(self.offset.unwrap_or(0), self.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
    }
}

/// `GET /api/poems`: the caller's own poems, newest first.
pub async fn gallery(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Poem>>, StatusCode> {
    let poems = poem_svc::list_poems(state.poems.as_ref(), PoemScope::Mine, auth.user.id, query.page())
        .await
        .map_err(|e| reject(&e))?;
    Ok(Json(poems))
}

/// `GET /api/feed`: every poem, newest first.
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Poem>>, StatusCode> {
    let poems = poem_svc::list_poems(state.poems.as_ref(), PoemScope::Everyone, auth.user.id, query.page())
        .await
        .map_err(|e| reject(&e))?;
    Ok(Json(poems))
}

/// `POST /api/poems`: save the submitted layout.
pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<PoemDraft>,
) -> Result<(StatusCode, Json<Poem>), StatusCode> {
    let poem = poem_svc::save_poem(state.poems.as_ref(), &auth.user, draft)
        .await
        .map_err(|e| reject(&e))?;
    Ok((StatusCode::CREATED, Json(poem)))
}

/// `POST /api/poems/{id}/like`: toggle the caller's like.
pub async fn like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(poem_id): Path<Uuid>,
) -> Result<Json<LikeOutcome>, StatusCode> {
    let outcome = poem_svc::toggle_like(state.poems.as_ref(), poem_id, auth.user.id)
        .await
        .map_err(|e| reject(&e))?;
    Ok(Json(outcome))
}

/// `GET /api/poems/{id}/reading`: text, mood, and voice parameters.
pub async fn reading(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(poem_id): Path<Uuid>,
) -> Result<Json<PoemReading>, StatusCode> {
    let reading = poem_svc::reading(state.poems.as_ref(), poem_id)
        .await
        .map_err(|e| reject(&e))?;
    Ok(Json(reading))
}

/// `GET /api/stickers`: sticker kinds with the caller's unlock state.
pub async fn stickers(State(state): State<AppState>, auth: AuthUser) -> Result<Json<StickerCatalog>, StatusCode> {
    let catalog = poem_svc::sticker_catalog(state.poems.as_ref(), auth.user.id)
        .await
        .map_err(|e| reject(&e))?;
    Ok(Json(catalog))
}

#[cfg(test)]
#[path = "poems_test.rs"]
mod tests;
