//! Poem save, listing, likes, and readings.
//!
//! DESIGN
//! ======
//! The only validation on save is "at least one magnet". Everything else a
//! client submits is stored as-is. Readings are derived on demand from the
//! stored placements: words in reading order plus the detected mood and the
//! voice parameters that mood implies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canvas::stickers::{self, StickerUnlock};
use crate::canvas::{Mood, detect_mood, poem_text};
use crate::poem::{LikeOutcome, Poem, PoemDraft, PoemScope, User};
use crate::store::{MAX_PAGE_LIMIT, Page, PoemStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PoemError {
    #[error("a poem needs at least one magnet")]
    Empty,
    #[error("poem not found: {0}")]
    NotFound(Uuid),
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for PoemError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PoemNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// What a voice reading of a poem needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemReading {
    pub text: String,
    pub mood: Mood,
    pub pitch: f64,
    pub speed: f64,
}

impl PoemReading {
    #[must_use]
    pub fn of(poem: &Poem) -> Self {
        let mood = detect_mood(poem.magnets.iter().map(|m| m.text.as_str()));
        let params = mood.voice_params();
        Self { text: poem_text(&poem.magnets), mood, pitch: params.pitch, speed: params.speed }
    }
}

/// Sticker catalog annotated for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StickerCatalog {
    pub like_total: i64,
    pub stickers: Vec<StickerUnlock>,
}

/// Persist `draft` as a new poem owned by `author`.
pub async fn save_poem(store: &dyn PoemStore, author: &User, draft: PoemDraft) -> Result<Poem, PoemError> {
    if draft.is_empty() {
        return Err(PoemError::Empty);
    }
    let poem = Poem::from_draft(author.id, &author.email, draft);
    store.insert_poem(&poem).await?;
    tracing::info!(poem_id = %poem.id, owner_id = %author.id, words = poem.magnets.len(), "poem saved");
    Ok(poem)
}

pub async fn list_poems(
    store: &dyn PoemStore,
    scope: PoemScope,
    viewer: Uuid,
    page: Page,
) -> Result<Vec<Poem>, PoemError> {
    Ok(store.list_poems(scope, viewer, page).await?)
}

/// Every poem in `scope`, newest first, fetched in `MAX_PAGE_LIMIT` pages
/// until a short page comes back.
pub async fn list_all_poems(store: &dyn PoemStore, scope: PoemScope, viewer: Uuid) -> Result<Vec<Poem>, PoemError> {
    let mut poems = Vec::new();
    loop {
        let page = store
            .list_poems(scope, viewer, Page::new(poems.len(), MAX_PAGE_LIMIT))
            .await?;
        let last = page.len() < MAX_PAGE_LIMIT;
        poems.extend(page);
        if last {
            return Ok(poems);
        }
    }
}

pub async fn toggle_like(store: &dyn PoemStore, poem_id: Uuid, viewer: Uuid) -> Result<LikeOutcome, PoemError> {
    let outcome = store.toggle_like(poem_id, viewer).await?;
    tracing::debug!(%poem_id, liked = outcome.liked, likes = outcome.likes, "like toggled");
    Ok(outcome)
}

pub async fn reading(store: &dyn PoemStore, poem_id: Uuid) -> Result<PoemReading, PoemError> {
    let poem = store
        .get_poem(poem_id)
        .await?
        .ok_or(PoemError::NotFound(poem_id))?;
    Ok(PoemReading::of(&poem))
}

pub async fn sticker_catalog(store: &dyn PoemStore, viewer: Uuid) -> Result<StickerCatalog, PoemError> {
    let like_total = store.like_total(viewer).await?;
    Ok(StickerCatalog { like_total, stickers: stickers::catalog_for(like_total) })
}

#[cfg(test)]
#[path = "poems_test.rs"]
mod tests;
