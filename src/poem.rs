//! Poem model shared by the server, the stores, and the client view model.
//!
//! DESIGN
//! ======
//! A poem is an immutable snapshot of fridge placements. The only mutable
//! part after save is the like bookkeeping (`likes` / `liked_by`), and every
//! store keeps `likes == liked_by.len()`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
#[path = "poem_test.rs"]
mod tests;

// =============================================================================
// MAGNETS AND STICKERS
// =============================================================================

/// A word tile in the bank. `on_fridge` marks it as already placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnet {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub on_fridge: bool,
}

/// A word tile placed on the fridge at container-relative coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMagnet {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// A decorative sticker placed on the fridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: String,
    pub name: String,
    pub image_path: String,
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// POEMS
// =============================================================================

/// The layout submitted on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoemDraft {
    pub magnets: Vec<PlacedMagnet>,
    #[serde(default)]
    pub stickers: Vec<Sticker>,
}

impl PoemDraft {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.magnets.is_empty()
    }
}

/// A persisted poem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Author email, shown in the feed.
    pub author: String,
    pub magnets: Vec<PlacedMagnet>,
    #[serde(default)]
    pub stickers: Vec<Sticker>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub likes: i64,
    #[serde(default)]
    pub liked_by: Vec<Uuid>,
}

impl Poem {
    /// Build a new poem from a draft, stamped with the current time.
    #[must_use]
    pub fn from_draft(owner_id: Uuid, author: &str, draft: PoemDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            author: author.to_owned(),
            magnets: draft.magnets,
            stickers: draft.stickers,
            created_at: now_ms(),
            likes: 0,
            liked_by: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }

    /// Toggle `user_id` in `liked_by`, keeping `likes` equal to its length.
    /// Returns whether the user now likes the poem.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        let liked = if let Some(pos) = self.liked_by.iter().position(|id| *id == user_id) {
            self.liked_by.remove(pos);
            false
        } else {
            self.liked_by.push(user_id);
            true
        };
        self.likes = i64::try_from(self.liked_by.len()).unwrap_or(i64::MAX);
        liked
    }

    /// Adopt the store's like set wholesale. Likes from other viewers since
    /// the poem was listed are picked up too, so `likes == liked_by.len()`
    /// holds on the client copy as well.
    pub fn apply_like_outcome(&mut self, outcome: &LikeOutcome) {
        self.liked_by.clone_from(&outcome.liked_by);
        self.likes = i64::try_from(self.liked_by.len()).unwrap_or(i64::MAX);
    }
}

/// Which poems a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoemScope {
    /// The viewer's own poems (gallery).
    Mine,
    /// Every user's poems (feed).
    Everyone,
}

/// Result of a like toggle, as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOutcome {
    pub poem_id: Uuid,
    pub liked: bool,
    pub likes: i64,
    /// The full like set after the toggle.
    #[serde(default)]
    pub liked_by: Vec<Uuid>,
}

// =============================================================================
// WORDS AND USERS
// =============================================================================

/// The shared word-category record the bank is sampled from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCategories {
    #[serde(default)]
    pub nouns: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub conjunctions: Vec<String>,
}

impl WordCategories {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty() && self.verbs.is_empty() && self.adjectives.is_empty() && self.conjunctions.is_empty()
    }
}

/// Identity consumed by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
