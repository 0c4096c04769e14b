//! Persistence seam for poems, words, accounts, and sessions.
//!
//! ARCHITECTURE
//! ============
//! Route handlers and services only see the `PoemStore` and `AccountStore`
//! traits. `PgStore` backs them with Postgres; `MemoryStore` keeps everything
//! in process and doubles as the fake in tests and as the fallback when no
//! `DATABASE_URL` is configured.
//!
//! INVARIANTS
//! ==========
//! - Listings are newest first (`created_at` DESC, ties by id DESC).
//! - `toggle_like` is atomic per call and keeps `likes == liked_by.len()`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::poem::{LikeOutcome, Poem, PoemScope, User, WordCategories};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Default and maximum page sizes for poem listings.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 200;

/// Session lifetime, matching the `sessions.expires_at` column default.
pub const SESSION_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("poem not found: {0}")]
    PoemNotFound(Uuid),
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("stored record is malformed: {0}")]
    Malformed(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Offset/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    /// Build a page, clamping `limit` into `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit: limit.clamp(1, MAX_PAGE_LIMIT) }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { offset: 0, limit: DEFAULT_PAGE_LIMIT }
    }
}

/// Poem and word-bank persistence.
#[async_trait]
pub trait PoemStore: Send + Sync {
    /// The shared word-category record, if one has been stored.
    async fn word_categories(&self) -> Result<Option<WordCategories>, StoreError>;

    /// Replace the shared word-category record.
    async fn put_word_categories(&self, categories: &WordCategories) -> Result<(), StoreError>;

    async fn insert_poem(&self, poem: &Poem) -> Result<(), StoreError>;

    async fn get_poem(&self, id: Uuid) -> Result<Option<Poem>, StoreError>;

    /// Poems newest first. `Mine` restricts to `viewer`'s own poems.
    async fn list_poems(&self, scope: PoemScope, viewer: Uuid, page: Page) -> Result<Vec<Poem>, StoreError>;

    /// Toggle `user_id` in the poem's `liked_by` set and adjust `likes`.
    async fn toggle_like(&self, poem_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, StoreError>;

    /// Sum of likes across every poem owned by `owner_id`.
    async fn like_total(&self, owner_id: Uuid) -> Result<i64, StoreError>;
}

/// Users and sessions.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create a user. Fails with `EmailTaken` if the email exists.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Look up a user and their stored password hash by email.
    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>, StoreError>;

    async fn create_session(&self, token: &str, user_id: Uuid) -> Result<(), StoreError>;

    /// Resolve an unexpired session token to its user.
    async fn session_user(&self, token: &str) -> Result<Option<User>, StoreError>;

    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;
}
