//! Postgres-backed store.
//!
//! DESIGN
//! ======
//! Runtime `sqlx::query` calls with manual row mapping. Magnet and sticker
//! layouts are JSONB columns; `liked_by` is a `UUID[]`. Like toggling is one
//! `UPDATE` that flips membership and adjusts `likes` in the same statement,
//! so concurrent toggles from different viewers never lose an update.

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{AccountStore, Page, PoemStore, StoreError};
use crate::poem::{LikeOutcome, Poem, PoemScope, User, WordCategories};

/// Row id of the single shared word-category record.
const WORD_CATEGORIES_ID: &str = "categorized_words";

const POEM_COLUMNS: &str = r"
    p.id, p.owner_id, u.email AS author, p.magnets, p.stickers,
    p.created_at, p.likes, p.liked_by";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_json<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Malformed(format!("{what}: {e}")))
}

fn encode_json<T: Serialize>(value: &T, what: &str) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Malformed(format!("{what}: {e}")))
}

fn poem_from_row(row: &PgRow) -> Result<Poem, StoreError> {
    Ok(Poem {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        author: row.get("author"),
        magnets: decode_json(row.get("magnets"), "poem magnets")?,
        stickers: decode_json(row.get("stickers"), "poem stickers")?,
        created_at: row.get("created_at"),
        likes: row.get("likes"),
        liked_by: row.get("liked_by"),
    })
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

// =============================================================================
// POEMS AND WORDS
// =============================================================================

#[async_trait]
impl PoemStore for PgStore {
    async fn word_categories(&self) -> Result<Option<WordCategories>, StoreError> {
        let row = sqlx::query("SELECT categories FROM word_categories WHERE id = $1")
            .bind(WORD_CATEGORIES_ID)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| decode_json(r.get("categories"), "word categories"))
            .transpose()
    }

    async fn put_word_categories(&self, categories: &WordCategories) -> Result<(), StoreError> {
        let value = encode_json(categories, "word categories")?;
        sqlx::query(
            r"INSERT INTO word_categories (id, categories, updated_at)
              VALUES ($1, $2, now())
              ON CONFLICT (id) DO UPDATE SET categories = EXCLUDED.categories, updated_at = now()",
        )
        .bind(WORD_CATEGORIES_ID)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_poem(&self, poem: &Poem) -> Result<(), StoreError> {
        let magnets = encode_json(&poem.magnets, "poem magnets")?;
        let stickers = encode_json(&poem.stickers, "poem stickers")?;
        sqlx::query(
            r"INSERT INTO poems (id, owner_id, magnets, stickers, created_at, likes, liked_by)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(poem.id)
        .bind(poem.owner_id)
        .bind(magnets)
        .bind(stickers)
        .bind(poem.created_at)
        .bind(poem.likes)
        .bind(poem.liked_by.as_slice())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_poem(&self, id: Uuid) -> Result<Option<Poem>, StoreError> {
        let sql = format!("SELECT {POEM_COLUMNS} FROM poems p JOIN users u ON u.id = p.owner_id WHERE p.id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(poem_from_row).transpose()
    }

    async fn list_poems(&self, scope: PoemScope, viewer: Uuid, page: Page) -> Result<Vec<Poem>, StoreError> {
        let sql = format!(
            r"SELECT {POEM_COLUMNS}
              FROM poems p
              JOIN users u ON u.id = p.owner_id
              WHERE ($1 OR p.owner_id = $2)
              ORDER BY p.created_at DESC, p.id DESC
              OFFSET $3 LIMIT $4"
        );
        let rows = sqlx::query(&sql)
            .bind(scope == PoemScope::Everyone)
            .bind(viewer)
            .bind(to_i64(page.offset))
            .bind(to_i64(page.limit))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(poem_from_row).collect()
    }

    async fn toggle_like(&self, poem_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, StoreError> {
        // SET expressions see the pre-update row; RETURNING sees the new one.
        let row = sqlx::query(
            r"UPDATE poems SET
                  liked_by = CASE WHEN $2 = ANY(liked_by)
                                  THEN array_remove(liked_by, $2)
                                  ELSE array_append(liked_by, $2) END,
                  likes    = CASE WHEN $2 = ANY(liked_by)
                                  THEN likes - 1
                                  ELSE likes + 1 END
              WHERE id = $1
              RETURNING likes, liked_by, ($2 = ANY(liked_by)) AS liked",
        )
        .bind(poem_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::PoemNotFound(poem_id))?;

        Ok(LikeOutcome {
            poem_id,
            liked: row.get("liked"),
            likes: row.get("likes"),
            liked_by: row.get("liked_by"),
        })
    }

    async fn like_total(&self, owner_id: Uuid) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COALESCE(SUM(likes), 0)::BIGINT AS total FROM poems WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }
}

// =============================================================================
// ACCOUNTS AND SESSIONS
// =============================================================================

#[async_trait]
impl AccountStore for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let row = sqlx::query(
            r"INSERT INTO users (email, password_hash)
              VALUES ($1, $2)
              ON CONFLICT (email) DO NOTHING
              RETURNING id, email",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::EmailTaken(email.to_owned()))?;

        Ok(User { id: row.get("id"), email: row.get("email") })
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>, StoreError> {
        let row = sqlx::query("SELECT id, email, password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| (User { id: r.get("id"), email: r.get("email") }, r.get("password_hash"))))
    }

    async fn create_session(&self, token: &str, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn session_user(&self, token: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r"SELECT u.id, u.email
              FROM sessions s
              JOIN users u ON u.id = s.user_id
              WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| User { id: r.get("id"), email: r.get("email") }))
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
