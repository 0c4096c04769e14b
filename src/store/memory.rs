//! In-process store: every record lives behind one `RwLock`.

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, Page, PoemStore, SESSION_TTL_MS, StoreError};
use crate::poem::{LikeOutcome, Poem, PoemScope, User, WordCategories, now_ms};

struct StoredUser {
    user: User,
    password_hash: String,
}

struct StoredSession {
    user_id: Uuid,
    expires_at: i64,
}

#[derive(Default)]
struct MemoryInner {
    users: HashMap<Uuid, StoredUser>,
    user_ids_by_email: HashMap<String, Uuid>,
    sessions: HashMap<String, StoredSession>,
    words: Option<WordCategories>,
    poems: HashMap<Uuid, Poem>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a word-category record.
    #[must_use]
    pub fn with_words(words: WordCategories) -> Self {
        Self { inner: RwLock::new(MemoryInner { words: Some(words), ..MemoryInner::default() }) }
    }
}

#[async_trait]
impl PoemStore for MemoryStore {
    async fn word_categories(&self) -> Result<Option<WordCategories>, StoreError> {
        Ok(self.inner.read().await.words.clone())
    }

    async fn put_word_categories(&self, categories: &WordCategories) -> Result<(), StoreError> {
        self.inner.write().await.words = Some(categories.clone());
        Ok(())
    }

    async fn insert_poem(&self, poem: &Poem) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .poems
            .insert(poem.id, poem.clone());
        Ok(())
    }

    async fn get_poem(&self, id: Uuid) -> Result<Option<Poem>, StoreError> {
        Ok(self.inner.read().await.poems.get(&id).cloned())
    }

    async fn list_poems(&self, scope: PoemScope, viewer: Uuid, page: Page) -> Result<Vec<Poem>, StoreError> {
        let inner = self.inner.read().await;
        let mut poems: Vec<&Poem> = inner
            .poems
            .values()
            .filter(|p| scope == PoemScope::Everyone || p.owner_id == viewer)
            .collect();
        poems.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(poems
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect())
    }

    async fn toggle_like(&self, poem_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, StoreError> {
        let mut inner = self.inner.write().await;
        let poem = inner
            .poems
            .get_mut(&poem_id)
            .ok_or(StoreError::PoemNotFound(poem_id))?;
        let liked = poem.toggle_like(user_id);
        Ok(LikeOutcome { poem_id, liked, likes: poem.likes, liked_by: poem.liked_by.clone() })
    }

    async fn like_total(&self, owner_id: Uuid) -> Result<i64, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .poems
            .values()
            .filter(|p| p.owner_id == owner_id)
            .map(|p| p.likes)
            .sum())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.user_ids_by_email.contains_key(email) {
            return Err(StoreError::EmailTaken(email.to_owned()));
        }
        let user = User { id: Uuid::new_v4(), email: email.to_owned() };
        inner.user_ids_by_email.insert(email.to_owned(), user.id);
        inner
            .users
            .insert(user.id, StoredUser { user: user.clone(), password_hash: password_hash.to_owned() });
        Ok(user)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .user_ids_by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .map(|stored| (stored.user.clone(), stored.password_hash.clone())))
    }

    async fn create_session(&self, token: &str, user_id: Uuid) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .sessions
            .insert(token.to_owned(), StoredSession { user_id, expires_at: now_ms() + SESSION_TTL_MS });
        Ok(())
    }

    async fn session_user(&self, token: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        let Some(session) = inner.sessions.get(token) else {
            return Ok(None);
        };
        if session.expires_at <= now_ms() {
            return Ok(None);
        }
        Ok(inner.users.get(&session.user_id).map(|u| u.user.clone()))
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.inner.write().await.sessions.remove(token);
        Ok(())
    }
}
