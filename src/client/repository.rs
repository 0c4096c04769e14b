//! Poem persistence as seen by the view model.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::ClientError;
use crate::poem::{LikeOutcome, Poem, PoemDraft, PoemScope, User};
use crate::services::{poems, words};
use crate::store::PoemStore;

/// The operations the poetry view needs from a backend.
#[async_trait]
pub trait PoemRepository: Send + Sync {
    /// A freshly sampled word bank. Empty when no words are configured.
    async fn word_bank(&self) -> Result<Vec<String>, ClientError>;

    async fn save_poem(&self, draft: PoemDraft) -> Result<Poem, ClientError>;

    /// Poems newest first: the viewer's own (`Mine`) or everyone's.
    async fn list_poems(&self, scope: PoemScope) -> Result<Vec<Poem>, ClientError>;

    async fn toggle_like(&self, poem_id: Uuid) -> Result<LikeOutcome, ClientError>;

    /// Likes summed over the viewer's poems. Drives sticker unlocks.
    async fn like_total(&self) -> Result<i64, ClientError>;
}

/// In-process repository acting as `user` directly against a store.
pub struct LocalRepository {
    store: Arc<dyn PoemStore>,
    user: User,
}

impl LocalRepository {
    #[must_use]
    pub fn new(store: Arc<dyn PoemStore>, user: User) -> Self {
        Self { store, user }
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }
}

fn service_error(err: impl std::fmt::Display) -> ClientError {
    ClientError::Service(err.to_string())
}

#[async_trait]
impl PoemRepository for LocalRepository {
    async fn word_bank(&self) -> Result<Vec<String>, ClientError> {
        Ok(words::word_bank(self.store.as_ref()).await)
    }

    async fn save_poem(&self, draft: PoemDraft) -> Result<Poem, ClientError> {
        poems::save_poem(self.store.as_ref(), &self.user, draft)
            .await
            .map_err(service_error)
    }

    async fn list_poems(&self, scope: PoemScope) -> Result<Vec<Poem>, ClientError> {
        poems::list_all_poems(self.store.as_ref(), scope, self.user.id)
            .await
            .map_err(service_error)
    }

    async fn toggle_like(&self, poem_id: Uuid) -> Result<LikeOutcome, ClientError> {
        poems::toggle_like(self.store.as_ref(), poem_id, self.user.id)
            .await
            .map_err(service_error)
    }

    async fn like_total(&self) -> Result<i64, ClientError> {
        self.store
            .like_total(self.user.id)
            .await
            .map_err(service_error)
    }
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
