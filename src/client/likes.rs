//! Optimistic like toggling.
//!
//! A toggle is applied to the local poem immediately, then reconciled with
//! the server's answer, or rolled back if the request failed. While a toggle
//! on a poem is in flight further toggles on that poem are refused.

use std::collections::HashSet;

use uuid::Uuid;

use super::ClientError;
use crate::poem::{LikeOutcome, Poem};

/// Snapshot taken when a toggle starts, used to roll it back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PendingLike {
    pub poem_id: Uuid,
    previous_likes: i64,
    previous_liked_by: Vec<Uuid>,
}

#[derive(Debug, Default)]
pub struct LikeTracker {
    in_flight: HashSet<Uuid>,
}

impl LikeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self, poem_id: Uuid) -> bool {
        self.in_flight.contains(&poem_id)
    }

    /// Apply the toggle optimistically. Returns `None` when a toggle on this
    /// poem is already in flight; the poem is left untouched.
    pub fn begin(&mut self, poem: &mut Poem, viewer: Uuid) -> Option<PendingLike> {
        if !self.in_flight.insert(poem.id) {
            return None;
        }
        let pending = PendingLike {
            poem_id: poem.id,
            previous_likes: poem.likes,
            previous_liked_by: poem.liked_by.clone(),
        };
        poem.toggle_like(viewer);
        Some(pending)
    }

    /// Settle a toggle: adopt the server's outcome, or restore the snapshot
    /// and hand the error back.
    ///
    /// # Errors
    ///
    /// Returns the request's error after rolling back.
    pub fn finish(
        &mut self,
        poem: Option<&mut Poem>,
        pending: PendingLike,
        result: Result<LikeOutcome, ClientError>,
    ) -> Result<(), ClientError> {
        self.in_flight.remove(&pending.poem_id);
        match result {
            Ok(outcome) => {
                if let Some(poem) = poem {
                    poem.apply_like_outcome(&outcome);
                }
                Ok(())
            }
            Err(err) => {
                if let Some(poem) = poem {
                    poem.liked_by = pending.previous_liked_by;
                    poem.likes = pending.previous_likes;
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "likes_test.rs"]
mod tests;
