//! Session tokens.
//!
//! ARCHITECTURE
//! ============
//! Sign-in creates an opaque 32-byte hex token stored through
//! `AccountStore`. The HTTP layer carries it in the `session_token` cookie
//! or an `Authorization: Bearer` header; both resolve here.

use std::fmt::Write;

use rand::Rng;
use uuid::Uuid;

use crate::poem::User;
use crate::store::{AccountStore, StoreError};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a session for the given user, returning the token.
pub async fn create_session(accounts: &dyn AccountStore, user_id: Uuid) -> Result<String, StoreError> {
    let token = generate_token();
    accounts.create_session(&token, user_id).await?;
    Ok(token)
}

/// Resolve a session token to its user. Blank tokens never hit the store.
pub async fn validate_session(accounts: &dyn AccountStore, token: &str) -> Result<Option<User>, StoreError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }
    accounts.session_user(token).await
}

pub async fn delete_session(accounts: &dyn AccountStore, token: &str) -> Result<(), StoreError> {
    accounts.delete_session(token).await
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
