//! Email/password accounts.
//!
//! Passwords are stored as `{salt}${sha256(salt || password)}` with a random
//! 16-byte hex salt. Emails are trimmed and lowercased before every lookup.

use rand::Rng;
use sha2::{Digest, Sha256};

use super::session::{self, bytes_to_hex};
use crate::poem::User;
use crate::store::{AccountStore, StoreError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,
    #[error("email already registered")]
    EmailTaken,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken(_) => Self::EmailTaken,
            other => Self::Store(other),
        }
    }
}

/// A signed-in user and their fresh session token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignedIn {
    pub user: User,
    pub token: String,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = bytes_to_hex(&salt_bytes);
    let hash = digest(&salt, password);
    format!("{salt}${hash}")
}

#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    digest(salt, password) == expected
}

/// Register a new account and sign it in.
pub async fn sign_up(accounts: &dyn AccountStore, email: &str, password: &str) -> Result<SignedIn, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    let user = accounts
        .create_user(&email, &hash_password(password))
        .await?;
    let token = session::create_session(accounts, user.id).await?;
    tracing::info!(user_id = %user.id, "account created");
    Ok(SignedIn { user, token })
}

/// Verify credentials and open a new session.
pub async fn sign_in(accounts: &dyn AccountStore, email: &str, password: &str) -> Result<SignedIn, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;
    let (user, stored) = accounts
        .find_credentials(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    if !verify_password(password, &stored) {
        return Err(AuthError::InvalidCredentials);
    }
    let token = session::create_session(accounts, user.id).await?;
    Ok(SignedIn { user, token })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
