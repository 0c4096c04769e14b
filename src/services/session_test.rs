use super::*;
use crate::store::MemoryStore;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// session lifecycle
// =============================================================================

#[tokio::test]
async fn created_session_validates_until_deleted() {
    let store = MemoryStore::new();
    let user = store.create_user("poet@example.com", "hash").await.unwrap();

    let token = create_session(&store, user.id).await.unwrap();
    assert_eq!(validate_session(&store, &token).await.unwrap(), Some(user));

    delete_session(&store, &token).await.unwrap();
    assert!(validate_session(&store, &token).await.unwrap().is_none());
}

#[tokio::test]
async fn blank_token_is_rejected() {
    let store = MemoryStore::new();
    assert!(validate_session(&store, "   ").await.unwrap().is_none());
}
