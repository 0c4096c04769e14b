use super::*;
use crate::state::test_helpers::{request, send_json, seed_user, test_app_state};
use serde_json::json;

#[tokio::test]
async fn sample_returns_full_bank_from_defaults() {
    let state = test_app_state();
    let (status, body) = send_json(&state, request("GET", "/api/words", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let words = body["words"].as_array().unwrap();
    // 10 of 13 nouns, then every verb, adjective and conjunction.
    assert_eq!(words.len(), 20);
}

#[tokio::test]
async fn sample_is_empty_without_categories() {
    let state = crate::state::AppState::new(
        std::sync::Arc::new(crate::store::memory::MemoryStore::new()),
        crate::config::ServerConfig::for_tests(),
    );
    let (status, body) = send_json(&state, request("GET", "/api/words", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["words"].as_array().unwrap().is_empty());

    let (status, _) = send_json(&state, request("GET", "/api/words/categories", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_categories_requires_auth() {
    let state = test_app_state();
    let body = json!({ "nouns": ["cat"] });
    let (status, _) = send_json(&state, request("PUT", "/api/words/categories", None, Some(body))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn put_categories_replaces_record() {
    let state = test_app_state();
    let (_, token) = seed_user(&state, "a@example.com").await;
    let body = json!({ "nouns": ["cat", "dog"], "verbs": ["run"] });

    let (status, _) = send_json(&state, request("PUT", "/api/words/categories", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored) = send_json(&state, request("GET", "/api/words/categories", None, None)).await;
    assert_eq!(stored["nouns"], json!(["cat", "dog"]));
    assert_eq!(stored["conjunctions"], json!([]));

    let (_, sampled) = send_json(&state, request("GET", "/api/words", None, None)).await;
    assert_eq!(sampled["words"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn put_empty_categories_rejected() {
    let state = test_app_state();
    let (_, token) = seed_user(&state, "a@example.com").await;
    let (status, _) = send_json(&state, request("PUT", "/api/words/categories", Some(&token), Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
