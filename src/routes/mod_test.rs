use crate::state::test_helpers::{request, send_json, test_app_state};
use axum::http::StatusCode;

#[tokio::test]
async fn root_reports_running() {
    let state = test_app_state();
    let (status, body) = send_json(&state, request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Poetry TTS API is running!");
}

#[tokio::test]
async fn healthz_ok() {
    let state = test_app_state();
    let (status, _) = send_json(&state, request("GET", "/healthz", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let state = test_app_state();
    let (status, _) = send_json(&state, request("GET", "/api/nope", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
