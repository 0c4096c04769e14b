use super::*;

#[test]
fn url_trims_trailing_slash() {
    let ctx = CliContext { base_url: "http://localhost:3000/".to_owned(), session_token: None };
    assert_eq!(url(&ctx, "/api/feed"), "http://localhost:3000/api/feed");
}

#[test]
fn category_aliases() {
    assert_eq!(category_for("NOUN"), Some("nouns"));
    assert_eq!(category_for(" adj "), Some("adjectives"));
    assert_eq!(category_for("c"), Some("conjunctions"));
    assert_eq!(category_for("adverb"), None);
}

#[test]
fn tagged_words_are_grouped() {
    let raw = "# seed words\nnoun\tmoon\nverb\twhisper\n\nadj\tgentle\nnoun\tmoon\nconj\tand\n";
    let body = parse_tagged_words(raw).unwrap();
    assert_eq!(body["nouns"], serde_json::json!(["moon"]));
    assert_eq!(body["verbs"], serde_json::json!(["whisper"]));
    assert_eq!(body["adjectives"], serde_json::json!(["gentle"]));
    assert_eq!(body["conjunctions"], serde_json::json!(["and"]));
    assert_eq!(category_summary(&body), "nouns: 1, verbs: 1, adjectives: 1, conjunctions: 1");
}

#[test]
fn tagged_words_report_bad_lines() {
    let err = parse_tagged_words("noun\tmoon\nmoon\n").unwrap_err();
    assert!(matches!(err, CliError::BadTaggedLine { line: 2, .. }));

    let err = parse_tagged_words("adverb\tquickly\n").unwrap_err();
    assert!(matches!(err, CliError::BadTaggedLine { line: 1, .. }));
}

#[tokio::test]
async fn authenticated_request_needs_token() {
    let ctx = CliContext { base_url: "http://127.0.0.1:1".to_owned(), session_token: None };
    let err = api_request(&ctx, reqwest::Method::GET, "/api/poems", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::MissingSessionToken));
}

#[tokio::test]
async fn analyze_needs_poem_or_text() {
    let ctx = CliContext { base_url: "http://127.0.0.1:1".to_owned(), session_token: Some("t".to_owned()) };
    let err = run_analyze(&ctx, None, None).await.unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
}

#[test]
fn analyze_text_conflicts_with_poem_id() {
    let id = Uuid::new_v4().to_string();
    let parsed = Cli::try_parse_from(["fridge-cli", "analyze", id.as_str(), "--text", "moon"]);
    assert!(parsed.is_err());

    let parsed = Cli::try_parse_from(["fridge-cli", "analyze", "--text", "moon"]).unwrap();
    assert!(matches!(parsed.command, Command::Analyze { poem_id: None, text: Some(_) }));
}
