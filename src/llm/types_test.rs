use super::*;

#[test]
fn prompt_defaults_max_tokens() {
    let prompt = Prompt::new("be kind", "moon whisper");
    assert_eq!(prompt.max_tokens, DEFAULT_MAX_TOKENS);
    assert_eq!(prompt.with_max_tokens(64).max_tokens, 64);
}

#[test]
fn truncated_only_on_max_tokens() {
    let mut completion = Completion {
        text: "{".into(),
        model: "m".into(),
        stop_reason: Some("max_tokens".into()),
        usage: Usage::default(),
    };
    assert!(completion.truncated());
    completion.stop_reason = Some("end_turn".into());
    assert!(!completion.truncated());
    completion.stop_reason = None;
    assert!(!completion.truncated());
}

#[test]
fn upstream_error_names_status() {
    let err = LlmError::Upstream { status: 529, body: "overloaded".into() };
    assert_eq!(err.to_string(), "llm upstream error: status 529");
}
