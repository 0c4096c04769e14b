use std::sync::Mutex;

use super::*;
use crate::llm::{Completion, Usage};

struct MockLlm {
    reply: Result<String, u16>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    fn replying(text: &str) -> Self {
        Self { reply: Ok(text.to_owned()), prompts: Mutex::new(Vec::new()) }
    }

    fn failing(status: u16) -> Self {
        Self { reply: Err(status), prompts: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn complete(&self, prompt: &Prompt) -> Result<Completion, LlmError> {
        self.prompts.lock().unwrap().push(prompt.user.clone());
        match &self.reply {
            Ok(text) => Ok(Completion {
                text: text.clone(),
                model: "mock".into(),
                stop_reason: Some("end_turn".into()),
                usage: Usage { input_tokens: 10, output_tokens: 20 },
            }),
            Err(status) => Err(LlmError::Upstream { status: *status, body: "nope".into() }),
        }
    }
}

const ANALYSIS_JSON: &str = r#"{
    "score": 8,
    "strengths": ["Love how you paired moon with whisper"],
    "improvements": ["You could try a verb up front"],
    "literary_devices": ["imagery"],
    "mood": "dreamy"
}"#;

// =============================================================================
// parse_analysis
// =============================================================================

#[test]
fn parses_bare_json() {
    let analysis = parse_analysis(ANALYSIS_JSON).unwrap();
    assert!((analysis.score - 8.0).abs() < f64::EPSILON);
    assert_eq!(analysis.mood, "dreamy");
    assert_eq!(analysis.literary_devices, vec!["imagery".to_owned()]);
}

#[test]
fn parses_json_fence() {
    let reply = format!("Here you go!\n```json\n{ANALYSIS_JSON}\n```\nEnjoy.");
    assert!((parse_analysis(&reply).unwrap().score - 8.0).abs() < f64::EPSILON);
}

#[test]
fn parses_embedded_object() {
    let reply = format!("Sure thing: {ANALYSIS_JSON} Hope that helps");
    assert_eq!(parse_analysis(&reply).unwrap().mood, "dreamy");
}

#[test]
fn fractional_score_is_accepted() {
    let analysis = parse_analysis(r#"{"score": 8.5, "mood": "wistful", "strengths": ["rhythm"]}"#).unwrap();
    assert!((analysis.score - 8.5).abs() < f64::EPSILON);
    assert_eq!(analysis.strengths, vec!["rhythm".to_owned()]);
}

#[test]
fn missing_lists_default_to_empty() {
    let analysis = parse_analysis(r#"{"score": 7, "mood": "calm"}"#).unwrap();
    assert!(analysis.strengths.is_empty());
    assert!(analysis.improvements.is_empty());
}

#[test]
fn rejects_prose() {
    assert!(matches!(parse_analysis("What a lovely poem."), Err(AnalysisError::Parse(_))));
}

#[test]
fn rejects_broken_fence() {
    assert!(matches!(parse_analysis("```json\n{\"score\": }\n```"), Err(AnalysisError::Parse(_))));
}

// =============================================================================
// analyze_poem
// =============================================================================

#[tokio::test]
async fn analyze_sends_poem_in_prompt() {
    let llm = MockLlm::replying(ANALYSIS_JSON);
    let analysis = analyze_poem(&llm, 500, "  the moon whispers ").await.unwrap();
    assert!((analysis.score - 8.0).abs() < f64::EPSILON);
    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Poem: \"the moon whispers\""));
}

#[tokio::test]
async fn analyze_blank_poem_skips_llm() {
    let llm = MockLlm::replying(ANALYSIS_JSON);
    let err = analyze_poem(&llm, 500, "   ").await.unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyPoem));
    assert!(llm.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn analyze_surfaces_llm_errors() {
    let llm = MockLlm::failing(529);
    let err = analyze_poem(&llm, 500, "moon").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Llm(LlmError::Upstream { status: 529, .. })));
}
