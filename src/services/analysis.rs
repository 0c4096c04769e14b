//! LLM-backed poem critique.
//!
//! The model is asked for a JSON object and told to be generous: poems are
//! built from a small random word bank, so scores start at 6. Replies are
//! accepted as bare JSON, inside a ```json fence, or as the outermost
//! `{...}` span of otherwise chatty text.

use serde::{Deserialize, Serialize};

use crate::config::env_parse;
use crate::llm::{LlmChat, LlmError, Prompt};

pub const DEFAULT_ANALYSIS_MAX_TOKENS: u32 = 1000;

const SYSTEM_PROMPT: &str = "You are an encouraging poetry mentor for a fridge magnet poetry game. \
Players build poems from a couple dozen randomly drawn word magnets, which is a creative challenge. \
Celebrate what works and never be harsh.";

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("poem analysis is not configured")]
    NotConfigured,
    #[error("nothing to analyze")]
    EmptyPoem,
    #[error("llm request failed: {0}")]
    Llm(#[from] LlmError),
    #[error("could not parse analysis: {0}")]
    Parse(String),
}

/// Body of `POST /api/analyze-poem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemAnalysis {
    /// Usually a whole number from 6 to 10, but models sometimes give halves.
    pub score: f64,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub literary_devices: Vec<String>,
}

#[must_use]
pub fn analysis_max_tokens() -> u32 {
    env_parse("ANALYSIS_MAX_TOKENS", DEFAULT_ANALYSIS_MAX_TOKENS)
}

fn build_prompt(poem_text: &str) -> String {
    format!(
        r#"Poem: "{poem_text}"

Respond with only a JSON object:
{{
    "score": <integer 6-10, be generous>,
    "strengths": [<2-3 enthusiastic compliments>],
    "improvements": [<1-2 gentle, optional suggestions phrased as "you could try...">],
    "literary_devices": [<any literary devices you notice>],
    "mood": "<one positive or neutral word for the vibe>"
}}

Scoring guide: 6-7 found some fun combinations; 7-8 nice work with the words given;
8-9 really creative use of limited words; 9-10 remarkable poetry from random magnets."#
    )
}

/// Parse a model reply into an analysis.
///
/// # Errors
///
/// Returns `Parse` when no JSON object in the reply matches the schema.
pub fn parse_analysis(reply: &str) -> Result<PoemAnalysis, AnalysisError> {
    let trimmed = reply.trim();
    if let Ok(analysis) = serde_json::from_str::<PoemAnalysis>(trimmed) {
        return Ok(analysis);
    }

    if let Some((_, rest)) = trimmed.split_once("```json") {
        let fenced = rest.split("```").next().unwrap_or(rest).trim();
        return serde_json::from_str(fenced).map_err(|e| AnalysisError::Parse(e.to_string()));
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str(&trimmed[start..=end]).map_err(|e| AnalysisError::Parse(e.to_string()))
        }
        _ => Err(AnalysisError::Parse("reply contains no JSON object".into())),
    }
}

/// Ask the model to critique `poem_text`.
///
/// # Errors
///
/// Fails on blank input, LLM errors, or an unparseable reply.
pub async fn analyze_poem(llm: &dyn LlmChat, max_tokens: u32, poem_text: &str) -> Result<PoemAnalysis, AnalysisError> {
    let poem_text = poem_text.trim();
    if poem_text.is_empty() {
        return Err(AnalysisError::EmptyPoem);
    }

    let prompt = Prompt::new(SYSTEM_PROMPT, build_prompt(poem_text)).with_max_tokens(max_tokens);
    let completion = llm.complete(&prompt).await?;
    if completion.truncated() {
        tracing::warn!(max_tokens, "analysis reply hit the token limit");
    }
    let analysis = parse_analysis(&completion.text)?;
    tracing::info!(
        score = analysis.score,
        mood = %analysis.mood,
        input_tokens = completion.usage.input_tokens,
        output_tokens = completion.usage.output_tokens,
        "poem analyzed"
    );
    Ok(analysis)
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
