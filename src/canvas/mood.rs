//! Keyword mood detection and the voice parameters each mood implies.
//!
//! Each placed word scores one point for every mood whose keyword list
//! contains it (case-insensitive). The highest score wins; ties go to the
//! mood declared first in [`MOOD_KEYWORDS`]. A poem with no keyword hits is
//! `Neutral`.

#[cfg(test)]
#[path = "mood_test.rs"]
mod mood_test;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Dramatic,
    Romantic,
    Peaceful,
    Neutral,
}

impl Mood {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Dramatic => "dramatic",
            Self::Romantic => "romantic",
            Self::Peaceful => "peaceful",
            Self::Neutral => "neutral",
        }
    }

    /// Pitch and speed sent to the voice service for this mood.
    #[must_use]
    pub fn voice_params(self) -> VoiceParams {
        match self {
            Self::Happy => VoiceParams { pitch: 1.2, speed: 1.1 },
            Self::Sad => VoiceParams { pitch: 0.8, speed: 0.8 },
            Self::Dramatic => VoiceParams { pitch: 0.9, speed: 0.95 },
            Self::Romantic => VoiceParams { pitch: 1.05, speed: 0.85 },
            Self::Peaceful => VoiceParams { pitch: 0.95, speed: 0.75 },
            Self::Neutral => VoiceParams { pitch: 1.0, speed: 1.0 },
        }
    }
}

/// Voice shaping parameters for a TTS request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceParams {
    pub pitch: f64,
    pub speed: f64,
}

/// Mood keyword table. Order matters: it breaks ties.
pub const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (Mood::Happy, &["love", "joy", "dance", "sing", "light", "bright", "smile", "laugh", "sun", "day", "wonder", "magic"]),
    (Mood::Sad, &["shadow", "tear", "tears", "lonely", "lost", "cry", "rain", "grey", "cold", "empty", "alone", "goodbye"]),
    (Mood::Dramatic, &["storm", "fire", "wild", "thunder", "scream", "dark", "rage", "crash", "blood", "fierce", "night"]),
    (Mood::Romantic, &["love", "heart", "whisper", "kiss", "gentle", "moon", "rose", "desire", "embrace", "dream"]),
    (Mood::Peaceful, &["peace", "soft", "gentle", "ocean", "calm", "quiet", "still", "breeze", "float", "rest"]),
];

/// Per-mood keyword hit counts, in table order.
#[must_use]
pub fn score_moods<'a, I>(words: I) -> Vec<(Mood, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let lowered: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .collect();

    MOOD_KEYWORDS
        .iter()
        .map(|(mood, keywords)| {
            let hits = lowered
                .iter()
                .filter(|w| keywords.contains(&w.as_str()))
                .count();
            (*mood, hits)
        })
        .collect()
}

/// The winning mood for a set of words.
#[must_use]
pub fn detect_mood<'a, I>(words: I) -> Mood
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = Mood::Neutral;
    let mut best_score = 0;
    for (mood, score) in score_moods(words) {
        if score > best_score {
            best = mood;
            best_score = score;
        }
    }
    best
}
