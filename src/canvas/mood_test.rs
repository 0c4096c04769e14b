use super::*;

fn score_of(scores: &[(Mood, usize)], mood: Mood) -> usize {
    scores
        .iter()
        .find(|(m, _)| *m == mood)
        .map_or(0, |(_, s)| *s)
}

#[test]
fn romantic_example() {
    let words = ["love", "whisper", "gentle"];
    let scores = score_moods(words);
    assert_eq!(score_of(&scores, Mood::Romantic), 3);
    assert_eq!(score_of(&scores, Mood::Happy), 1);
    assert_eq!(score_of(&scores, Mood::Peaceful), 1);
    assert_eq!(score_of(&scores, Mood::Sad), 0);
    assert_eq!(detect_mood(words), Mood::Romantic);
}

#[test]
fn no_keywords_is_neutral() {
    assert_eq!(detect_mood(["table", "spoon"]), Mood::Neutral);
    assert_eq!(detect_mood(std::iter::empty::<&str>()), Mood::Neutral);
}

#[test]
fn case_and_whitespace_insensitive() {
    assert_eq!(detect_mood(["  STORM ", "Fire"]), Mood::Dramatic);
}

#[test]
fn ties_go_to_table_order() {
    // "shadow" is sad, "storm" is dramatic: sad is declared first.
    assert_eq!(detect_mood(["storm", "shadow"]), Mood::Sad);
    // "love" alone scores happy and romantic equally.
    assert_eq!(detect_mood(["love"]), Mood::Happy);
}

#[test]
fn repeated_words_count_each_time() {
    let scores = score_moods(["rain", "rain", "sun"]);
    assert_eq!(score_of(&scores, Mood::Sad), 2);
    assert_eq!(detect_mood(["rain", "rain", "sun"]), Mood::Sad);
}

#[test]
fn scores_follow_table_order() {
    let moods: Vec<Mood> = score_moods(std::iter::empty::<&str>()).into_iter().map(|(m, _)| m).collect();
    assert_eq!(moods, vec![Mood::Happy, Mood::Sad, Mood::Dramatic, Mood::Romantic, Mood::Peaceful]);
}

#[test]
fn voice_params_neutral_is_identity() {
    assert_eq!(Mood::Neutral.voice_params(), VoiceParams { pitch: 1.0, speed: 1.0 });
}

#[test]
fn voice_params_happy_is_faster_than_sad() {
    assert!(Mood::Happy.voice_params().speed > Mood::Sad.voice_params().speed);
    assert!(Mood::Happy.voice_params().pitch > Mood::Sad.voice_params().pitch);
}

#[test]
fn mood_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Mood::Peaceful).unwrap(), "\"peaceful\"");
    assert_eq!(Mood::Dramatic.as_str(), "dramatic");
}
