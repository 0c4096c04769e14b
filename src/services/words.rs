//! Word bank sampling.
//!
//! The bank is drawn fresh on every request from the shared
//! `WordCategories` record: up to 10 nouns, 7 verbs, 8 adjectives and
//! 3 conjunctions, each category shuffled independently. A missing or
//! malformed record yields an empty bank rather than an error.

use rand::seq::IndexedRandom;
use tracing::warn;

use crate::poem::WordCategories;
use crate::store::{PoemStore, StoreError};

pub const NOUN_COUNT: usize = 10;
pub const VERB_COUNT: usize = 7;
pub const ADJECTIVE_COUNT: usize = 8;
pub const CONJUNCTION_COUNT: usize = 3;

/// Seed record used when the server starts without a stored one.
#[must_use]
pub fn default_categories() -> WordCategories {
    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }
    WordCategories {
        nouns: owned(&["dream", "moon", "heart", "shadow", "light", "ocean", "fire", "storm", "peace", "night", "day", "wonder", "magic"]),
        verbs: owned(&["love", "whisper", "dance", "sing"]),
        adjectives: owned(&["wild", "soft", "gentle"]),
        conjunctions: owned(&["and", "but", "or"]),
    }
}

fn sample_from<R: rand::Rng + ?Sized>(words: &[String], count: usize, rng: &mut R) -> Vec<String> {
    words
        .choose_multiple(rng, count)
        .cloned()
        .collect()
}

/// Draw one bank from `categories`, nouns first.
#[must_use]
pub fn sample_words(categories: &WordCategories) -> Vec<String> {
    let mut rng = rand::rng();
    let mut words = Vec::with_capacity(NOUN_COUNT + VERB_COUNT + ADJECTIVE_COUNT + CONJUNCTION_COUNT);
    words.extend(sample_from(&categories.nouns, NOUN_COUNT, &mut rng));
    words.extend(sample_from(&categories.verbs, VERB_COUNT, &mut rng));
    words.extend(sample_from(&categories.adjectives, ADJECTIVE_COUNT, &mut rng));
    words.extend(sample_from(&categories.conjunctions, CONJUNCTION_COUNT, &mut rng));
    words
}

/// Load the shared record and sample a bank from it.
pub async fn word_bank(store: &dyn PoemStore) -> Vec<String> {
    match store.word_categories().await {
        Ok(Some(categories)) if !categories.is_empty() => sample_words(&categories),
        Ok(_) => {
            warn!("word categories missing or empty; serving an empty bank");
            Vec::new()
        }
        Err(StoreError::Malformed(detail)) => {
            warn!(%detail, "word categories malformed; serving an empty bank");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "word categories unavailable; serving an empty bank");
            Vec::new()
        }
    }
}

/// Store the default categories unless a non-empty record already exists.
/// Returns whether the defaults were written.
///
/// # Errors
///
/// Propagates store failures other than a malformed record, which is
/// overwritten.
pub async fn seed_default_categories(store: &dyn PoemStore) -> Result<bool, StoreError> {
    match store.word_categories().await {
        Ok(Some(existing)) if !existing.is_empty() => return Ok(false),
        Ok(_) | Err(StoreError::Malformed(_)) => {}
        Err(e) => return Err(e),
    }
    store.put_word_categories(&default_categories()).await?;
    tracing::info!("seeded default word categories");
    Ok(true)
}

#[cfg(test)]
#[path = "words_test.rs"]
mod tests;
