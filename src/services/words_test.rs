use std::collections::HashSet;

use super::*;
use crate::store::MemoryStore;

fn numbered(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

#[test]
fn sample_counts_per_category() {
    let cats = WordCategories {
        nouns: numbered("n", 30),
        verbs: numbered("v", 30),
        adjectives: numbered("a", 30),
        conjunctions: numbered("c", 30),
    };
    let words = sample_words(&cats);
    assert_eq!(words.len(), NOUN_COUNT + VERB_COUNT + ADJECTIVE_COUNT + CONJUNCTION_COUNT);
    assert_eq!(words.iter().filter(|w| w.starts_with('n')).count(), NOUN_COUNT);
    assert_eq!(words.iter().filter(|w| w.starts_with('v')).count(), VERB_COUNT);
    assert_eq!(words.iter().filter(|w| w.starts_with('a')).count(), ADJECTIVE_COUNT);
    assert_eq!(words.iter().filter(|w| w.starts_with('c')).count(), CONJUNCTION_COUNT);
}

#[test]
fn sample_has_no_repeats() {
    let cats = WordCategories { nouns: numbered("n", 12), ..WordCategories::default() };
    let words = sample_words(&cats);
    let unique: HashSet<&String> = words.iter().collect();
    assert_eq!(unique.len(), words.len());
}

#[test]
fn short_categories_yield_what_they_have() {
    let cats = WordCategories { nouns: numbered("n", 2), verbs: numbered("v", 1), ..WordCategories::default() };
    assert_eq!(sample_words(&cats).len(), 3);
}

#[test]
fn default_categories_cover_every_group() {
    let cats = default_categories();
    assert!(!cats.nouns.is_empty());
    assert!(!cats.verbs.is_empty());
    assert!(!cats.adjectives.is_empty());
    assert!(!cats.conjunctions.is_empty());
}

#[tokio::test]
async fn missing_record_gives_empty_bank() {
    let store = MemoryStore::new();
    assert!(word_bank(&store).await.is_empty());
}

#[tokio::test]
async fn stored_record_is_sampled() {
    let store = MemoryStore::with_words(default_categories());
    let bank = word_bank(&store).await;
    assert!(!bank.is_empty());
    let all = default_categories();
    assert!(bank.iter().all(|w| all.nouns.contains(w)
        || all.verbs.contains(w)
        || all.adjectives.contains(w)
        || all.conjunctions.contains(w)));
}

#[tokio::test]
async fn seeding_writes_defaults_once() {
    let store = MemoryStore::new();
    assert!(seed_default_categories(&store).await.unwrap());
    assert_eq!(store.word_categories().await.unwrap(), Some(default_categories()));

    let custom = WordCategories { nouns: vec!["cat".into()], ..WordCategories::default() };
    store.put_word_categories(&custom).await.unwrap();
    assert!(!seed_default_categories(&store).await.unwrap());
    assert_eq!(store.word_categories().await.unwrap(), Some(custom));
}
