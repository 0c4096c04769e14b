use super::*;
use crate::poem::PlacedMagnet;
use crate::store::MemoryStore;

fn author() -> User {
    User { id: Uuid::new_v4(), email: "poet@example.com".into() }
}

fn magnet(text: &str, x: f64, y: f64) -> PlacedMagnet {
    PlacedMagnet { id: text.into(), text: text.into(), x, y }
}

fn draft(words: &[(&str, f64, f64)]) -> PoemDraft {
    PoemDraft { magnets: words.iter().map(|(t, x, y)| magnet(t, *x, *y)).collect(), stickers: Vec::new() }
}

// =============================================================================
// save_poem
// =============================================================================

#[tokio::test]
async fn empty_draft_is_rejected_without_write() {
    let store = MemoryStore::new();
    let user = author();
    let err = save_poem(&store, &user, PoemDraft::default()).await.unwrap_err();
    assert!(matches!(err, PoemError::Empty));
    let listed = list_poems(&store, PoemScope::Everyone, user.id, Page::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn saved_poem_is_listed_with_author() {
    let store = MemoryStore::new();
    let user = author();
    let poem = save_poem(&store, &user, draft(&[("moon", 10.0, 10.0)])).await.unwrap();
    assert_eq!(poem.author, user.email);
    assert_eq!(poem.likes, 0);

    let mine = list_poems(&store, PoemScope::Mine, user.id, Page::default())
        .await
        .unwrap();
    assert_eq!(mine, vec![poem]);
}

#[tokio::test]
async fn list_all_poems_pages_past_the_limit() {
    let store = MemoryStore::new();
    let user = author();
    for _ in 0..MAX_PAGE_LIMIT * 2 {
        save_poem(&store, &user, draft(&[("moon", 0.0, 0.0)])).await.unwrap();
    }
    save_poem(&store, &author(), draft(&[("sun", 0.0, 0.0)])).await.unwrap();

    let mine = list_all_poems(&store, PoemScope::Mine, user.id).await.unwrap();
    assert_eq!(mine.len(), MAX_PAGE_LIMIT * 2);
    let all = list_all_poems(&store, PoemScope::Everyone, user.id).await.unwrap();
    assert_eq!(all.len(), MAX_PAGE_LIMIT * 2 + 1);
}

// =============================================================================
// likes
// =============================================================================

#[tokio::test]
async fn toggle_like_unknown_poem_is_not_found() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    let err = toggle_like(&store, id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, PoemError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn sticker_catalog_reflects_like_total() {
    let store = MemoryStore::new();
    let user = author();
    let poem = save_poem(&store, &user, draft(&[("moon", 0.0, 0.0)])).await.unwrap();
    toggle_like(&store, poem.id, Uuid::new_v4()).await.unwrap();

    let catalog = sticker_catalog(&store, user.id).await.unwrap();
    assert_eq!(catalog.like_total, 1);
    let unlocked: Vec<&str> = catalog
        .stickers
        .iter()
        .filter(|s| s.unlocked)
        .map(|s| s.kind.name)
        .collect();
    assert_eq!(unlocked, vec!["star", "heart"]);
}

// =============================================================================
// reading
// =============================================================================

#[test]
fn reading_uses_order_and_mood() {
    let poem = Poem::from_draft(
        Uuid::new_v4(),
        "poet@example.com",
        draft(&[("gentle", 200.0, 10.0), ("whisper", 100.0, 12.0), ("love", 10.0, 5.0)]),
    );
    let reading = PoemReading::of(&poem);
    assert_eq!(reading.text, "love whisper gentle");
    assert_eq!(reading.mood, Mood::Romantic);
    assert_eq!((reading.pitch, reading.speed), (1.05, 0.85));
}

#[tokio::test]
async fn reading_of_missing_poem() {
    let store = MemoryStore::new();
    let err = reading(&store, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, PoemError::NotFound(_)));
}
