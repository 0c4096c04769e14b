use super::*;
use std::sync::Mutex;

use crate::canvas::DragSource;
use crate::poem::PoemDraft;
use crate::services::words::default_categories;
use crate::client::repository::LocalRepository;
use crate::store::PoemStore;
use crate::store::memory::MemoryStore;

// =============================================================================
// Fakes
// =============================================================================

#[derive(Default)]
struct FakeVoice {
    fail: bool,
    requests: Mutex<Vec<TtsRequest>>,
    analyzed: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl VoiceApi for FakeVoice {
    async fn tts(&self, request: &TtsRequest) -> Result<String, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ClientError::Status { status: 502 });
        }
        Ok(format!("http://localhost/audio/{}", self.requests.lock().unwrap().len()))
    }

    async fn analyze(&self, text: &str) -> Result<PoemAnalysis, ClientError> {
        self.analyzed.lock().unwrap().push(text.to_owned());
        if self.fail {
            return Err(ClientError::Status { status: 503 });
        }
        Ok(PoemAnalysis {
            score: 9.0,
            mood: "romantic".into(),
            strengths: vec!["imagery".into()],
            improvements: Vec::new(),
            literary_devices: Vec::new(),
        })
    }
}

/// Repository that fails every call.
struct DownRepository;

#[async_trait::async_trait]
impl PoemRepository for DownRepository {
    async fn word_bank(&self) -> Result<Vec<String>, ClientError> {
        Err(ClientError::Transport("offline".into()))
    }
    async fn save_poem(&self, _draft: PoemDraft) -> Result<Poem, ClientError> {
        Err(ClientError::Transport("offline".into()))
    }
    async fn list_poems(&self, _scope: PoemScope) -> Result<Vec<Poem>, ClientError> {
        Err(ClientError::Transport("offline".into()))
    }
    async fn toggle_like(&self, _poem_id: Uuid) -> Result<LikeOutcome, ClientError> {
        Err(ClientError::Transport("offline".into()))
    }
    async fn like_total(&self) -> Result<i64, ClientError> {
        Err(ClientError::Transport("offline".into()))
    }
}

fn container() -> Container {
    Container { origin: Point::new(0.0, 0.0), width: 800.0, height: 600.0 }
}

fn viewer(email: &str) -> User {
    User { id: Uuid::new_v4(), email: email.into() }
}

struct Harness {
    store: Arc<MemoryStore>,
    voice: Arc<FakeVoice>,
    view: PoetryView,
}

fn harness_with(voice: FakeVoice) -> Harness {
    let store = Arc::new(MemoryStore::with_words(default_categories()));
    let voice = Arc::new(voice);
    let repo = Arc::new(LocalRepository::new(store.clone(), viewer("me@example.com")));
    let view = PoetryView::new(repo, voice.clone(), viewer("me@example.com"));
    Harness { store, voice, view }
}

fn harness() -> Harness {
    harness_with(FakeVoice::default())
}

/// Drag the first `n` bank words onto the fridge, one per row.
fn place_words(view: &mut PoetryView, n: usize) {
    let ids: Vec<String> = view
        .canvas()
        .available()
        .iter()
        .take(n)
        .map(|m| m.id.clone())
        .collect();
    for (row, id) in ids.iter().enumerate() {
        let y = 10.0 + row as f64 * 50.0;
        let canvas = view.canvas_mut();
        canvas
            .begin_drag(id, DragSource::Bank, Point::new(5.0, 5.0), Point::new(0.0, 0.0))
            .unwrap();
        canvas.drop_on_fridge(Point::new(20.0, y), &container()).unwrap();
    }
}

/// Save a poem as another user directly in the store.
async fn seed_poem(store: &MemoryStore, words: &[&str]) -> Poem {
    let author = viewer("other@example.com");
    let draft = PoemDraft {
        magnets: words
            .iter()
            .enumerate()
            .map(|(i, w)| crate::poem::PlacedMagnet {
                id: format!("word-{i}"),
                text: (*w).into(),
                x: i as f64 * 110.0,
                y: 0.0,
            })
            .collect(),
        stickers: Vec::new(),
    };
    let poem = Poem::from_draft(author.id, &author.email, draft);
    store.insert_poem(&poem).await.unwrap();
    poem
}

// =============================================================================
// Create mode
// =============================================================================

#[tokio::test]
async fn enter_loads_word_bank() {
    let mut h = harness();
    h.view.enter().await;
    assert_eq!(h.view.mode(), ViewMode::Create);
    assert_eq!(h.view.canvas().available().len(), 20);
    assert!(h.view.notice().is_none());
}

#[tokio::test]
async fn enter_with_missing_words_degrades_silently() {
    let store = Arc::new(MemoryStore::new());
    let repo = Arc::new(LocalRepository::new(store, viewer("me@example.com")));
    let mut view = PoetryView::new(repo, Arc::new(FakeVoice::default()), viewer("me@example.com"));
    view.enter().await;
    assert!(view.canvas().available().is_empty());
    assert!(view.notice().is_none());
}

#[tokio::test]
async fn enter_with_backend_down_shows_error() {
    let mut view = PoetryView::new(Arc::new(DownRepository), Arc::new(FakeVoice::default()), viewer("me@example.com"));
    view.enter().await;
    assert!(matches!(view.notice(), Some(Notice::Error(_))));
}

#[tokio::test]
async fn save_empty_fridge_warns_without_write() {
    let mut h = harness();
    h.view.enter().await;
    h.view.save().await;

    assert!(matches!(h.view.notice(), Some(Notice::Warning(_))));
    assert!(!h.view.is_saving());
    h.view.show_gallery().await;
    assert!(h.view.poems().is_empty());
}

#[tokio::test]
async fn save_clears_canvas_and_shows_info() {
    let mut h = harness();
    h.view.enter().await;
    place_words(&mut h.view, 3);
    assert_eq!(h.view.canvas().fridge().len(), 3);

    h.view.save().await;
    assert!(matches!(h.view.notice(), Some(Notice::Info(_))));
    assert!(h.view.canvas().is_empty());
    assert!(h.view.canvas().available().iter().all(|m| !m.on_fridge));
    assert!(!h.view.is_saving());

    h.view.show_gallery().await;
    assert_eq!(h.view.visible_poems().len(), 1);
    assert_eq!(h.view.visible_poems()[0].magnets.len(), 3);
}

#[tokio::test]
async fn save_failure_keeps_canvas() {
    let mut view = PoetryView::new(Arc::new(DownRepository), Arc::new(FakeVoice::default()), viewer("me@example.com"));
    view.canvas_mut().load_words(["moon", "sun"]);
    place_words(&mut view, 2);

    view.save().await;
    assert!(matches!(view.notice(), Some(Notice::Error(_))));
    assert_eq!(view.canvas().fridge().len(), 2);
    assert!(!view.is_saving());
}

#[tokio::test]
async fn stickers_respect_like_total() {
    let mut h = harness();
    h.view.enter().await;
    assert_eq!(h.view.like_total(), 0);

    assert!(h.view.place_sticker("star", Point::new(10.0, 10.0), &container()).is_ok());
    let err = h.view.place_sticker("heart", Point::new(10.0, 10.0), &container()).unwrap_err();
    assert!(matches!(err, CanvasError::StickerLocked { required: 1, .. }));
}

// =============================================================================
// Gallery and feed
// =============================================================================

#[tokio::test]
async fn feed_pages_one_poem_at_a_time() {
    let mut h = harness();
    seed_poem(&h.store, &["moon"]).await;
    seed_poem(&h.store, &["sun"]).await;

    h.view.show_feed().await;
    assert_eq!(h.view.mode(), ViewMode::Feed);
    assert_eq!(h.view.poems().len(), 2);
    assert_eq!(h.view.visible_poems().len(), 1);
    assert!(h.view.next_page());
    assert!(!h.view.next_page());
    assert!(h.view.prev_page());

    h.view.show_create();
    assert!(h.view.visible_poems().is_empty());
}

#[tokio::test]
async fn gallery_shows_only_own_poems() {
    let mut h = harness();
    seed_poem(&h.store, &["moon"]).await;
    h.view.show_gallery().await;
    assert!(h.view.visible_poems().is_empty());
}

#[tokio::test]
async fn list_failure_shows_error() {
    let mut view = PoetryView::new(Arc::new(DownRepository), Arc::new(FakeVoice::default()), viewer("me@example.com"));
    view.show_feed().await;
    assert!(view.poems().is_empty());
    assert!(matches!(view.notice(), Some(Notice::Error(_))));
}

// =============================================================================
// Likes
// =============================================================================

#[tokio::test]
async fn toggle_like_round_trip() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;

    h.view.toggle_like(poem.id).await;
    assert_eq!(h.view.poems()[0].likes, 1);
    assert!(h.view.poems()[0].is_liked_by(h.view.viewer().id));

    h.view.toggle_like(poem.id).await;
    assert_eq!(h.view.poems()[0].likes, 0);
    assert_eq!(h.store.like_total(poem.owner_id).await.unwrap(), 0);
}

#[tokio::test]
async fn like_picks_up_likes_made_since_listing() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;

    let other = Uuid::new_v4();
    h.store.toggle_like(poem.id, other).await.unwrap();

    h.view.toggle_like(poem.id).await;
    let local = &h.view.poems()[0];
    assert_eq!(local.likes, 2);
    assert_eq!(local.liked_by.len(), 2);
    assert!(local.is_liked_by(other));
    assert!(local.is_liked_by(h.view.viewer().id));
}

#[tokio::test]
async fn like_blocked_while_in_flight() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;

    let pending = h.view.begin_like(poem.id).unwrap();
    assert!(h.view.is_like_pending(poem.id));
    assert!(h.view.begin_like(poem.id).is_none());
    assert_eq!(h.view.poems()[0].likes, 1);

    let outcome = LikeOutcome { poem_id: poem.id, liked: true, likes: 1, liked_by: vec![h.view.viewer().id] };
    h.view.finish_like(pending, Ok(outcome));
    assert!(!h.view.is_like_pending(poem.id));
}

#[tokio::test]
async fn failed_like_rolls_back() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;

    let pending = h.view.begin_like(poem.id).unwrap();
    h.view.finish_like(pending, Err(ClientError::Status { status: 500 }));

    assert_eq!(h.view.poems()[0].likes, 0);
    assert!(h.view.poems()[0].liked_by.is_empty());
    assert!(matches!(h.view.notice(), Some(Notice::Error(_))));
}

// =============================================================================
// Playback and analysis
// =============================================================================

#[tokio::test]
async fn play_sends_reading_ordered_text_with_mood() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["love", "whisper", "gentle"]).await;
    h.view.show_feed().await;
    h.view.set_voice("poem2");

    h.view.play(poem.id).await;
    let sent = h.voice.requests.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "love whisper gentle");
    assert_eq!(sent[0].voice_name, "poem2");
    let params = crate::canvas::Mood::Romantic.voice_params();
    assert!((sent[0].speed - params.speed).abs() < f64::EPSILON);

    assert_eq!(h.view.now_playing().unwrap().poem_id, poem.id);
    h.view.playback_ended(poem.id);
    assert!(h.view.now_playing().is_none());
}

#[tokio::test]
async fn superseded_tts_response_is_dropped() {
    let mut h = harness();
    let first = seed_poem(&h.store, &["moon"]).await;
    let second = seed_poem(&h.store, &["sun"]).await;
    h.view.show_feed().await;

    let (old_ticket, _) = h.view.begin_play(first.id).unwrap();
    let (new_ticket, _) = h.view.begin_play(second.id).unwrap();
    h.view.finish_play(new_ticket, Ok("http://localhost/audio/new".into()));
    h.view.finish_play(old_ticket, Ok("http://localhost/audio/old".into()));

    let playing = h.view.now_playing().unwrap();
    assert_eq!(playing.poem_id, second.id);
    assert_eq!(playing.audio_url, "http://localhost/audio/new");
}

#[tokio::test]
async fn stop_clears_playback() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;
    h.view.play(poem.id).await;
    h.view.stop();
    assert!(h.view.now_playing().is_none());
    assert!(h.view.loading_audio().is_none());
}

#[tokio::test]
async fn play_failure_shows_error() {
    let mut h = harness_with(FakeVoice { fail: true, ..FakeVoice::default() });
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;
    h.view.play(poem.id).await;

    assert!(h.view.now_playing().is_none());
    assert!(h.view.loading_audio().is_none());
    assert!(matches!(h.view.notice(), Some(Notice::Error(_))));
}

#[tokio::test]
async fn analyze_stores_result() {
    let mut h = harness();
    let poem = seed_poem(&h.store, &["love", "moon"]).await;
    h.view.show_feed().await;
    h.view.analyze(poem.id).await;

    let (id, analysis) = h.view.analysis().unwrap();
    assert_eq!(id, poem.id);
    assert!((analysis.score - 9.0).abs() < f64::EPSILON);
    assert!(!h.view.is_analyzing());
    assert_eq!(h.voice.analyzed.lock().unwrap().as_slice(), ["love moon".to_owned()]);
}

#[tokio::test]
async fn analyze_failure_resets_flag() {
    let mut h = harness_with(FakeVoice { fail: true, ..FakeVoice::default() });
    let poem = seed_poem(&h.store, &["moon"]).await;
    h.view.show_feed().await;
    h.view.analyze(poem.id).await;

    assert!(h.view.analysis().is_none());
    assert!(!h.view.is_analyzing());
    assert!(matches!(h.view.notice(), Some(Notice::Error(_))));
}
