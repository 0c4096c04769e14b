//! The poetry view: create, gallery, and feed over one state object.
//!
//! DESIGN
//! ======
//! `PoetryView` owns the canvas, the currently listed poems, and the
//! transient flags (`saving`, `analyzing`, playback loading). Every backend
//! failure becomes a `Notice::Error` and resets the flag it set; nothing is
//! retried. Mode changes happen only through the `show_*` methods.
//!
//! Likes and playback are split into begin/finish halves so a front end can
//! keep the view responsive while requests are outstanding. The all-in-one
//! `toggle_like` and `play` run both halves back to back.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::feed::FeedPager;
use super::likes::{LikeTracker, PendingLike};
use super::playback::{NowPlaying, Playback, PlaybackTicket};
use super::repository::PoemRepository;
use super::voice::{VoiceApi, reading_request};
use super::ClientError;
use crate::canvas::{CanvasError, Container, PoemCanvas, Point, poem_text};
use crate::poem::{LikeOutcome, Poem, PoemScope, Sticker, User};
use crate::services::analysis::PoemAnalysis;
use crate::services::tts::{DEFAULT_VOICE, TtsRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Create,
    Gallery,
    Feed,
}

/// A user-facing message. `Error` is blocking in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

pub struct PoetryView {
    repo: Arc<dyn PoemRepository>,
    voice: Arc<dyn VoiceApi>,
    viewer: User,
    mode: ViewMode,
    canvas: PoemCanvas,
    poems: Vec<Poem>,
    pager: FeedPager,
    likes: LikeTracker,
    playback: Playback,
    notice: Option<Notice>,
    saving: bool,
    analyzing: bool,
    analysis: Option<(Uuid, PoemAnalysis)>,
    like_total: i64,
    voice_name: String,
}

impl PoetryView {
    #[must_use]
    pub fn new(repo: Arc<dyn PoemRepository>, voice: Arc<dyn VoiceApi>, viewer: User) -> Self {
        Self {
            repo,
            voice,
            viewer,
            mode: ViewMode::Create,
            canvas: PoemCanvas::new(),
            poems: Vec::new(),
            pager: FeedPager::default(),
            likes: LikeTracker::new(),
            playback: Playback::new(),
            notice: None,
            saving: false,
            analyzing: false,
            analysis: None,
            like_total: 0,
            voice_name: DEFAULT_VOICE.to_owned(),
        }
    }

    /// Use `pager` for the feed instead of one poem per page.
    #[must_use]
    pub fn with_pager(mut self, pager: FeedPager) -> Self {
        self.pager = pager;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn canvas(&self) -> &PoemCanvas {
        &self.canvas
    }

    /// Drag gestures go straight to the canvas.
    pub fn canvas_mut(&mut self) -> &mut PoemCanvas {
        &mut self.canvas
    }

    /// Every loaded poem for the current list mode.
    #[must_use]
    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    /// Poems to render: the whole gallery, or the current feed page.
    #[must_use]
    pub fn visible_poems(&self) -> &[Poem] {
        match self.mode {
            ViewMode::Create => &[],
            ViewMode::Gallery => &self.poems,
            ViewMode::Feed => self.pager.visible(&self.poems),
        }
    }

    #[must_use]
    pub fn pager(&self) -> &FeedPager {
        &self.pager
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// The latest analysis and the poem it belongs to.
    #[must_use]
    pub fn analysis(&self) -> Option<(Uuid, &PoemAnalysis)> {
        self.analysis.as_ref().map(|(id, a)| (*id, a))
    }

    #[must_use]
    pub fn like_total(&self) -> i64 {
        self.like_total
    }

    #[must_use]
    pub fn is_like_pending(&self, poem_id: Uuid) -> bool {
        self.likes.is_pending(poem_id)
    }

    #[must_use]
    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.playback.now_playing()
    }

    /// The poem whose audio is being fetched, if any.
    #[must_use]
    pub fn loading_audio(&self) -> Option<Uuid> {
        self.playback.loading()
    }

    pub fn set_voice(&mut self, voice_name: impl Into<String>) {
        self.voice_name = voice_name.into();
    }

    fn fail(&mut self, what: &str, err: &ClientError) {
        self.notice = Some(Notice::Error(format!("{what}: {err}")));
    }

    // -------------------------------------------------------------------------
    // Create mode
    // -------------------------------------------------------------------------

    /// Load a fresh word bank and the viewer's like total, then show the
    /// create mode.
    pub async fn enter(&mut self) {
        self.mode = ViewMode::Create;
        let repo = Arc::clone(&self.repo);
        match repo.word_bank().await {
            Ok(words) => {
                if words.is_empty() {
                    warn!(user_id = %self.viewer.id, "word bank is empty");
                }
                self.canvas.load_words(words);
            }
            Err(e) => self.fail("Could not load words", &e),
        }
        self.refresh_like_total().await;
    }

    async fn refresh_like_total(&mut self) {
        let repo = Arc::clone(&self.repo);
        match repo.like_total().await {
            Ok(total) => self.like_total = total,
            Err(e) => warn!(error = %e, "like total unavailable; stickers stay locked"),
        }
    }

    /// Place a sticker the viewer has unlocked.
    ///
    /// # Errors
    ///
    /// Fails for unknown or locked sticker kinds.
    pub fn place_sticker(&mut self, kind: &str, at: Point, container: &Container) -> Result<&Sticker, CanvasError> {
        self.canvas.add_sticker(kind, at, container, self.like_total)
    }

    /// Save the fridge as a new poem. An empty fridge is refused locally.
    pub async fn save(&mut self) {
        if self.saving {
            return;
        }
        if self.canvas.is_empty() {
            self.notice = Some(Notice::Warning("Add some words to the fridge before saving.".into()));
            return;
        }

        self.saving = true;
        let repo = Arc::clone(&self.repo);
        let result = repo.save_poem(self.canvas.draft()).await;
        self.saving = false;

        match result {
            Ok(poem) => {
                tracing::info!(poem_id = %poem.id, "poem saved");
                self.canvas.clear();
                self.notice = Some(Notice::Info("Poem saved!".into()));
            }
            Err(e) => self.fail("Could not save poem", &e),
        }
    }

    // -------------------------------------------------------------------------
    // Mode transitions
    // -------------------------------------------------------------------------

    pub fn show_create(&mut self) {
        self.mode = ViewMode::Create;
    }

    /// Switch to the viewer's own poems.
    pub async fn show_gallery(&mut self) {
        self.mode = ViewMode::Gallery;
        self.load(PoemScope::Mine).await;
    }

    /// Switch to everyone's poems, starting at the first page.
    pub async fn show_feed(&mut self) {
        self.mode = ViewMode::Feed;
        self.pager.reset();
        self.load(PoemScope::Everyone).await;
    }

    async fn load(&mut self, scope: PoemScope) {
        let repo = Arc::clone(&self.repo);
        match repo.list_poems(scope).await {
            Ok(poems) => {
                self.poems = poems;
                self.pager.clamp(self.poems.len());
            }
            Err(e) => {
                self.poems.clear();
                self.fail("Could not load poems", &e);
            }
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next(self.poems.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    // -------------------------------------------------------------------------
    // Likes
    // -------------------------------------------------------------------------

    /// Optimistically toggle the viewer's like. `None` when the poem is not
    /// listed or a toggle on it is already in flight.
    pub fn begin_like(&mut self, poem_id: Uuid) -> Option<PendingLike> {
        let viewer = self.viewer.id;
        let poem = self.poems.iter_mut().find(|p| p.id == poem_id)?;
        self.likes.begin(poem, viewer)
    }

    /// Reconcile a like with the server's answer, or roll it back.
    pub fn finish_like(&mut self, pending: PendingLike, result: Result<LikeOutcome, ClientError>) {
        let poem = self.poems.iter_mut().find(|p| p.id == pending.poem_id);
        if let Err(e) = self.likes.finish(poem, pending, result) {
            self.fail("Could not update like", &e);
        }
    }

    pub async fn toggle_like(&mut self, poem_id: Uuid) {
        let Some(pending) = self.begin_like(poem_id) else {
            return;
        };
        let repo = Arc::clone(&self.repo);
        let result = repo.toggle_like(poem_id).await;
        self.finish_like(pending, result);
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Start loading audio for a listed poem, replacing any current playback.
    pub fn begin_play(&mut self, poem_id: Uuid) -> Option<(PlaybackTicket, TtsRequest)> {
        let poem = self.poems.iter().find(|p| p.id == poem_id)?;
        let request = reading_request(&poem.magnets, &self.voice_name);
        Some((self.playback.request(poem_id), request))
    }

    /// Deliver a TTS result. Results for superseded requests are dropped.
    pub fn finish_play(&mut self, ticket: PlaybackTicket, result: Result<String, ClientError>) {
        match result {
            Ok(audio_url) => {
                if !self.playback.resolve(ticket, audio_url) {
                    tracing::debug!(poem_id = %ticket.poem_id, "dropping stale audio");
                }
            }
            Err(e) => {
                if self.playback.fail(ticket) {
                    self.fail("Could not play poem", &e);
                }
            }
        }
    }

    pub async fn play(&mut self, poem_id: Uuid) {
        let Some((ticket, request)) = self.begin_play(poem_id) else {
            return;
        };
        let voice = Arc::clone(&self.voice);
        let result = voice.tts(&request).await;
        self.finish_play(ticket, result);
    }

    pub fn stop(&mut self) {
        self.playback.stop();
    }

    /// The audio element reported the end of `poem_id`'s audio.
    pub fn playback_ended(&mut self, poem_id: Uuid) {
        self.playback.ended(poem_id);
    }

    // -------------------------------------------------------------------------
    // Analysis
    // -------------------------------------------------------------------------

    /// Ask for a critique of a listed poem.
    pub async fn analyze(&mut self, poem_id: Uuid) {
        if self.analyzing {
            return;
        }
        let Some(poem) = self.poems.iter().find(|p| p.id == poem_id) else {
            return;
        };
        let text = poem_text(&poem.magnets);

        self.analyzing = true;
        let voice = Arc::clone(&self.voice);
        let result = voice.analyze(&text).await;
        self.analyzing = false;

        match result {
            Ok(analysis) => self.analysis = Some((poem_id, analysis)),
            Err(e) => self.fail("Could not analyze poem", &e),
        }
    }
}

#[cfg(test)]
#[path = "poetry_test.rs"]
mod tests;
