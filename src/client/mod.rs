//! Client view model.
//!
//! ARCHITECTURE
//! ============
//! Everything a front end needs to drive the game without touching the
//! network directly: the screen router (`app`), the poetry view state object
//! (`poetry`), and its helpers for feed paging, optimistic likes, and audio
//! playback. Backends sit behind two narrow traits: `PoemRepository` for
//! poems and words, `VoiceApi` for speech and analysis. `HttpClient`
//! implements both against the server; `LocalRepository` runs in-process
//! over a `PoemStore`.
//!
//! The view model is single-owner: async methods take `&mut self` and hold
//! no locks.

pub mod app;
pub mod feed;
pub mod http;
pub mod likes;
pub mod playback;
pub mod poetry;
pub mod repository;
pub mod voice;

pub use app::{AppRouter, LoginMode, Screen};
pub use feed::FeedPager;
pub use http::HttpClient;
pub use likes::{LikeTracker, PendingLike};
pub use playback::{NowPlaying, Playback, PlaybackTicket};
pub use poetry::{Notice, PoetryView, ViewMode};
pub use repository::{LocalRepository, PoemRepository};
pub use voice::VoiceApi;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("not signed in")]
    Unauthorized,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {status}")]
    Status { status: u16 },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Service(String),
}
