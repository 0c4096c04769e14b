//! Single-slot audio playback.
//!
//! At most one poem plays at a time. Each `request` bumps a generation
//! counter and returns a ticket; only the ticket from the latest request may
//! fill the slot, so a slow TTS response for a superseded poem is dropped.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub poem_id: Uuid,
    pub audio_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PlaybackTicket {
    generation: u64,
    pub poem_id: Uuid,
}

#[derive(Debug, Default)]
pub struct Playback {
    generation: u64,
    loading: Option<Uuid>,
    current: Option<NowPlaying>,
}

impl Playback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `poem_id`, stopping whatever was playing.
    pub fn request(&mut self, poem_id: Uuid) -> PlaybackTicket {
        self.generation += 1;
        self.current = None;
        self.loading = Some(poem_id);
        PlaybackTicket { generation: self.generation, poem_id }
    }

    #[must_use]
    pub fn is_current(&self, ticket: PlaybackTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Fill the slot with fetched audio. Returns false for a stale ticket.
    pub fn resolve(&mut self, ticket: PlaybackTicket, audio_url: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = None;
        self.current = Some(NowPlaying { poem_id: ticket.poem_id, audio_url });
        true
    }

    /// Abandon a failed load. Returns false for a stale ticket.
    pub fn fail(&mut self, ticket: PlaybackTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = None;
        true
    }

    /// Stop playback and invalidate any outstanding ticket.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.loading = None;
        self.current = None;
    }

    /// The audio for `poem_id` finished on its own.
    pub fn ended(&mut self, poem_id: Uuid) {
        if self.current.as_ref().is_some_and(|p| p.poem_id == poem_id) {
            self.current = None;
        }
    }

    #[must_use]
    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.current.as_ref()
    }

    /// The poem whose audio is being fetched, if any.
    #[must_use]
    pub fn loading(&self) -> Option<Uuid> {
        self.loading
    }
}

#[cfg(test)]
#[path = "playback_test.rs"]
mod tests;
