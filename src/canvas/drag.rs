//! Word bank / fridge bookkeeping and the drag state machine.
//!
//! `DragState` is the active gesture between drag-start and drop. A drag
//! captures the pointer's offset inside the dragged element so the tile does
//! not jump under the cursor on drop. Drops are only honored inside the
//! fridge container; anything else ends the gesture without changes.
//!
//! Bank magnets are never removed from the bank. Placing one marks it
//! `on_fridge` and appends a `PlacedMagnet` with the same id; removing it from
//! the fridge clears the flag again, so each word is on the fridge at most
//! once.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use super::consts::{MAGNET_HEIGHT_PX, MAGNET_WIDTH_PX, STICKER_SIZE_PX};
use super::geometry::{Container, Point};
use super::stickers;
use crate::poem::{Magnet, PlacedMagnet, PoemDraft, Sticker};

// =============================================================================
// TYPES
// =============================================================================

/// Where a dragged magnet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// The word bank below the fridge.
    Bank,
    /// Already placed on the fridge; a drop only moves it.
    Fridge,
}

/// The active gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A word magnet is being dragged.
    DraggingMagnet {
        id: String,
        source: DragSource,
        /// Pointer position relative to the dragged element's top-left corner.
        offset: Point,
    },
    /// A placed sticker is being dragged.
    DraggingSticker { id: String, offset: Point },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("unknown magnet: {0}")]
    UnknownMagnet(String),
    #[error("magnet already on the fridge: {0}")]
    AlreadyOnFridge(String),
    #[error("unknown sticker: {0}")]
    UnknownSticker(String),
    #[error("unknown sticker kind: {0}")]
    UnknownStickerKind(String),
    #[error("sticker {name} unlocks at {required} likes (have {like_total})")]
    StickerLocked { name: String, required: i64, like_total: i64 },
    #[error("no drag in progress")]
    NotDragging,
}

// =============================================================================
// CANVAS
// =============================================================================

/// Poem-in-progress: the word bank, placed magnets, stickers, and drag state.
#[derive(Debug, Clone, Default)]
pub struct PoemCanvas {
    available: Vec<Magnet>,
    fridge: Vec<PlacedMagnet>,
    stickers: Vec<Sticker>,
    drag: DragState,
    next_sticker_seq: u64,
}

impl PoemCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a canvas whose bank holds `words`.
    #[must_use]
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut canvas = Self::new();
        canvas.load_words(words);
        canvas
    }

    /// Replace the bank with fresh magnets and reset everything else.
    pub fn load_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available = words
            .into_iter()
            .enumerate()
            .map(|(i, text)| Magnet { id: format!("word-{i}"), text: text.into(), on_fridge: false })
            .collect();
        self.fridge.clear();
        self.stickers.clear();
        self.drag = DragState::Idle;
    }

    #[must_use]
    pub fn available(&self) -> &[Magnet] {
        &self.available
    }

    #[must_use]
    pub fn fridge(&self) -> &[PlacedMagnet] {
        &self.fridge
    }

    #[must_use]
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// True when no magnet is on the fridge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fridge.is_empty()
    }

    /// Words currently on the fridge, in placement order.
    #[must_use]
    pub fn placed_words(&self) -> Vec<&str> {
        self.fridge.iter().map(|m| m.text.as_str()).collect()
    }

    // -------------------------------------------------------------------------
    // Drag gestures
    // -------------------------------------------------------------------------

    /// Start dragging a magnet. `element_origin` is the top-left corner of the
    /// dragged element on screen.
    ///
    /// # Errors
    ///
    /// Fails if the magnet does not exist in `source`, or if a bank magnet is
    /// already on the fridge.
    pub fn begin_drag(
        &mut self,
        id: &str,
        source: DragSource,
        pointer: Point,
        element_origin: Point,
    ) -> Result<(), CanvasError> {
        match source {
            DragSource::Bank => {
                let magnet = self
                    .available
                    .iter()
                    .find(|m| m.id == id)
                    .ok_or_else(|| CanvasError::UnknownMagnet(id.to_owned()))?;
                if magnet.on_fridge {
                    return Err(CanvasError::AlreadyOnFridge(id.to_owned()));
                }
            }
            DragSource::Fridge => {
                if !self.fridge.iter().any(|m| m.id == id) {
                    return Err(CanvasError::UnknownMagnet(id.to_owned()));
                }
            }
        }

        self.drag = DragState::DraggingMagnet { id: id.to_owned(), source, offset: pointer.sub(element_origin) };
        Ok(())
    }

    /// Start dragging a placed sticker.
    ///
    /// # Errors
    ///
    /// Fails if no sticker has this id.
    pub fn begin_sticker_drag(&mut self, id: &str, pointer: Point, element_origin: Point) -> Result<(), CanvasError> {
        if !self.stickers.iter().any(|s| s.id == id) {
            return Err(CanvasError::UnknownSticker(id.to_owned()));
        }
        self.drag = DragState::DraggingSticker { id: id.to_owned(), offset: pointer.sub(element_origin) };
        Ok(())
    }

    /// End the gesture over the fridge. Returns the clamped container-relative
    /// position, or `None` when the pointer is outside the container (the drop
    /// is ignored). The canvas is idle afterwards either way.
    ///
    /// # Errors
    ///
    /// Fails with `NotDragging` when idle, or if the dragged item vanished
    /// (e.g. the bank was reloaded mid-drag).
    pub fn drop_on_fridge(&mut self, pointer: Point, container: &Container) -> Result<Option<Point>, CanvasError> {
        let drag = std::mem::take(&mut self.drag);
        if !container.contains(pointer) {
            return match drag {
                DragState::Idle => Err(CanvasError::NotDragging),
                _ => Ok(None),
            };
        }
        let relative = pointer.sub(container.origin);

        match drag {
            DragState::Idle => Err(CanvasError::NotDragging),
            DragState::DraggingMagnet { id, source, offset } => {
                let pos = container.clamp(relative.sub(offset), MAGNET_WIDTH_PX, MAGNET_HEIGHT_PX);
                match source {
                    DragSource::Bank => self.place_from_bank(&id, pos)?,
                    DragSource::Fridge => {
                        let placed = self
                            .fridge
                            .iter_mut()
                            .find(|m| m.id == id)
                            .ok_or(CanvasError::UnknownMagnet(id))?;
                        placed.x = pos.x;
                        placed.y = pos.y;
                    }
                }
                Ok(Some(pos))
            }
            DragState::DraggingSticker { id, offset } => {
                let pos = container.clamp(relative.sub(offset), STICKER_SIZE_PX, STICKER_SIZE_PX);
                let sticker = self
                    .stickers
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or(CanvasError::UnknownSticker(id))?;
                sticker.x = pos.x;
                sticker.y = pos.y;
                Ok(Some(pos))
            }
        }
    }

    /// Abandon the current gesture (dropped outside any target).
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    fn place_from_bank(&mut self, id: &str, pos: Point) -> Result<(), CanvasError> {
        let magnet = self
            .available
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CanvasError::UnknownMagnet(id.to_owned()))?;
        if magnet.on_fridge {
            return Err(CanvasError::AlreadyOnFridge(id.to_owned()));
        }
        magnet.on_fridge = true;
        self.fridge.push(PlacedMagnet { id: magnet.id.clone(), text: magnet.text.clone(), x: pos.x, y: pos.y });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Direct edits
    // -------------------------------------------------------------------------

    /// Take a magnet off the fridge and make it available in the bank again.
    ///
    /// # Errors
    ///
    /// Fails if the magnet is not on the fridge.
    pub fn remove_from_fridge(&mut self, id: &str) -> Result<(), CanvasError> {
        let pos = self
            .fridge
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CanvasError::UnknownMagnet(id.to_owned()))?;
        self.fridge.remove(pos);
        if let Some(magnet) = self.available.iter_mut().find(|m| m.id == id) {
            magnet.on_fridge = false;
        }
        if matches!(&self.drag, DragState::DraggingMagnet { id: dragged, .. } if dragged == id) {
            self.drag = DragState::Idle;
        }
        Ok(())
    }

    /// Place a new sticker of kind `kind_name` at a container-relative position.
    ///
    /// # Errors
    ///
    /// Fails for unknown kinds or kinds the viewer has not unlocked.
    pub fn add_sticker(
        &mut self,
        kind_name: &str,
        at: Point,
        container: &Container,
        like_total: i64,
    ) -> Result<&Sticker, CanvasError> {
        let kind =
            stickers::find_kind(kind_name).ok_or_else(|| CanvasError::UnknownStickerKind(kind_name.to_owned()))?;
        if !kind.is_unlocked(like_total) {
            return Err(CanvasError::StickerLocked {
                name: kind.name.to_owned(),
                required: kind.unlock_likes,
                like_total,
            });
        }

        let pos = container.clamp(at, STICKER_SIZE_PX, STICKER_SIZE_PX);
        let id = format!("sticker-{}", self.next_sticker_seq);
        self.next_sticker_seq += 1;
        self.stickers.push(Sticker {
            id,
            name: kind.name.to_owned(),
            image_path: kind.image_path.to_owned(),
            x: pos.x,
            y: pos.y,
        });
        Ok(&self.stickers[self.stickers.len() - 1])
    }

    /// Move a placed sticker to a container-relative position, clamped.
    ///
    /// # Errors
    ///
    /// Fails if no sticker has this id.
    pub fn move_sticker(&mut self, id: &str, at: Point, container: &Container) -> Result<Point, CanvasError> {
        let sticker = self
            .stickers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CanvasError::UnknownSticker(id.to_owned()))?;
        let pos = container.clamp(at, STICKER_SIZE_PX, STICKER_SIZE_PX);
        sticker.x = pos.x;
        sticker.y = pos.y;
        Ok(pos)
    }

    /// Remove a placed sticker.
    ///
    /// # Errors
    ///
    /// Fails if no sticker has this id.
    pub fn remove_sticker(&mut self, id: &str) -> Result<(), CanvasError> {
        let pos = self
            .stickers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CanvasError::UnknownSticker(id.to_owned()))?;
        self.stickers.remove(pos);
        Ok(())
    }

    /// Return every placed magnet to the bank and drop all stickers.
    pub fn clear(&mut self) {
        for magnet in &mut self.available {
            magnet.on_fridge = false;
        }
        self.fridge.clear();
        self.stickers.clear();
        self.drag = DragState::Idle;
    }

    /// Snapshot of the current layout for saving.
    #[must_use]
    pub fn draft(&self) -> PoemDraft {
        PoemDraft { magnets: self.fridge.clone(), stickers: self.stickers.clone() }
    }
}
