//! Poem canvas: the client-side core of the game.
//!
//! The canvas owns the word bank, the magnets placed on the fridge, and the
//! decorative stickers. It translates drag gestures into placements and
//! derives the reading order and mood used when a poem is read aloud. Nothing
//! here touches the network; saving is the view model's job.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`drag`] | Word bank / fridge bookkeeping and the drag state machine |
//! | [`geometry`] | Points, the fridge container, and bounds clamping |
//! | [`reading`] | Top-to-bottom, left-to-right reading order |
//! | [`mood`] | Keyword mood scoring and voice parameters |
//! | [`stickers`] | Sticker catalog and like-count unlocks |
//! | [`consts`] | Tile sizes and thresholds |

pub mod consts;
pub mod drag;
pub mod geometry;
pub mod mood;
pub mod reading;
pub mod stickers;

pub use drag::{CanvasError, DragSource, DragState, PoemCanvas};
pub use geometry::{Container, Point};
pub use mood::{Mood, VoiceParams, detect_mood};
pub use reading::{poem_text, reading_order};
