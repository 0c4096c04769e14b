//! Sticker catalog and like-count unlocks.
//!
//! Stickers are purely decorative. Each kind unlocks once the viewer's
//! cumulative like count (summed over all of their poems) reaches the kind's
//! threshold.

#[cfg(test)]
#[path = "stickers_test.rs"]
mod stickers_test;

use serde::Serialize;

/// One sticker kind in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StickerKind {
    pub name: &'static str,
    pub image_path: &'static str,
    /// Cumulative likes required before the kind can be placed.
    pub unlock_likes: i64,
}

impl StickerKind {
    #[must_use]
    pub fn is_unlocked(&self, like_total: i64) -> bool {
        like_total >= self.unlock_likes
    }
}

/// All sticker kinds, cheapest first.
pub const STICKER_CATALOG: &[StickerKind] = &[
    StickerKind { name: "star", image_path: "/stickers/star.png", unlock_likes: 0 },
    StickerKind { name: "heart", image_path: "/stickers/heart.png", unlock_likes: 1 },
    StickerKind { name: "snowflake", image_path: "/stickers/snowflake.png", unlock_likes: 5 },
    StickerKind { name: "sun", image_path: "/stickers/sun.png", unlock_likes: 10 },
    StickerKind { name: "rainbow", image_path: "/stickers/rainbow.png", unlock_likes: 25 },
    StickerKind { name: "crown", image_path: "/stickers/crown.png", unlock_likes: 50 },
];

/// Look up a kind by name.
#[must_use]
pub fn find_kind(name: &str) -> Option<&'static StickerKind> {
    STICKER_CATALOG.iter().find(|k| k.name == name)
}

/// Catalog entry annotated with the viewer's unlock state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StickerUnlock {
    #[serde(flatten)]
    pub kind: StickerKind,
    pub unlocked: bool,
}

/// The whole catalog annotated for a viewer with `like_total` likes.
#[must_use]
pub fn catalog_for(like_total: i64) -> Vec<StickerUnlock> {
    STICKER_CATALOG
        .iter()
        .map(|kind| StickerUnlock { kind: *kind, unlocked: kind.is_unlocked(like_total) })
        .collect()
}
