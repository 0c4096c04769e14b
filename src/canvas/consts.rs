//! Shared numeric constants for the canvas.

// ── Tiles ───────────────────────────────────────────────────────

/// Approximate rendered width of a word magnet, used for right-edge clamping.
pub const MAGNET_WIDTH_PX: f64 = 100.0;

/// Approximate rendered height of a word magnet, used for bottom-edge clamping.
pub const MAGNET_HEIGHT_PX: f64 = 40.0;

/// Rendered size of a (square) sticker.
pub const STICKER_SIZE_PX: f64 = 60.0;

// ── Reading order ───────────────────────────────────────────────

/// Magnets whose vertical positions differ by less than this share a line.
pub const ROW_THRESHOLD_PX: f64 = 30.0;
