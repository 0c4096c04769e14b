//! Container geometry and bounds clamping.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A 2D point in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

/// The fridge door's droppable region, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Top-left corner of the region on screen.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Container {
    #[must_use]
    pub const fn new(origin: Point, width: f64, height: f64) -> Self {
        Self { origin, width, height }
    }

    /// Whether a screen point lies inside the region (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.width
            && p.y <= self.origin.y + self.height
    }

    /// Clamp a container-relative position so an item of the given size
    /// stays inside. When the container is smaller than the item, the
    /// position pins to zero.
    #[must_use]
    pub fn clamp(&self, pos: Point, item_width: f64, item_height: f64) -> Point {
        Point {
            x: pos.x.min(self.width - item_width).max(0.0),
            y: pos.y.min(self.height - item_height).max(0.0),
        }
    }
}
