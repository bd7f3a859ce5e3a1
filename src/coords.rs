//! Pixel ↔ percentage coordinate mapping.
//!
//! Pointer events arrive in client pixels; everything the engine stores is in
//! percent of a reference rectangle (usually the pitch surface), so positions
//! survive resizes and differ between devices. All conversions go through
//! this module.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CLAMP_MAX_PCT, CLAMP_MIN_PCT};

/// A point in either client-pixel or percentage space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `other - self`.
    #[must_use]
    pub fn delta(self, other: Point) -> Point {
        Point { x: other.x - self.x, y: other.y - self.y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        let d = self.delta(other);
        d.x.hypot(d.y)
    }
}

/// An axis-aligned rectangle in client pixels, as reported by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// True when the rectangle cannot serve as a mapping reference
    /// (not laid out yet, collapsed, or garbage values).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let finite = self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite();
        !(finite && self.width > 0.0 && self.height > 0.0)
    }

    /// Point-in-rectangle test. Left/top edges are inclusive, right/bottom exclusive,
    /// so two abutting rectangles never both contain a point.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        p.x >= self.left && p.x < self.left + self.width && p.y >= self.top && p.y < self.top + self.height
    }

    /// Length of the diagonal in pixels.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

/// Map a client-pixel point into percent of `rect`, or `None` if `rect` is degenerate.
#[must_use]
pub fn try_to_percentage(client: Point, rect: &Rect) -> Option<Point> {
    if rect.is_degenerate() {
        return None;
    }
    Some(Point {
        x: (client.x - rect.left) / rect.width * 100.0,
        y: (client.y - rect.top) / rect.height * 100.0,
    })
}

/// Map a client-pixel point into percent of `rect`. Unclamped: points outside
/// the rectangle map below 0 or above 100. A degenerate `rect` yields the origin.
#[must_use]
pub fn to_percentage(client: Point, rect: &Rect) -> Point {
    try_to_percentage(client, rect).unwrap_or_default()
}

/// Like [`to_percentage`], but each axis is clamped to
/// [`CLAMP_MIN_PCT`, `CLAMP_MAX_PCT`] so a marker never sits flush against
/// the surface edge.
#[must_use]
pub fn to_percentage_clamped(client: Point, rect: &Rect) -> Point {
    clamp_percentage(to_percentage(client, rect))
}

/// Clamp an already-mapped percentage point into the token range.
#[must_use]
pub fn clamp_percentage(p: Point) -> Point {
    Point {
        x: p.x.clamp(CLAMP_MIN_PCT, CLAMP_MAX_PCT),
        y: p.y.clamp(CLAMP_MIN_PCT, CLAMP_MAX_PCT),
    }
}

/// Inverse of [`to_percentage`]: percent of `rect` back to client pixels.
#[must_use]
pub fn from_percentage(pct: Point, rect: &Rect) -> Point {
    Point {
        x: rect.left + pct.x / 100.0 * rect.width,
        y: rect.top + pct.y / 100.0 * rect.height,
    }
}
