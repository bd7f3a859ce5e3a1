#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HIT_TOLERANCE_PCT;
use crate::coords::{Point, Rect};
use crate::roster::Token;

/// Half-width and half-height of the hit box around a marker, in percent of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub x: f64,
    pub y: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { x: DEFAULT_HIT_TOLERANCE_PCT, y: DEFAULT_HIT_TOLERANCE_PCT }
    }
}

impl Tolerance {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Tolerance matching a round marker of `diameter_px` drawn on `surface`.
    ///
    /// Falls back to the default when the surface has no usable size.
    #[must_use]
    pub fn from_marker(diameter_px: f64, surface: &Rect) -> Self {
        if surface.is_degenerate() {
            return Self::default();
        }
        let radius = diameter_px / 2.0;
        Self { x: radius * 100.0 / surface.width, y: radius * 100.0 / surface.height }
    }
}

/// Find a placed token whose marker covers `point` (percent coordinates).
///
/// Uses a box test: both `|dx| < tolerance.x` and `|dy| < tolerance.y`.
/// When several tokens qualify, the first one in iteration order wins, not
/// the closest. Tokens without a position are skipped.
#[must_use]
pub fn find_nearest<'a, I>(point: Point, tokens: I, tolerance: Tolerance) -> Option<&'a Token>
where
    I: IntoIterator<Item = &'a Token>,
{
    tokens.into_iter().find(|token| {
        token.position.is_some_and(|pos| {
            let d = point.delta(pos);
            d.x.abs() < tolerance.x && d.y.abs() < tolerance.y
        })
    })
}
