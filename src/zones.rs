//! Drop zones and release-point classification.
//!
//! The board has a pitch surface and a bench per side. Zone rectangles are
//! never cached by the engine: layout can change between frames (scrolling,
//! resizing, a bench collapsing), so every query asks a [`ZoneMeasure`] for
//! the live rectangle.

#[cfg(test)]
#[path = "zones_test.rs"]
mod zones_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coords::{Point, Rect};

/// Which team a zone or token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

/// The two kinds of drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// The pitch diagram; tokens here carry a percentage position.
    Surface,
    /// The holding area; tokens here have no position.
    Bench,
}

/// A specific zone: one side's surface or bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub side: Side,
    pub kind: ZoneKind,
}

impl Zone {
    #[must_use]
    pub fn surface(side: Side) -> Self {
        Self { side, kind: ZoneKind::Surface }
    }

    #[must_use]
    pub fn bench(side: Side) -> Self {
        Self { side, kind: ZoneKind::Bench }
    }
}

/// Where a pointer was released, relative to one side's zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Surface,
    Bench,
    Outside,
}

/// Live source of zone rectangles, in client pixels.
///
/// Returns `None` when the zone is not mounted.
pub trait ZoneMeasure {
    fn measure(&self, zone: Zone) -> Option<Rect>;
}

/// A fixed set of zone rectangles, for hosts whose layout does not move
/// and for tests.
#[derive(Debug, Clone, Default)]
pub struct FixedZones {
    rects: HashMap<Zone, Rect>,
}

impl FixedZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one zone's rectangle.
    #[must_use]
    pub fn with(mut self, zone: Zone, rect: Rect) -> Self {
        self.rects.insert(zone, rect);
        self
    }

    pub fn set(&mut self, zone: Zone, rect: Rect) {
        self.rects.insert(zone, rect);
    }
}

impl ZoneMeasure for FixedZones {
    fn measure(&self, zone: Zone) -> Option<Rect> {
        self.rects.get(&zone).copied()
    }
}

/// Classify a client-pixel point against `side`'s surface and bench.
///
/// Missing or degenerate rectangles never match. A point inside both zones
/// (overlapping layout) is treated as outside.
#[must_use]
pub fn classify(zones: &impl ZoneMeasure, side: Side, client: Point) -> DropTarget {
    let inside = |zone: Zone| zones.measure(zone).is_some_and(|r| r.contains(client));
    match (inside(Zone::surface(side)), inside(Zone::bench(side))) {
        (true, false) => DropTarget::Surface,
        (false, true) => DropTarget::Bench,
        _ => DropTarget::Outside,
    }
}
