//! Marker sizing and label policy for tokens drawn on the surface.
//!
//! Markers are absolutely positioned by their percentage coordinates and
//! centered on that point. In compact layouts (narrow screens, embedded
//! previews) the marker and both labels shrink. The marker size also drives
//! the swap hit box, see [`hit_tolerance`].

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::Serialize;

use crate::consts::{
    MARKER_DIAMETER_COMPACT_PX, MARKER_DIAMETER_PX, NAME_FONT_COMPACT_PX, NAME_FONT_PX, NUMBER_FONT_COMPACT_PX,
    NUMBER_FONT_PX,
};
use crate::coords::Rect;
use crate::hit::Tolerance;
use crate::roster::{Token, TokenId};

/// Rendered sizes for one marker, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerMetrics {
    pub diameter_px: f64,
    pub number_font_px: f64,
    pub name_font_px: f64,
}

impl MarkerMetrics {
    #[must_use]
    pub fn for_display(compact: bool) -> Self {
        if compact {
            Self {
                diameter_px: MARKER_DIAMETER_COMPACT_PX,
                number_font_px: NUMBER_FONT_COMPACT_PX,
                name_font_px: NAME_FONT_COMPACT_PX,
            }
        } else {
            Self { diameter_px: MARKER_DIAMETER_PX, number_font_px: NUMBER_FONT_PX, name_font_px: NAME_FONT_PX }
        }
    }
}

/// Everything a renderer needs to place one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayout {
    pub id: TokenId,
    /// CSS `left`, in percent of the surface; the marker is translated by -50%.
    pub left_pct: f64,
    /// CSS `top`, in percent of the surface; the marker is translated by -50%.
    pub top_pct: f64,
    pub metrics: MarkerMetrics,
    pub number: u32,
    pub label: String,
}

/// The name shown under a marker: the custom label when set, otherwise the
/// last word of the full name ("Kevin De Bruyne" → "Bruyne").
#[must_use]
pub fn short_label(name: &str, custom: Option<&str>) -> String {
    if let Some(label) = custom.map(str::trim).filter(|l| !l.is_empty()) {
        return label.to_string();
    }
    name.split_whitespace().next_back().unwrap_or_default().to_string()
}

/// Layout for a surface token. Benched tokens have no position and yield `None`.
#[must_use]
pub fn marker_layout(token: &Token, compact: bool) -> Option<MarkerLayout> {
    let pos = token.position?;
    Some(MarkerLayout {
        id: token.id,
        left_pct: pos.x,
        top_pct: pos.y,
        metrics: MarkerMetrics::for_display(compact),
        number: token.number,
        label: short_label(&token.name, token.label.as_deref()),
    })
}

/// Hit tolerance matching the rendered marker footprint on `surface`.
#[must_use]
pub fn hit_tolerance(compact: bool, surface: &Rect) -> Tolerance {
    Tolerance::from_marker(MarkerMetrics::for_display(compact).diameter_px, surface)
}
