//! Shared numeric constants for the pitchboard crate.

// ── Coordinates ─────────────────────────────────────────────────

/// Lower bound for a dragged token's live position, in percent.
pub const CLAMP_MIN_PCT: f64 = 2.0;

/// Upper bound for a dragged token's live position, in percent.
pub const CLAMP_MAX_PCT: f64 = 98.0;

// ── Gestures ────────────────────────────────────────────────────

/// Pointer travel (per axis, CSS pixels) below which a token gesture counts as a click.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;

/// Minimum arrow length as a fraction of the surface diagonal.
///
/// A drawn arrow must be strictly longer than this to be kept.
pub const MIN_ARROW_FRACTION: f64 = 0.01;

/// Color given to newly drawn arrows.
pub const DEFAULT_ARROW_COLOR: &str = "#FFD400";

// ── Hit-testing ─────────────────────────────────────────────────

/// Per-axis half-width of the swap hit box, in percent of the surface.
pub const DEFAULT_HIT_TOLERANCE_PCT: f64 = 5.0;

// ── Markers ─────────────────────────────────────────────────────

/// Marker diameter in CSS pixels at full size.
pub const MARKER_DIAMETER_PX: f64 = 36.0;

/// Marker diameter in CSS pixels in compact layouts.
pub const MARKER_DIAMETER_COMPACT_PX: f64 = 26.0;

/// Shirt-number font size at full size.
pub const NUMBER_FONT_PX: f64 = 14.0;

/// Shirt-number font size in compact layouts.
pub const NUMBER_FONT_COMPACT_PX: f64 = 11.0;

/// Name label font size at full size.
pub const NAME_FONT_PX: f64 = 11.0;

/// Name label font size in compact layouts.
pub const NAME_FONT_COMPACT_PX: f64 = 9.0;

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_DEFAULT: &str = "default";
pub const CURSOR_GRABBING: &str = "grabbing";
pub const CURSOR_CROSSHAIR: &str = "crosshair";
