//! Engine tuning parsed from a host-supplied JSON object.
//!
//! Every field is optional; absent fields take the defaults in
//! [`crate::consts`]. The host usually passes this once at mount time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CLICK_THRESHOLD_PX, DEFAULT_ARROW_COLOR, MIN_ARROW_FRACTION};
use crate::hit::Tolerance;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Swap hit box around surface markers, in percent.
    pub hit_tolerance: Tolerance,
    /// Derive the swap hit box from the rendered marker size instead of `hit_tolerance`.
    pub tolerance_from_marker: bool,
    /// Pointer travel per axis, in CSS pixels, below which a token gesture is a click.
    pub click_threshold_px: f64,
    /// Arrows must be strictly longer than this fraction of the surface diagonal.
    pub min_arrow_fraction: f64,
    /// Color for newly drawn arrows.
    pub arrow_color: String,
    /// Compact marker sizing.
    pub compact: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: Tolerance::default(),
            tolerance_from_marker: false,
            click_threshold_px: CLICK_THRESHOLD_PX,
            min_arrow_fraction: MIN_ARROW_FRACTION,
            arrow_color: DEFAULT_ARROW_COLOR.to_string(),
            compact: false,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make gestures impossible or unbounded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.hit_tolerance.x) || !positive(self.hit_tolerance.y) {
            return Err(ConfigError::Invalid { field: "hit_tolerance", reason: "must be positive" });
        }
        if !(self.click_threshold_px.is_finite() && self.click_threshold_px >= 0.0) {
            return Err(ConfigError::Invalid { field: "click_threshold_px", reason: "must be non-negative" });
        }
        if !(self.min_arrow_fraction.is_finite() && (0.0..1.0).contains(&self.min_arrow_fraction)) {
            return Err(ConfigError::Invalid { field: "min_arrow_fraction", reason: "must be in [0, 1)" });
        }
        if self.arrow_color.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "arrow_color", reason: "must not be empty" });
        }
        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
