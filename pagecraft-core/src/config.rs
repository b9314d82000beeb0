//! Editor tuning knobs.

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_MAX_LEVELS;

/// Configuration for the editor and its interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo levels (0 = unlimited).
    pub history_limit: usize,
    /// Pointer travel, in pixels on either axis, before a move gesture commits.
    pub drag_threshold_px: f64,
    /// Smallest width a resize may produce.
    pub min_width: f64,
    /// Smallest height a resize may produce.
    pub min_height: f64,
    /// Stand-in pixel length for a symbolic size that has no rendered measurement.
    pub fallback_rendered_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_MAX_LEVELS,
            drag_threshold_px: 5.0,
            min_width: 50.0,
            min_height: 30.0,
            fallback_rendered_px: 200.0,
        }
    }
}
