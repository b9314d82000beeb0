//! Responsive projection.
//!
//! Breakpoints only change how wide an element is displayed; the stored size
//! is never touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Dimension, Size};
use crate::error::EditorError;

/// Widest numeric width shown in tablet mode.
pub const TABLET_MAX_WIDTH: f64 = 700.0;
/// Widest numeric width shown in mobile mode.
pub const MOBILE_MAX_WIDTH: f64 = 350.0;

/// Preview breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsiveMode {
    /// Full-width desktop preview.
    #[default]
    Desktop,
    /// Tablet preview.
    Tablet,
    /// Phone preview.
    Mobile,
}

impl ResponsiveMode {
    /// Every mode.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Largest numeric width displayed in this mode, if any.
    #[must_use]
    pub const fn max_width(self) -> Option<f64> {
        match self {
            Self::Desktop => None,
            Self::Tablet => Some(TABLET_MAX_WIDTH),
            Self::Mobile => Some(MOBILE_MAX_WIDTH),
        }
    }

    /// Width of the canvas frame in this mode.
    #[must_use]
    pub const fn canvas_width(self) -> Dimension {
        match self {
            Self::Desktop => Dimension::Full,
            Self::Tablet => Dimension::Px(768.0),
            Self::Mobile => Dimension::Px(375.0),
        }
    }
}

impl fmt::Display for ResponsiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        })
    }
}

impl FromStr for ResponsiveMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EditorError::InvalidOperation(format!("unknown responsive mode: {s}")))
    }
}

/// Display size of `size` under `mode`.
///
/// Only numeric widths above the mode's limit change; `auto`, `100%` and the
/// height always pass through.
#[must_use]
pub fn project(size: Size, mode: ResponsiveMode) -> Size {
    let width = match (size.width, mode.max_width()) {
        (Dimension::Px(w), Some(max)) if w > max => Dimension::Px(max),
        (width, _) => width,
    };
    Size { width, ..size }
}
