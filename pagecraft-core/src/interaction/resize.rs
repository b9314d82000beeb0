//! Handle-drag resizing of the selected element.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::editor::EditorState;
use crate::element::{Dimension, ElementId, ElementPatch, Size};
use crate::error::EditorError;
use crate::event::Point;

/// One of the eight resize handles around an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    /// Top-left corner.
    TopLeft,
    /// Top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge.
    Left,
}

impl ResizeHandle {
    /// Every handle, clockwise from the top-left corner.
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    /// Handles the canvas shows on a selected element.
    pub const CORNERS: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// How horizontal pointer travel changes the width: `1`, `-1` or `0`.
    #[must_use]
    pub const fn width_sign(self) -> f64 {
        match self {
            Self::TopRight | Self::Right | Self::BottomRight => 1.0,
            Self::TopLeft | Self::Left | Self::BottomLeft => -1.0,
            Self::Top | Self::Bottom => 0.0,
        }
    }

    /// How vertical pointer travel changes the height: `1`, `-1` or `0`.
    #[must_use]
    pub const fn height_sign(self) -> f64 {
        match self {
            Self::BottomLeft | Self::Bottom | Self::BottomRight => 1.0,
            Self::TopLeft | Self::Top | Self::TopRight => -1.0,
            Self::Left | Self::Right => 0.0,
        }
    }

    /// Wire name of the handle.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Right => "right",
            Self::BottomRight => "bottom-right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom-left",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeHandle {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|handle| handle.name() == s)
            .ok_or_else(|| EditorError::InvalidOperation(format!("unknown resize handle: {s}")))
    }
}

/// On-screen size of an element as measured by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedSize {
    /// Rendered width in pixels.
    pub width: f64,
    /// Rendered height in pixels.
    pub height: f64,
}

impl RenderedSize {
    /// Create a rendered size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pixel length to resize from: numeric sizes as stored, symbolic sizes as
/// rendered, and `fallback` when nothing usable was measured.
#[must_use]
pub fn resolve_start(dimension: Dimension, rendered: f64, fallback: f64) -> f64 {
    match dimension {
        Dimension::Px(px) => px,
        Dimension::Auto | Dimension::Full if rendered > 0.0 => rendered,
        Dimension::Auto | Dimension::Full => fallback,
    }
}

/// Size produced by dragging `handle` by `(dx, dy)` from `start`.
///
/// Both axes are rounded to whole pixels and never fall below the minimums.
#[must_use]
pub fn compute(start: RenderedSize, handle: ResizeHandle, dx: f64, dy: f64, min: RenderedSize) -> Size {
    let width = (start.width + handle.width_sign() * dx).round().max(min.width);
    let height = (start.height + handle.height_sign() * dy).round().max(min.height);
    Size::px(width, height)
}

/// An in-flight resize of the selected element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    id: ElementId,
    handle: ResizeHandle,
    start_pointer: Point,
    start_size: RenderedSize,
    min: RenderedSize,
}

impl ResizeGesture {
    /// Start resizing `id` from `handle`.
    ///
    /// Returns `None` unless `id` is the selected element.
    pub fn start(
        editor: &EditorState,
        id: ElementId,
        handle: ResizeHandle,
        pointer: Point,
        rendered: RenderedSize,
    ) -> Option<Self> {
        let node = editor.selected().filter(|node| node.id == id)?;
        let config = editor.config();
        let start_size = RenderedSize::new(
            resolve_start(node.size.width, rendered.width, config.fallback_rendered_px),
            resolve_start(node.size.height, rendered.height, config.fallback_rendered_px),
        );
        tracing::debug!(
            element = %id,
            %handle,
            width = start_size.width,
            height = start_size.height,
            "Resize gesture started"
        );
        Some(Self {
            id,
            handle,
            start_pointer: pointer,
            start_size,
            min: RenderedSize::new(config.min_width, config.min_height),
        })
    }

    /// Element being resized.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Handle being dragged.
    #[must_use]
    pub const fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// Pixel size the gesture started from.
    #[must_use]
    pub const fn start_size(&self) -> RenderedSize {
        self.start_size
    }

    /// Follow the pointer, committing the new size on every call.
    ///
    /// Returns `None` if the element has disappeared.
    pub fn update(&self, editor: &mut EditorState, pointer: Point) -> Option<Size> {
        let size = compute(
            self.start_size,
            self.handle,
            pointer.x - self.start_pointer.x,
            pointer.y - self.start_pointer.y,
            self.min,
        );
        editor.update_element(self.id, &ElementPatch::size(size)).ok()?;
        Some(size)
    }
}
