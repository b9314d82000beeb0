//! Drag to move placed elements and drag to create from the palette.

use crate::editor::EditorState;
use crate::element::{ElementId, ElementKind, ElementPatch, NewElement, Position};
use crate::event::{DropSignal, Point};

/// An in-flight move of an already placed element.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveGesture {
    id: ElementId,
    start_pointer: Point,
    start_position: Position,
    threshold: f64,
}

impl MoveGesture {
    /// Start moving `id`: selects it and records where pointer and element are.
    ///
    /// Returns `None` if the element is not on the active page.
    pub fn start(editor: &mut EditorState, id: ElementId, pointer: Point) -> Option<Self> {
        let start_position = editor.select_element(Some(id))?.position;
        tracing::debug!(element = %id, x = start_position.x, y = start_position.y, "Move gesture started");
        Some(Self {
            id,
            start_pointer: pointer,
            start_position,
            threshold: editor.config().drag_threshold_px,
        })
    }

    /// Element being moved.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Position the element would take for `pointer`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn candidate(&self, pointer: Point) -> Position {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;
        Position::new(
            self.start_position.x.saturating_add(dx.round() as i64),
            self.start_position.y.saturating_add(dy.round() as i64),
        )
    }

    /// Check whether `pointer` is far enough from the start to commit.
    #[must_use]
    pub fn exceeds_threshold(&self, pointer: Point) -> bool {
        (pointer.x - self.start_pointer.x).abs() > self.threshold
            || (pointer.y - self.start_pointer.y).abs() > self.threshold
    }

    /// Follow the pointer, committing the new position once past the threshold.
    ///
    /// Returns the committed position, or `None` while still within the
    /// threshold or if the element has disappeared.
    pub fn update(&self, editor: &mut EditorState, pointer: Point) -> Option<Position> {
        if !self.exceeds_threshold(pointer) {
            return None;
        }
        let position = self.candidate(pointer);
        editor
            .update_element(self.id, &ElementPatch::position(position))
            .ok()?;
        Some(position)
    }
}

/// An in-flight drag of a palette item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateGesture {
    kind: ElementKind,
}

impl CreateGesture {
    /// Start dragging a new element of `kind`.
    #[must_use]
    pub fn start(kind: ElementKind) -> Self {
        tracing::debug!(%kind, "Create gesture started");
        Self { kind }
    }

    /// Kind carried by the gesture.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Finish the gesture.
    ///
    /// Inserts a root element at the canvas-relative drop point when `drop`
    /// names the carried kind; otherwise nothing happens.
    pub fn finish(self, editor: &mut EditorState, drop: Option<&DropSignal>) -> Option<ElementId> {
        let Some(signal) = drop.filter(|signal| signal.kind() == Some(self.kind)) else {
            tracing::debug!(kind = %self.kind, "Create gesture abandoned, no matching drop");
            return None;
        };
        let position = signal.canvas_position();
        let element = NewElement::new(self.kind)
            .at(position.x, position.y)
            .with_size(self.kind.default_size());
        Some(editor.add_element(element))
    }
}
