//! Input events for editor interaction.

use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, Position};

/// A point in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Phase of a pointer or touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button or finger down.
    Start,
    /// Pointer moved while down.
    Move,
    /// Button or finger released.
    End,
}

/// A mouse pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in viewport coordinates.
    pub x: f64,
    /// Y position in viewport coordinates.
    pub y: f64,
    /// Mouse button (0 = left, 1 = middle, 2 = right).
    #[serde(default)]
    pub button: u8,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position in viewport coordinates.
    pub x: f64,
    /// Y position in viewport coordinates.
    pub y: f64,
}

/// A touch event with one or more touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: PointerPhase,
    /// All current touch points.
    pub touches: Vec<TouchPoint>,
    /// Timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: PointerPhase, touches: Vec<TouchPoint>, timestamp_ms: u64) -> Self {
        Self {
            phase,
            touches,
            timestamp_ms,
        }
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Check if this is a multi-touch event.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.touches.len() > 1
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    #[serde(default)]
    pub shift: bool,
    /// Control key pressed.
    #[serde(default)]
    pub ctrl: bool,
    /// Alt/Option key pressed.
    #[serde(default)]
    pub alt: bool,
    /// Meta/Command key pressed.
    #[serde(default)]
    pub meta: bool,
}

impl KeyModifiers {
    /// Control on most platforms, Command on macOS.
    #[must_use]
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the host (`"Delete"`, `"z"`, ...).
    pub key: String,
    /// Active modifier keys.
    #[serde(default)]
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a key event.
    #[must_use]
    pub fn new(key: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Map this key press to an editor command.
    #[must_use]
    pub fn command(&self) -> Option<KeyCommand> {
        let command = self.modifiers.command();
        match self.key.as_str() {
            "Delete" | "Backspace" if !command => Some(KeyCommand::DeleteSelected),
            "z" | "Z" if command && self.modifiers.shift => Some(KeyCommand::Redo),
            "z" | "Z" if command => Some(KeyCommand::Undo),
            "y" | "Y" if command => Some(KeyCommand::Redo),
            _ => None,
        }
    }
}

/// Editor commands bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Delete the selected element.
    DeleteSelected,
    /// Undo the last change.
    Undo,
    /// Redo the last undone change.
    Redo,
}

/// Viewport offset of the canvas origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    /// Viewport x of the canvas's left edge.
    pub left: f64,
    /// Viewport y of the canvas's top edge.
    pub top: f64,
}

impl CanvasRect {
    /// Create a canvas rect.
    #[must_use]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Convert a viewport point to whole-pixel canvas coordinates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_canvas(self, point: Point) -> Position {
        Position::new(
            (point.x - self.left).round() as i64,
            (point.y - self.top).round() as i64,
        )
    }
}

/// What the canvas reports when something is dropped on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropSignal {
    /// Kind name carried by the drag payload.
    pub payload: String,
    /// Drop point in viewport coordinates.
    pub point: Point,
    /// Canvas placement at drop time.
    #[serde(default)]
    pub canvas: CanvasRect,
}

impl DropSignal {
    /// Create a drop signal.
    #[must_use]
    pub fn new(payload: impl Into<String>, point: Point, canvas: CanvasRect) -> Self {
        Self {
            payload: payload.into(),
            point,
            canvas,
        }
    }

    /// Element kind named by the payload, if it names one.
    #[must_use]
    pub fn kind(&self) -> Option<ElementKind> {
        self.payload.parse().ok()
    }

    /// Drop point relative to the canvas origin.
    #[must_use]
    pub fn canvas_position(&self) -> Position {
        self.canvas.to_canvas(self.point)
    }
}

/// All input events the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Mouse pointer event.
    Pointer(PointerEvent),
    /// Raw touch event.
    Touch(TouchEvent),
    /// Keyboard event.
    Key(KeyEvent),
}

impl InputEvent {
    /// Phase of a pointer or touch event; `None` for key events.
    #[must_use]
    pub const fn phase(&self) -> Option<PointerPhase> {
        match self {
            Self::Pointer(event) => Some(event.phase),
            Self::Touch(event) => Some(event.phase),
            Self::Key(_) => None,
        }
    }

    /// Reduce pointer and touch input to a phase and a primary point.
    ///
    /// A touch event with no touch points, and every key event, yields `None`.
    #[must_use]
    pub fn pointer(&self) -> Option<(PointerPhase, Point)> {
        match self {
            Self::Pointer(event) => Some((event.phase, Point::new(event.x, event.y))),
            Self::Touch(event) => event
                .primary_touch()
                .map(|touch| (event.phase, Point::new(touch.x, touch.y))),
            Self::Key(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(name, modifiers)
    }

    #[test]
    fn test_key_commands() {
        let none = KeyModifiers::default();
        let ctrl = KeyModifiers {
            ctrl: true,
            ..KeyModifiers::default()
        };
        let cmd_shift = KeyModifiers {
            meta: true,
            shift: true,
            ..KeyModifiers::default()
        };

        assert_eq!(key("Delete", none).command(), Some(KeyCommand::DeleteSelected));
        assert_eq!(key("Backspace", none).command(), Some(KeyCommand::DeleteSelected));
        assert_eq!(key("z", ctrl).command(), Some(KeyCommand::Undo));
        assert_eq!(key("Z", cmd_shift).command(), Some(KeyCommand::Redo));
        assert_eq!(key("y", ctrl).command(), Some(KeyCommand::Redo));
        assert_eq!(key("z", none).command(), None);
        assert_eq!(key("a", ctrl).command(), None);
    }

    #[test]
    fn test_canvas_relative_drop() {
        let signal = DropSignal::new(
            "button",
            Point::new(420.4, 140.6),
            CanvasRect::new(300.0, 100.0),
        );
        assert_eq!(signal.kind(), Some(ElementKind::Button));
        assert_eq!(signal.canvas_position(), Position::new(120, 41));
    }

    #[test]
    fn test_drop_unknown_payload() {
        let signal = DropSignal::new("files", Point::default(), CanvasRect::default());
        assert_eq!(signal.kind(), None);
    }

    #[test]
    fn test_touch_reduces_to_primary_point() {
        let event = InputEvent::Touch(TouchEvent::new(
            PointerPhase::Move,
            vec![
                TouchPoint { id: 0, x: 10.0, y: 20.0 },
                TouchPoint { id: 1, x: 50.0, y: 60.0 },
            ],
            0,
        ));
        assert_eq!(event.pointer(), Some((PointerPhase::Move, Point::new(10.0, 20.0))));

        let empty = InputEvent::Touch(TouchEvent::new(PointerPhase::End, Vec::new(), 0));
        assert_eq!(empty.pointer(), None);
        assert_eq!(empty.phase(), Some(PointerPhase::End));
    }

    #[test]
    fn test_input_event_wire_format() {
        let json = r#"{"type":"Pointer","data":{"phase":"start","x":1.0,"y":2.0}}"#;
        let event: InputEvent = serde_json::from_str(json).expect("parse");
        assert_eq!(event.pointer(), Some((PointerPhase::Start, Point::new(1.0, 2.0))));
    }
}
