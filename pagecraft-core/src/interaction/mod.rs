//! # Interaction Engine
//!
//! Turns pointer and touch streams into element mutations.
//!
//! ## Gesture lifecycle
//!
//! ```text
//!            pointer_down                pointer_up
//!   Idle ─────────────────► Active ─────────────────► Idle
//!                            │  ▲
//!                            └──┘ pointer_move
//! ```
//!
//! At most one gesture is active. While active the engine holds a
//! [`CaptureGuard`], and the editor's history is batched so the whole gesture
//! undoes as one step. Every mutation goes through [`EditorState`].

pub mod capture;
pub mod drag;
pub mod resize;

use std::fmt;
use std::rc::Rc;

use crate::editor::EditorState;
use crate::element::{ElementId, ElementKind, Position, Size};
use crate::event::{DropSignal, InputEvent, Point, PointerPhase};

pub use capture::{CaptureGuard, NoCapture, PointerCapture};
pub use drag::{CreateGesture, MoveGesture};
pub use resize::{RenderedSize, ResizeGesture, ResizeHandle};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureTarget {
    /// A placed element (drag to move).
    Element(ElementId),
    /// A palette item (drag to create).
    Palette(ElementKind),
    /// A resize handle of the selected element.
    Handle {
        /// Element the handle belongs to.
        id: ElementId,
        /// Which handle.
        handle: ResizeHandle,
        /// Element size as currently rendered.
        rendered: RenderedSize,
    },
}

/// Result of feeding one event to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing happened.
    Ignored,
    /// A gesture began.
    Started,
    /// The gesture continues without a commit.
    Pending,
    /// The element moved here.
    Moved(Position),
    /// The element was resized to this.
    Resized(Size),
    /// A palette drop created this element.
    Created(ElementId),
    /// The gesture finished.
    Ended,
    /// A palette drag ended without a matching drop.
    Abandoned,
}

#[derive(Debug)]
enum Gesture {
    Move(MoveGesture),
    Create(CreateGesture),
    Resize(ResizeGesture),
}

#[derive(Debug)]
struct Active {
    gesture: Gesture,
    _capture: CaptureGuard,
}

/// Pointer-driven drag and resize state machine.
pub struct InteractionEngine {
    capture: Rc<dyn PointerCapture>,
    active: Option<Active>,
}

impl InteractionEngine {
    /// Create an engine that acquires `capture` for each gesture.
    #[must_use]
    pub fn new(capture: Rc<dyn PointerCapture>) -> Self {
        Self {
            capture,
            active: None,
        }
    }

    /// Create an engine for hosts that need no capture hook.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(Rc::new(NoCapture))
    }

    /// Check whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a gesture on `target`.
    ///
    /// Ignored while another gesture is active, or when the target does not
    /// resolve (unknown element, resize of an unselected element).
    pub fn pointer_down(
        &mut self,
        editor: &mut EditorState,
        target: GestureTarget,
        pointer: Point,
    ) -> GestureOutcome {
        if self.active.is_some() {
            tracing::debug!(?target, "Pointer down ignored, gesture already active");
            return GestureOutcome::Ignored;
        }

        let gesture = match target {
            GestureTarget::Element(id) => MoveGesture::start(editor, id, pointer).map(Gesture::Move),
            GestureTarget::Palette(kind) => Some(Gesture::Create(CreateGesture::start(kind))),
            GestureTarget::Handle {
                id,
                handle,
                rendered,
            } => ResizeGesture::start(editor, id, handle, pointer, rendered).map(Gesture::Resize),
        };
        let Some(gesture) = gesture else {
            tracing::debug!(?target, "Pointer down ignored, target did not resolve");
            return GestureOutcome::Ignored;
        };

        match gesture {
            Gesture::Move(_) => {
                editor.begin_gesture();
                editor.set_dragging(true);
            }
            Gesture::Create(_) => editor.set_dragging(true),
            Gesture::Resize(_) => editor.begin_gesture(),
        }

        self.active = Some(Active {
            gesture,
            _capture: CaptureGuard::acquire(Rc::clone(&self.capture)),
        });
        GestureOutcome::Started
    }

    /// Continue the active gesture.
    pub fn pointer_move(&mut self, editor: &mut EditorState, pointer: Point) -> GestureOutcome {
        let Some(active) = self.active.as_ref() else {
            return GestureOutcome::Ignored;
        };
        match &active.gesture {
            Gesture::Move(gesture) => gesture
                .update(editor, pointer)
                .map_or(GestureOutcome::Pending, GestureOutcome::Moved),
            Gesture::Resize(gesture) => gesture
                .update(editor, pointer)
                .map_or(GestureOutcome::Pending, GestureOutcome::Resized),
            Gesture::Create(_) => GestureOutcome::Pending,
        }
    }

    /// Finish the active gesture.
    ///
    /// `drop` is the canvas's drop report, if the release happened over it;
    /// only palette drags use it.
    pub fn pointer_up(
        &mut self,
        editor: &mut EditorState,
        drop: Option<&DropSignal>,
    ) -> GestureOutcome {
        let Some(Active { gesture, .. }) = self.active.take() else {
            return GestureOutcome::Ignored;
        };
        editor.end_gesture();
        editor.set_dragging(false);

        match gesture {
            Gesture::Create(create) => create
                .finish(editor, drop)
                .map_or(GestureOutcome::Abandoned, GestureOutcome::Created),
            Gesture::Move(gesture) => {
                tracing::debug!(element = %gesture.id(), "Move gesture ended");
                GestureOutcome::Ended
            }
            Gesture::Resize(gesture) => {
                tracing::debug!(element = %gesture.id(), "Resize gesture ended");
                GestureOutcome::Ended
            }
        }
    }

    /// Route a raw input event.
    ///
    /// Start phases need a `target`; move and end phases go to the active
    /// gesture. A touch end may carry no touch points. Key events are not
    /// gesture input and are ignored here.
    pub fn handle_event(
        &mut self,
        editor: &mut EditorState,
        event: &InputEvent,
        target: Option<GestureTarget>,
    ) -> GestureOutcome {
        match (event.phase(), event.pointer()) {
            (Some(PointerPhase::End), _) => self.pointer_up(editor, None),
            (Some(PointerPhase::Start), Some((_, pointer))) => match target {
                Some(target) => self.pointer_down(editor, target, pointer),
                None => GestureOutcome::Ignored,
            },
            (Some(PointerPhase::Move), Some((_, pointer))) => self.pointer_move(editor, pointer),
            _ => GestureOutcome::Ignored,
        }
    }

    /// Drop any active gesture without a further commit.
    ///
    /// Commits already made stay applied. Returns `true` if a gesture was
    /// active.
    pub fn teardown(&mut self, editor: &mut EditorState) -> bool {
        if self.active.take().is_none() {
            return false;
        }
        editor.end_gesture();
        editor.set_dragging(false);
        tracing::debug!("Active gesture torn down");
        true
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::headless()
    }
}

impl fmt::Debug for InteractionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionEngine")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::capture::tests::CountingCapture;
    use super::*;
    use crate::element::NewElement;
    use crate::event::{CanvasRect, PointerEvent, TouchEvent, TouchPoint};

    fn setup() -> (EditorState, ElementId, Rc<CountingCapture>, InteractionEngine) {
        let mut editor = EditorState::blank();
        let id = editor.add_element(NewElement::new(ElementKind::Heading).at(0, 0));
        let capture = Rc::new(CountingCapture::default());
        let engine = InteractionEngine::new(capture.clone());
        (editor, id, capture, engine)
    }

    #[test]
    fn test_move_gesture_lifecycle_holds_capture() {
        let (mut editor, id, capture, mut engine) = setup();

        let out = engine.pointer_down(&mut editor, GestureTarget::Element(id), Point::new(10.0, 10.0));
        assert_eq!(out, GestureOutcome::Started);
        assert!(capture.held());
        assert!(editor.is_dragging());

        assert_eq!(
            engine.pointer_move(&mut editor, Point::new(12.0, 11.0)),
            GestureOutcome::Pending
        );
        assert_eq!(
            engine.pointer_move(&mut editor, Point::new(60.0, 30.0)),
            GestureOutcome::Moved(Position::new(50, 20))
        );
        assert_eq!(engine.pointer_up(&mut editor, None), GestureOutcome::Ended);

        assert!(!capture.held());
        assert!(!editor.is_dragging());
        assert!(!engine.is_active());
    }

    #[test]
    fn test_second_gesture_is_ignored() {
        let (mut editor, id, capture, mut engine) = setup();
        engine.pointer_down(&mut editor, GestureTarget::Element(id), Point::default());
        let out = engine.pointer_down(
            &mut editor,
            GestureTarget::Palette(ElementKind::Button),
            Point::default(),
        );
        assert_eq!(out, GestureOutcome::Ignored);
        assert_eq!(capture.acquired.get(), 1);
    }

    #[test]
    fn test_unresolvable_target_is_noop() {
        let (mut editor, _, capture, mut engine) = setup();
        let out = engine.pointer_down(
            &mut editor,
            GestureTarget::Element(ElementId::new()),
            Point::default(),
        );
        assert_eq!(out, GestureOutcome::Ignored);
        assert!(!engine.is_active());
        assert_eq!(capture.acquired.get(), 0);
    }

    #[test]
    fn test_move_gesture_is_one_undo_step() {
        let (mut editor, id, _, mut engine) = setup();
        let depth = editor.history().past_len();

        engine.pointer_down(&mut editor, GestureTarget::Element(id), Point::default());
        for step in 1..=20 {
            engine.pointer_move(&mut editor, Point::new(f64::from(step) * 10.0, 0.0));
        }
        engine.pointer_up(&mut editor, None);

        assert_eq!(editor.history().past_len(), depth + 1);
        assert!(editor.undo());
        assert_eq!(
            editor.active_page().elements.find(id).map(|n| n.position),
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn test_resize_gesture_clamps_and_commits() {
        let (mut editor, id, _, mut engine) = setup();
        let target = GestureTarget::Handle {
            id,
            handle: ResizeHandle::BottomRight,
            rendered: RenderedSize::new(180.0, 40.0),
        };
        assert_eq!(
            engine.pointer_down(&mut editor, target, Point::new(0.0, 0.0)),
            GestureOutcome::Started
        );
        assert_eq!(
            engine.pointer_move(&mut editor, Point::new(-500.0, -500.0)),
            GestureOutcome::Resized(Size::px(50.0, 30.0))
        );
        assert_eq!(
            engine.pointer_move(&mut editor, Point::new(20.0, 2.0)),
            GestureOutcome::Resized(Size::px(200.0, 42.0))
        );
        engine.pointer_up(&mut editor, None);
        assert_eq!(
            editor.active_page().elements.find(id).map(|n| n.size),
            Some(Size::px(200.0, 42.0))
        );
    }

    #[test]
    fn test_palette_drop_creates_element() {
        let (mut editor, _, _, mut engine) = setup();
        engine.pointer_down(
            &mut editor,
            GestureTarget::Palette(ElementKind::Image),
            Point::new(5.0, 5.0),
        );
        assert!(editor.is_dragging());
        let signal = DropSignal::new("image", Point::new(220.0, 140.0), CanvasRect::new(100.0, 100.0));
        let out = engine.pointer_up(&mut editor, Some(&signal));

        let GestureOutcome::Created(id) = out else {
            panic!("expected Created, got {out:?}");
        };
        let node = editor.active_page().elements.find(id).expect("node");
        assert_eq!(node.position, Position::new(120, 40));
        assert_eq!(editor.selected_id(), Some(id));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_palette_release_off_canvas_abandons() {
        let (mut editor, _, capture, mut engine) = setup();
        let before = editor.active_page().clone();
        engine.pointer_down(
            &mut editor,
            GestureTarget::Palette(ElementKind::Card),
            Point::default(),
        );
        assert_eq!(engine.pointer_up(&mut editor, None), GestureOutcome::Abandoned);
        assert_eq!(editor.active_page(), &before);
        assert!(!capture.held());
    }

    #[test]
    fn test_teardown_releases_capture() {
        let (mut editor, id, capture, mut engine) = setup();
        engine.pointer_down(&mut editor, GestureTarget::Element(id), Point::default());
        assert!(engine.teardown(&mut editor));
        assert!(!capture.held());
        assert!(!editor.is_dragging());
        assert!(!engine.teardown(&mut editor));
    }

    #[test]
    fn test_dropping_engine_releases_capture() {
        let (mut editor, id, capture, mut engine) = setup();
        engine.pointer_down(&mut editor, GestureTarget::Element(id), Point::default());
        drop(engine);
        assert!(!capture.held());
    }

    #[test]
    fn test_handle_event_routes_touch_and_mouse() {
        let (mut editor, id, _, mut engine) = setup();
        let start = InputEvent::Touch(TouchEvent::new(
            PointerPhase::Start,
            vec![TouchPoint { id: 0, x: 0.0, y: 0.0 }],
            0,
        ));
        assert_eq!(
            engine.handle_event(&mut editor, &start, Some(GestureTarget::Element(id))),
            GestureOutcome::Started
        );
        let moved = InputEvent::Pointer(PointerEvent {
            phase: PointerPhase::Move,
            x: 30.0,
            y: 40.0,
            button: 0,
        });
        assert_eq!(
            engine.handle_event(&mut editor, &moved, None),
            GestureOutcome::Moved(Position::new(30, 40))
        );
        let end = InputEvent::Touch(TouchEvent::new(PointerPhase::End, Vec::new(), 1));
        assert_eq!(engine.handle_event(&mut editor, &end, None), GestureOutcome::Ended);
    }
}
