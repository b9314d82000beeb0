//! # Pagecraft Core
//!
//! Headless core of a visual page builder: a multi-page document of nested
//! elements, edit history, selection, pointer-driven drag and resize, and
//! one-way HTML export. Compiles to WASM for browser hosts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              pagecraft-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Document Model  │  Interaction Engine      │
//! │  - Pages         │  - Move / create drags   │
//! │  - Element tree  │  - Resize handles        │
//! │  - Style maps    │  - Pointer capture       │
//! ├─────────────────────────────────────────────┤
//! │  Editor State    │  Output                  │
//! │  - Selection     │  - Project JSON store    │
//! │  - Undo / redo   │  - HTML export           │
//! │  - Breakpoints   │                          │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod export;
pub mod history;
pub mod interaction;
pub mod page;
pub mod responsive;
pub mod schema;
pub mod selection;
pub mod store;
pub mod tree;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::EditorConfig;
pub use editor::{Axis, EditorState, Notice, STARTER_PAGE_NAME};
pub use element::{
    Dimension, ElementId, ElementKind, ElementNode, ElementPatch, KindCapabilities, NewElement,
    Position, PositionPatch, Size, SizePatch, StyleMap, StyleValue,
};
pub use error::{EditorError, EditorResult};
pub use event::{
    CanvasRect, DropSignal, InputEvent, KeyCommand, KeyEvent, KeyModifiers, Point, PointerEvent,
    PointerPhase, TouchEvent, TouchPoint,
};
pub use export::{export_file_name, ExportConfig, HtmlExporter};
pub use history::{History, DEFAULT_MAX_LEVELS};
pub use interaction::{
    CaptureGuard, GestureOutcome, GestureTarget, InteractionEngine, NoCapture, PointerCapture,
    RenderedSize, ResizeHandle,
};
pub use page::{PageDocument, PageId};
pub use responsive::ResponsiveMode;
pub use schema::{ProjectDocument, FORMAT_VERSION};
pub use selection::Selection;
pub use store::{ProjectStore, StoreError};
pub use tree::ElementTree;

/// Pagecraft core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
