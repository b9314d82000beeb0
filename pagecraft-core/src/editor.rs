//! # Editor State
//!
//! The single owned application state and its public API.
//!
//! Every element mutation runs the same pipeline:
//!
//! ```text
//! History::snapshot ──► ElementTree mutation ──► Selection::resync
//! ```
//!
//! Page-level operations (add, duplicate, delete, switch) bypass history.
//! The selected element, when present, always belongs to the active page.

use std::fmt;
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::element::{
    Dimension, ElementId, ElementKind, ElementNode, ElementPatch, NewElement, PositionPatch, Size,
    SizePatch, parse_int_prefix,
};
use crate::error::{EditorError, EditorResult};
use crate::event::{KeyCommand, KeyEvent};
use crate::export::HtmlExporter;
use crate::history::History;
use crate::page::{PageDocument, PageId};
use crate::responsive::{self, ResponsiveMode};
use crate::schema::ProjectDocument;
use crate::selection::Selection;
use crate::store::ProjectStore;

/// Name of the page a new project starts with.
pub const STARTER_PAGE_NAME: &str = "Home";

/// User-facing outcome reports, standing in for toast notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A page was created.
    PageCreated(String),
    /// A page was duplicated; carries the original's name.
    PageDuplicated(String),
    /// A page was deleted.
    PageDeleted(String),
    /// An element was added to the active page.
    ElementAdded(ElementKind),
    /// An element was deleted from the active page.
    ElementDeleted(ElementKind),
    /// An operation was refused.
    Rejected(String),
    /// The project was written to storage.
    ProjectSaved(String),
    /// Writing the project failed.
    SaveFailed(String),
    /// Reading the project failed; state is unchanged.
    LoadFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageCreated(name) => write!(f, "Page \"{name}\" created"),
            Self::PageDuplicated(name) => write!(f, "Page \"{name}\" duplicated"),
            Self::PageDeleted(name) => write!(f, "Page \"{name}\" deleted"),
            Self::ElementAdded(kind) => write!(f, "Added {kind} element"),
            Self::ElementDeleted(kind) => write!(f, "Deleted {kind} element"),
            Self::Rejected(reason) => f.write_str(reason),
            Self::ProjectSaved(name) => write!(f, "Project \"{name}\" saved"),
            Self::SaveFailed(reason) => write!(f, "Failed to save project: {reason}"),
            Self::LoadFailed(reason) => write!(f, "Failed to load project: {reason}"),
        }
    }
}

/// Axis addressed by a text-input helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `x` or `width`.
    Horizontal,
    /// `y` or `height`.
    Vertical,
}

type NoticeListener = Box<dyn Fn(&Notice)>;

/// The editor: pages, active page, selection, breakpoint and history.
pub struct EditorState {
    pages: Vec<PageDocument>,
    active: usize,
    selection: Selection,
    mode: ResponsiveMode,
    history: History,
    dragging: bool,
    config: EditorConfig,
    on_notice: Option<NoticeListener>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Create an editor holding the starter page.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an editor holding the starter page, with custom configuration.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self::from_pages(vec![PageDocument::starter(STARTER_PAGE_NAME)], config)
    }

    /// Create an editor holding one empty page.
    #[must_use]
    pub fn blank() -> Self {
        Self::from_pages(
            vec![PageDocument::new(STARTER_PAGE_NAME)],
            EditorConfig::default(),
        )
    }

    fn from_pages(pages: Vec<PageDocument>, config: EditorConfig) -> Self {
        Self {
            pages,
            active: 0,
            selection: Selection::new(),
            mode: ResponsiveMode::default(),
            history: History::with_max_levels(config.history_limit),
            dragging: false,
            config,
            on_notice: None,
        }
    }

    /// Register a listener for [`Notice`]s, replacing any previous one.
    pub fn set_on_notice<F>(&mut self, listener: F)
    where
        F: Fn(&Notice) + 'static,
    {
        self.on_notice = Some(Box::new(listener));
    }

    fn notify(&self, notice: &Notice) {
        if let Some(listener) = &self.on_notice {
            listener(notice);
        }
    }

    fn reject(&self, error: EditorError) -> EditorError {
        tracing::warn!(%error, "Operation rejected");
        self.notify(&Notice::Rejected(error.to_string()));
        error
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// All pages in display order.
    #[must_use]
    pub fn pages(&self) -> &[PageDocument] {
        &self.pages
    }

    /// Look up a page.
    #[must_use]
    pub fn page(&self, id: PageId) -> Option<&PageDocument> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Find a page by display name (first match).
    #[must_use]
    pub fn page_by_name(&self, name: &str) -> Option<&PageDocument> {
        self.pages.iter().find(|page| page.name == name)
    }

    /// The page being edited.
    #[must_use]
    pub fn active_page(&self) -> &PageDocument {
        &self.pages[self.active]
    }

    /// ID of the page being edited.
    #[must_use]
    pub fn active_page_id(&self) -> PageId {
        self.active_page().id
    }

    fn active_page_mut(&mut self) -> &mut PageDocument {
        &mut self.pages[self.active]
    }

    /// The selected element.
    #[must_use]
    pub fn selected(&self) -> Option<&ElementNode> {
        self.selection.node()
    }

    /// ID of the selected element.
    #[must_use]
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selection.id()
    }

    /// Undo/redo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Check whether undo would change the active page.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo(self.active_page_id())
    }

    /// Check whether redo would change the active page.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo(self.active_page_id())
    }

    /// Check whether a drag gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub(crate) fn begin_gesture(&mut self) {
        self.history.begin_batch();
    }

    pub(crate) fn end_gesture(&mut self) {
        self.history.end_batch();
    }

    // ---------------------------------------------------------------------
    // Pages
    // ---------------------------------------------------------------------

    /// Append an empty page and make it active.
    pub fn add_page(&mut self, name: impl Into<String>) -> PageId {
        let page = PageDocument::new(name);
        let id = page.id;
        tracing::info!(page = %id, name = %page.name, "Page created");
        let notice = Notice::PageCreated(page.name.clone());
        self.pages.push(page);
        self.activate(self.pages.len() - 1);
        self.notify(&notice);
        id
    }

    /// Append a deep copy of a page, named `<name> (Copy)` and with fresh
    /// element IDs. The active page does not change.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PageNotFound`] if the page does not exist.
    pub fn duplicate_page(&mut self, id: PageId) -> EditorResult<PageId> {
        let Some(original) = self.page(id) else {
            return Err(self.reject(EditorError::PageNotFound(id.to_string())));
        };
        let copy = original.duplicate();
        let notice = Notice::PageDuplicated(original.name.clone());
        let copy_id = copy.id;
        tracing::info!(page = %id, copy = %copy_id, "Page duplicated");
        self.pages.push(copy);
        self.notify(&notice);
        Ok(copy_id)
    }

    /// Delete a page and every history entry recorded for it.
    ///
    /// Deleting the active page activates the first remaining page.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LastPage`] when only one page remains, or
    /// [`EditorError::PageNotFound`] if the page does not exist.
    pub fn delete_page(&mut self, id: PageId) -> EditorResult<()> {
        if self.pages.len() <= 1 {
            return Err(self.reject(EditorError::LastPage));
        }
        let Some(index) = self.pages.iter().position(|page| page.id == id) else {
            return Err(self.reject(EditorError::PageNotFound(id.to_string())));
        };

        let active_id = self.active_page_id();
        let removed = self.pages.remove(index);
        self.history.purge_page(id);

        if active_id == id {
            self.activate(0);
        } else if let Some(position) = self.pages.iter().position(|page| page.id == active_id) {
            self.active = position;
        }

        tracing::info!(page = %id, name = %removed.name, "Page deleted");
        self.notify(&Notice::PageDeleted(removed.name));
        Ok(())
    }

    /// Switch the active page and clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PageNotFound`] if the page does not exist.
    pub fn set_active_page(&mut self, id: PageId) -> EditorResult<()> {
        let Some(index) = self.pages.iter().position(|page| page.id == id) else {
            return Err(self.reject(EditorError::PageNotFound(id.to_string())));
        };
        self.activate(index);
        Ok(())
    }

    fn activate(&mut self, index: usize) {
        self.history.end_batch();
        self.active = index;
        self.selection.clear();
        tracing::debug!(page = %self.active_page_id(), "Active page changed");
    }

    // ---------------------------------------------------------------------
    // Elements
    // ---------------------------------------------------------------------

    /// Insert a root element into the active page and select it.
    pub fn add_element(&mut self, element: NewElement) -> ElementId {
        self.history.record(&self.pages[self.active]);
        let node = self.active_page_mut().elements.insert(element);
        self.selection.select(Some(node.id), &self.pages[self.active].elements);
        self.notify(&Notice::ElementAdded(node.kind));
        node.id
    }

    /// Merge `patch` into an element of the active page.
    ///
    /// Inside a gesture only the first update records an undo step.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] (with nothing recorded or
    /// changed) if the element is not on the active page.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> EditorResult<()> {
        if !self.active_page().elements.contains(id) {
            tracing::debug!(element = %id, "Update ignored, element not on active page");
            return Err(EditorError::ElementNotFound(id.to_string()));
        }
        if patch.is_empty() {
            return Ok(());
        }
        self.history.snapshot(&self.pages[self.active]);
        self.pages[self.active].elements.update(id, patch);
        self.selection.resync(&self.pages[self.active].elements);
        Ok(())
    }

    /// Delete an element and its subtree from the active page.
    ///
    /// Clears the selection if it pointed into the removed subtree.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] if the element is not on the
    /// active page.
    pub fn delete_element(&mut self, id: ElementId) -> EditorResult<ElementNode> {
        if !self.active_page().elements.contains(id) {
            return Err(self.reject(EditorError::ElementNotFound(id.to_string())));
        }
        self.history.record(&self.pages[self.active]);
        let removed = self
            .active_page_mut()
            .elements
            .remove(id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        self.selection.resync(&self.pages[self.active].elements);
        tracing::debug!(element = %id, kind = %removed.kind, "Element deleted");
        self.notify(&Notice::ElementDeleted(removed.kind));
        Ok(removed)
    }

    /// Delete the selected element, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`EditorState::delete_element`] failures.
    pub fn delete_selected(&mut self) -> EditorResult<Option<ElementNode>> {
        match self.selected_id() {
            Some(id) => self.delete_element(id).map(Some),
            None => Ok(None),
        }
    }

    /// Select an element of the active page, or clear the selection.
    ///
    /// An ID that is not on the active page clears the selection.
    pub fn select_element(&mut self, id: Option<ElementId>) -> Option<&ElementNode> {
        self.selection.select(id, &self.pages[self.active].elements)
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Restore the active page to its state before the last change.
    ///
    /// Returns `false` (changing nothing) when there is nothing to undo for
    /// the active page.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.pages[self.active]) else {
            return false;
        };
        self.pages[self.active] = previous;
        self.selection.resync(&self.pages[self.active].elements);
        tracing::debug!(page = %self.active_page_id(), "Undo");
        true
    }

    /// Re-apply the last undone change to the active page.
    ///
    /// Returns `false` (changing nothing) when there is nothing to redo for
    /// the active page.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.pages[self.active]) else {
            return false;
        };
        self.pages[self.active] = next;
        self.selection.resync(&self.pages[self.active].elements);
        tracing::debug!(page = %self.active_page_id(), "Redo");
        true
    }

    // ---------------------------------------------------------------------
    // Responsive preview
    // ---------------------------------------------------------------------

    /// Current preview breakpoint.
    #[must_use]
    pub const fn responsive_mode(&self) -> ResponsiveMode {
        self.mode
    }

    /// Change the preview breakpoint. Stored sizes are untouched.
    pub fn set_responsive_mode(&mut self, mode: ResponsiveMode) {
        self.mode = mode;
    }

    /// Width of the canvas frame for the current breakpoint.
    #[must_use]
    pub const fn canvas_width(&self) -> Dimension {
        self.mode.canvas_width()
    }

    /// Size to display an element at under the current breakpoint.
    #[must_use]
    pub fn display_size(&self, id: ElementId) -> Option<Size> {
        self.active_page()
            .elements
            .find(id)
            .map(|node| responsive::project(node.size, self.mode))
    }

    // ---------------------------------------------------------------------
    // Text input helpers
    // ---------------------------------------------------------------------

    /// Set one size axis from free text: `auto`, `100%` or a leading integer.
    ///
    /// Returns `Ok(false)` and keeps the old value when the text is not a
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] if the element is not on the
    /// active page.
    pub fn set_size_input(&mut self, id: ElementId, axis: Axis, text: &str) -> EditorResult<bool> {
        let Some(value) = Dimension::parse_input(text) else {
            tracing::debug!(element = %id, input = text, "Ignored malformed size input");
            return Ok(false);
        };
        let size = match axis {
            Axis::Horizontal => SizePatch {
                width: Some(value),
                height: None,
            },
            Axis::Vertical => SizePatch {
                width: None,
                height: Some(value),
            },
        };
        let patch = ElementPatch {
            size: Some(size),
            ..ElementPatch::default()
        };
        self.update_element(id, &patch).map(|()| true)
    }

    /// Set one position axis from free text holding a leading integer.
    ///
    /// Returns `Ok(false)` and keeps the old value when the text is not a
    /// number.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] if the element is not on the
    /// active page.
    pub fn set_position_input(
        &mut self,
        id: ElementId,
        axis: Axis,
        text: &str,
    ) -> EditorResult<bool> {
        let Some(value) = parse_int_prefix(text) else {
            tracing::debug!(element = %id, input = text, "Ignored malformed position input");
            return Ok(false);
        };
        let position = match axis {
            Axis::Horizontal => PositionPatch {
                x: Some(value),
                y: None,
            },
            Axis::Vertical => PositionPatch {
                x: None,
                y: Some(value),
            },
        };
        let patch = ElementPatch {
            position: Some(position),
            ..ElementPatch::default()
        };
        self.update_element(id, &patch).map(|()| true)
    }

    // ---------------------------------------------------------------------
    // Keyboard
    // ---------------------------------------------------------------------

    /// Run the command bound to a key press.
    ///
    /// Returns the command when it changed something.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<KeyCommand> {
        let command = event.command()?;
        let applied = match command {
            KeyCommand::DeleteSelected => matches!(self.delete_selected(), Ok(Some(_))),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
        };
        applied.then_some(command)
    }

    // ---------------------------------------------------------------------
    // Persistence and export
    // ---------------------------------------------------------------------

    /// Serialize every page into a project document.
    #[must_use]
    pub fn to_project(&self) -> ProjectDocument {
        ProjectDocument::new(self.pages.clone(), Some(self.active_page_id()))
    }

    /// Replace all pages with a validated project document.
    ///
    /// Selection and history are reset; the saved active page is restored
    /// when present, otherwise the first page is active.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidDocument`] (leaving state unchanged) if
    /// the document fails validation.
    pub fn load_project(&mut self, document: ProjectDocument) -> EditorResult<()> {
        document.validate()?;
        let active = document
            .active_page_id
            .and_then(|id| document.pages.iter().position(|page| page.id == id))
            .unwrap_or(0);
        self.pages = document.pages;
        self.active = active;
        self.selection.clear();
        self.history.clear();
        self.dragging = false;
        tracing::info!(pages = self.pages.len(), "Project loaded");
        Ok(())
    }

    /// Save the project to `store` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] on failure; a [`Notice::SaveFailed`] is
    /// reported and in-memory state is unchanged.
    pub fn save_to(&self, store: &ProjectStore, name: &str) -> EditorResult<PathBuf> {
        match store.save(name, &self.to_project()) {
            Ok(path) => {
                self.notify(&Notice::ProjectSaved(name.to_string()));
                Ok(path)
            }
            Err(error) => {
                tracing::warn!(project = name, %error, "Failed to save project");
                self.notify(&Notice::SaveFailed(error.to_string()));
                Err(error.into())
            }
        }
    }

    /// Replace the project with the one stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns a store, serialization or validation error; state is unchanged
    /// on failure and a store failure is reported as [`Notice::LoadFailed`].
    pub fn load_from(&mut self, store: &ProjectStore, name: &str) -> EditorResult<()> {
        let document = store.load(name).map_err(|error| {
            tracing::warn!(project = name, %error, "Failed to load project");
            self.notify(&Notice::LoadFailed(error.to_string()));
            EditorError::from(error)
        })?;
        self.load_project(document)
    }

    /// Render a page as a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PageNotFound`] if the page does not exist.
    pub fn export_page(&self, id: PageId, exporter: &HtmlExporter) -> EditorResult<String> {
        self.page(id)
            .map(|page| exporter.export_page(page))
            .ok_or_else(|| EditorError::PageNotFound(id.to_string()))
    }
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("pages", &self.pages.len())
            .field("active_page", &self.active_page_id())
            .field("selected", &self.selected_id())
            .field("mode", &self.mode)
            .field("undo_levels", &self.history.past_len())
            .field("redo_levels", &self.history.future_len())
            .field("dragging", &self.dragging)
            .field("has_notice_listener", &self.on_notice.is_some())
            .finish_non_exhaustive()
    }
}
