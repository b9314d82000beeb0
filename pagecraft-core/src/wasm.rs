//! WebAssembly bindings for pagecraft-core.
//!
//! Structured values cross the boundary as JSON strings; errors come back as
//! their display text.

use wasm_bindgen::prelude::*;

use crate::{
    DropSignal, EditorState, ElementId, ElementKind, ElementPatch, GestureTarget, HtmlExporter,
    InteractionEngine, NewElement, PageId, Point, ProjectDocument, RenderedSize, ResizeHandle,
    ResponsiveMode,
};

/// Initialize the pagecraft WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn element_id(id: &str) -> Result<ElementId, String> {
    ElementId::parse(id).map_err(|e| e.to_string())
}

fn page_id(id: &str) -> Result<PageId, String> {
    PageId::parse(id).map_err(|e| e.to_string())
}

/// Editor instance for WASM hosts.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: EditorState,
    engine: InteractionEngine,
    exporter: HtmlExporter,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor holding the starter project.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: EditorState::new(),
            engine: InteractionEngine::headless(),
            exporter: HtmlExporter::default(),
        }
    }

    /// Get the whole project as JSON.
    #[wasm_bindgen(js_name = getProjectJson)]
    #[must_use]
    pub fn get_project_json(&self) -> String {
        self.editor.to_project().to_json().unwrap_or_default()
    }

    /// Replace the project from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if parsing or validation fails.
    #[wasm_bindgen(js_name = loadProjectJson)]
    pub fn load_project_json(&mut self, json: &str) -> Result<(), String> {
        let document = ProjectDocument::from_json(json).map_err(|e| e.to_string())?;
        self.engine.teardown(&mut self.editor);
        self.editor.load_project(document).map_err(|e| e.to_string())
    }

    /// Get the active page as JSON.
    #[wasm_bindgen(js_name = getActivePageJson)]
    #[must_use]
    pub fn get_active_page_json(&self) -> String {
        serde_json::to_string(self.editor.active_page()).unwrap_or_default()
    }

    /// Add a page and make it active; returns its ID.
    #[wasm_bindgen(js_name = addPage)]
    pub fn add_page(&mut self, name: &str) -> String {
        self.editor.add_page(name).to_string()
    }

    /// Duplicate a page; returns the copy's ID.
    ///
    /// # Errors
    ///
    /// Returns an error string if the page does not exist.
    #[wasm_bindgen(js_name = duplicatePage)]
    pub fn duplicate_page(&mut self, id: &str) -> Result<String, String> {
        let id = page_id(id)?;
        self.editor
            .duplicate_page(id)
            .map(|copy| copy.to_string())
            .map_err(|e| e.to_string())
    }

    /// Delete a page.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown page or the last page.
    #[wasm_bindgen(js_name = deletePage)]
    pub fn delete_page(&mut self, id: &str) -> Result<(), String> {
        let id = page_id(id)?;
        self.editor.delete_page(id).map_err(|e| e.to_string())
    }

    /// Switch the active page.
    ///
    /// # Errors
    ///
    /// Returns an error string if the page does not exist.
    #[wasm_bindgen(js_name = setActivePage)]
    pub fn set_active_page(&mut self, id: &str) -> Result<(), String> {
        let id = page_id(id)?;
        self.engine.teardown(&mut self.editor);
        self.editor.set_active_page(id).map_err(|e| e.to_string())
    }

    /// Add an element described as JSON; returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a valid element.
    #[wasm_bindgen(js_name = addElementJson)]
    pub fn add_element_json(&mut self, json: &str) -> Result<String, String> {
        let element: NewElement = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(self.editor.add_element(element).to_string())
    }

    /// Merge a JSON patch into an element.
    ///
    /// # Errors
    ///
    /// Returns an error string for bad JSON or an unknown element.
    #[wasm_bindgen(js_name = updateElementJson)]
    pub fn update_element_json(&mut self, id: &str, patch: &str) -> Result<(), String> {
        let id = element_id(id)?;
        let patch: ElementPatch = serde_json::from_str(patch).map_err(|e| e.to_string())?;
        self.editor.update_element(id, &patch).map_err(|e| e.to_string())
    }

    /// Delete an element and its subtree.
    ///
    /// # Errors
    ///
    /// Returns an error string if the element does not exist.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> Result<(), String> {
        let id = element_id(id)?;
        self.editor
            .delete_element(id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// Returns the selected element as JSON, or an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error string if `id` is not a valid element ID.
    #[wasm_bindgen(js_name = selectElement)]
    pub fn select_element(&mut self, id: Option<String>) -> Result<String, String> {
        let id = id.as_deref().map(element_id).transpose()?;
        Ok(self
            .editor
            .select_element(id)
            .and_then(|node| serde_json::to_string(node).ok())
            .unwrap_or_default())
    }

    /// Undo the last change on the active page.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Redo the last undone change on the active page.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Check whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Check whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Switch the preview breakpoint (`desktop`, `tablet` or `mobile`).
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown mode.
    #[wasm_bindgen(js_name = setResponsiveMode)]
    pub fn set_responsive_mode(&mut self, mode: &str) -> Result<(), String> {
        let mode: ResponsiveMode = mode.parse().map_err(|e: crate::EditorError| e.to_string())?;
        self.editor.set_responsive_mode(mode);
        Ok(())
    }

    /// Start dragging a placed element.
    ///
    /// # Errors
    ///
    /// Returns an error string if `id` is not a valid element ID.
    #[wasm_bindgen(js_name = pointerDownElement)]
    pub fn pointer_down_element(&mut self, id: &str, x: f64, y: f64) -> Result<String, String> {
        let target = GestureTarget::Element(element_id(id)?);
        let outcome = self.engine.pointer_down(&mut self.editor, target, Point::new(x, y));
        Ok(format!("{outcome:?}"))
    }

    /// Start dragging a palette item.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown kind.
    #[wasm_bindgen(js_name = pointerDownPalette)]
    pub fn pointer_down_palette(&mut self, kind: &str, x: f64, y: f64) -> Result<String, String> {
        let kind: ElementKind = kind.parse().map_err(|e: crate::EditorError| e.to_string())?;
        let target = GestureTarget::Palette(kind);
        let outcome = self.engine.pointer_down(&mut self.editor, target, Point::new(x, y));
        Ok(format!("{outcome:?}"))
    }

    /// Start dragging a resize handle of the selected element.
    ///
    /// # Errors
    ///
    /// Returns an error string for a bad ID or handle name.
    #[wasm_bindgen(js_name = pointerDownHandle)]
    pub fn pointer_down_handle(
        &mut self,
        id: &str,
        handle: &str,
        x: f64,
        y: f64,
        rendered_width: f64,
        rendered_height: f64,
    ) -> Result<String, String> {
        let handle: ResizeHandle = handle.parse().map_err(|e: crate::EditorError| e.to_string())?;
        let target = GestureTarget::Handle {
            id: element_id(id)?,
            handle,
            rendered: RenderedSize::new(rendered_width, rendered_height),
        };
        let outcome = self.engine.pointer_down(&mut self.editor, target, Point::new(x, y));
        Ok(format!("{outcome:?}"))
    }

    /// Feed a pointer move to the active gesture.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        format!("{:?}", self.engine.pointer_move(&mut self.editor, Point::new(x, y)))
    }

    /// End the active gesture, with an optional JSON drop signal.
    ///
    /// # Errors
    ///
    /// Returns an error string if the drop signal JSON is invalid.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, drop_json: Option<String>) -> Result<String, String> {
        let signal: Option<DropSignal> = drop_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| e.to_string())?;
        let outcome = self.engine.pointer_up(&mut self.editor, signal.as_ref());
        Ok(format!("{outcome:?}"))
    }

    /// Export a page as an HTML document.
    ///
    /// # Errors
    ///
    /// Returns an error string if the page does not exist.
    #[wasm_bindgen(js_name = exportPageHtml)]
    pub fn export_page_html(&self, id: &str) -> Result<String, String> {
        let id = page_id(id)?;
        self.editor
            .export_page(id, &self.exporter)
            .map_err(|e| e.to_string())
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_editor_starts_with_starter_page() {
        let editor = WasmEditor::new();
        let json = editor.get_active_page_json();
        assert!(json.contains("Get Started"));
        assert!(!editor.can_undo());
    }

    #[test]
    fn project_json_roundtrip() {
        let first = WasmEditor::new();
        let json = first.get_project_json();
        let mut second = WasmEditor::new();
        assert!(second.load_project_json(&json).is_ok());
        let reloaded: serde_json::Value =
            serde_json::from_str(&second.get_project_json()).expect("json");
        let original: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(reloaded["pages"], original["pages"]);
    }

    #[test]
    fn load_project_rejects_invalid_json() {
        let mut editor = WasmEditor::new();
        assert!(editor.load_project_json("{ not valid json }").is_err());
        assert!(editor.load_project_json(r#"{"version":1,"pages":[]}"#).is_err());
    }

    #[test]
    fn add_update_undo_element() {
        let mut editor = WasmEditor::new();
        let id = editor
            .add_element_json(r#"{"kind":"button","position":{"x":10,"y":20}}"#)
            .expect("add");
        editor
            .update_element_json(&id, r#"{"content":"Buy"}"#)
            .expect("update");
        assert!(editor.get_active_page_json().contains("Buy"));
        assert!(editor.undo());
        assert!(!editor.get_active_page_json().contains("Buy"));
    }

    #[test]
    fn update_rejects_bad_id() {
        let mut editor = WasmEditor::new();
        assert!(editor.update_element_json("not-a-uuid", "{}").is_err());
        assert!(editor.delete_element(&ElementId::new().to_string()).is_err());
    }

    #[test]
    fn pointer_drag_moves_element() {
        let mut editor = WasmEditor::new();
        let id = editor
            .add_element_json(r#"{"kind":"paragraph"}"#)
            .expect("add");
        assert_eq!(editor.pointer_down_element(&id, 0.0, 0.0).as_deref(), Ok("Started"));
        assert!(editor.pointer_move(40.0, 30.0).starts_with("Moved"));
        assert_eq!(editor.pointer_up(None).as_deref(), Ok("Ended"));
        assert!(editor.get_active_page_json().contains(r#""x":40"#));
    }

    #[test]
    fn palette_drop_creates_element() {
        let mut editor = WasmEditor::new();
        editor.pointer_down_palette("card", 0.0, 0.0).expect("down");
        let drop = r#"{"payload":"card","point":{"x":150.0,"y":90.0},"canvas":{"left":100.0,"top":50.0}}"#;
        let outcome = editor.pointer_up(Some(drop.to_string())).expect("up");
        assert!(outcome.starts_with("Created"));
    }

    #[test]
    fn responsive_mode_parsing() {
        let mut editor = WasmEditor::new();
        assert!(editor.set_responsive_mode("mobile").is_ok());
        assert!(editor.set_responsive_mode("watch").is_err());
    }

    #[test]
    fn export_active_page() {
        let mut editor = WasmEditor::new();
        let id = editor.add_page("About Us");
        let html = editor.export_page_html(&id).expect("export");
        assert!(html.contains("<title>About Us</title>"));
    }
}
