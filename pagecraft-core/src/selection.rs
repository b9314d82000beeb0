//! Selection tracking.
//!
//! The tracker keeps a resolved copy of the selected node so a property form
//! can read its fields directly. The editor re-resolves it after every tree
//! mutation, so the copy never outlives or lags behind the node it mirrors.

use crate::element::{ElementId, ElementNode};
use crate::tree::ElementTree;

/// Currently selected element, resolved against a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<ElementNode>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` in `tree`, or clear the selection for `None`.
    ///
    /// An ID that does not resolve clears the selection.
    pub fn select(&mut self, id: Option<ElementId>, tree: &ElementTree) -> Option<&ElementNode> {
        self.current = id.and_then(|id| tree.find(id)).cloned();
        self.current.as_ref()
    }

    /// Re-resolve the selection after `tree` changed.
    pub fn resync(&mut self, tree: &ElementTree) {
        if let Some(id) = self.id() {
            self.current = tree.find(id).cloned();
            if self.current.is_none() {
                tracing::debug!(element = %id, "Selected element gone, selection cleared");
            }
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// ID of the selected element.
    #[must_use]
    pub fn id(&self) -> Option<ElementId> {
        self.current.as_ref().map(|node| node.id)
    }

    /// The selected element as of the last resolution.
    #[must_use]
    pub fn node(&self) -> Option<&ElementNode> {
        self.current.as_ref()
    }

    /// Check whether `id` is the selected element.
    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.id() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementPatch, NewElement};

    #[test]
    fn test_select_resolves_node() {
        let mut tree = ElementTree::new();
        let id = tree.insert(NewElement::new(ElementKind::Heading)).id;
        let mut selection = Selection::new();

        let node = selection.select(Some(id), &tree).expect("selected");
        assert_eq!(node.content, "New Heading");
        assert!(selection.is_selected(id));
    }

    #[test]
    fn test_select_unknown_clears() {
        let mut tree = ElementTree::new();
        let id = tree.insert(NewElement::new(ElementKind::Heading)).id;
        let mut selection = Selection::new();
        selection.select(Some(id), &tree);

        assert!(selection.select(Some(ElementId::new()), &tree).is_none());
        assert!(selection.id().is_none());
    }

    #[test]
    fn test_resync_follows_updates_and_removal() {
        let mut tree = ElementTree::new();
        let id = tree.insert(NewElement::new(ElementKind::Paragraph)).id;
        let mut selection = Selection::new();
        selection.select(Some(id), &tree);

        tree.update(id, &ElementPatch::content("Edited"));
        selection.resync(&tree);
        assert_eq!(selection.node().map(|n| n.content.as_str()), Some("Edited"));

        tree.remove(id);
        selection.resync(&tree);
        assert!(selection.node().is_none());
    }
}
