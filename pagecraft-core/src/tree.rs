//! Tree store for a page's elements.
//!
//! Lookups walk the tree depth-first in document order: a node is checked
//! before its children, and children in sequence order. IDs are unique across
//! the whole tree, so the first match is the only match.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementNode, ElementPatch, NewElement};
use crate::error::{EditorError, EditorResult};

/// Ordered sequence of root elements, each exclusively owning its subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTree(Vec<ElementNode>);

impl ElementTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from existing root nodes.
    #[must_use]
    pub fn from_roots(roots: Vec<ElementNode>) -> Self {
        Self(roots)
    }

    /// Root-level elements in order.
    #[must_use]
    pub fn roots(&self) -> &[ElementNode] {
        &self.0
    }

    /// Insert a new root element, filling kind defaults and assigning a fresh ID.
    ///
    /// Returns a copy of the realized node.
    pub fn insert(&mut self, element: NewElement) -> ElementNode {
        let node = element.realize();
        tracing::debug!(element = %node.id, kind = %node.kind, "Inserted element");
        self.0.push(node.clone());
        node
    }

    /// Find an element anywhere in the tree.
    #[must_use]
    pub fn find(&self, id: ElementId) -> Option<&ElementNode> {
        find_in(&self.0, id)
    }

    /// Find an element anywhere in the tree, mutably.
    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        find_in_mut(&mut self.0, id)
    }

    /// Check whether an element exists in the tree.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    /// Merge `patch` into the element with `id`.
    ///
    /// Returns `false` (and changes nothing) if the element does not exist.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                node.apply(patch);
                true
            }
            None => {
                tracing::debug!(element = %id, "Update ignored, element not found");
                false
            }
        }
    }

    /// Remove the element with `id` together with its whole subtree.
    ///
    /// Returns the removed subtree, or `None` if the element does not exist.
    pub fn remove(&mut self, id: ElementId) -> Option<ElementNode> {
        let removed = remove_in(&mut self.0, id);
        if removed.is_none() {
            tracing::debug!(element = %id, "Remove ignored, element not found");
        }
        removed
    }

    /// Iterate every element depth-first, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &ElementNode> {
        DepthFirst {
            stack: self.0.iter().rev().collect(),
        }
    }

    /// IDs of every element, depth-first.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.iter().map(|node| node.id).collect()
    }

    /// Total number of elements, including nested ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if the tree has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check structural invariants, recording every seen ID in `seen`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidDocument`] if an ID repeats (within this
    /// tree or against `seen`) or a leaf kind carries children.
    pub fn validate(&self, seen: &mut HashSet<ElementId>) -> EditorResult<()> {
        for node in self.iter() {
            if !seen.insert(node.id) {
                return Err(EditorError::InvalidDocument(format!(
                    "duplicate element id {}",
                    node.id
                )));
            }
            if node.children.is_some() && !node.kind.accepts_children() {
                return Err(EditorError::InvalidDocument(format!(
                    "{} element {} cannot have children",
                    node.kind, node.id
                )));
            }
        }
        Ok(())
    }

    /// Give every element a fresh ID.
    pub(crate) fn remint_ids(&mut self) {
        for root in &mut self.0 {
            root.remint_ids(None);
        }
    }
}

struct DepthFirst<'a> {
    stack: Vec<&'a ElementNode>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

fn find_in(nodes: &[ElementNode], id: ElementId) -> Option<&ElementNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut(nodes: &mut [ElementNode], id: ElementId) -> Option<&mut ElementNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_in(nodes: &mut Vec<ElementNode>, id: ElementId) -> Option<ElementNode> {
    if let Some(index) = nodes.iter().position(|node| node.id == id) {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(removed) = remove_in(children, id) {
                return Some(removed);
            }
        }
    }
    None
}
