//! Pages: named element trees.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Dimension, ElementKind, ElementNode, Size, StyleMap};
use crate::tree::ElementTree;

/// Unique identifier for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Uuid);

impl PageId {
    /// Create a new unique page ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named page owning its element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Unique identifier.
    pub id: PageId,
    /// Display name.
    pub name: String,
    /// Root elements.
    #[serde(default)]
    pub elements: ElementTree,
}

impl PageDocument {
    /// Create an empty page.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PageId::new(),
            name: name.into(),
            elements: ElementTree::new(),
        }
    }

    /// Create the welcome page a fresh project starts with.
    #[must_use]
    pub fn starter(name: impl Into<String>) -> Self {
        let heading = ElementNode::new(ElementKind::Heading)
            .with_content("Welcome to Your Website")
            .with_style(style(&[
                ("fontSize", "32px"),
                ("fontWeight", "600"),
                ("color", "#1e293b"),
                ("textAlign", "center"),
            ]));
        let intro = ElementNode::new(ElementKind::Paragraph)
            .with_content("Start building your website by dragging elements from the panel.")
            .with_style(style(&[
                ("fontSize", "16px"),
                ("color", "#64748b"),
                ("textAlign", "center"),
                ("maxWidth", "600px"),
            ]));
        let cta = ElementNode::new(ElementKind::Button)
            .with_content("Get Started")
            .with_style(style(&[
                ("backgroundColor", "hsl(215, 100%, 60%)"),
                ("color", "#ffffff"),
                ("padding", "12px 24px"),
                ("borderRadius", "6px"),
                ("cursor", "pointer"),
                ("fontWeight", "500"),
            ]));
        let hero = ElementNode::new(ElementKind::Container)
            .with_style(style(&[
                ("backgroundColor", "#ffffff"),
                ("padding", "20px"),
                ("display", "flex"),
                ("flexDirection", "column"),
                ("alignItems", "center"),
                ("justifyContent", "center"),
                ("gap", "20px"),
            ]))
            .with_size(Size {
                width: Dimension::Full,
                height: Dimension::Auto,
            })
            .with_children(vec![heading, intro, cta]);

        Self {
            id: PageId::new(),
            name: name.into(),
            elements: ElementTree::from_roots(vec![hero]),
        }
    }

    /// Deep copy under a new page ID and fresh element IDs, named `<name> (Copy)`.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut elements = self.elements.clone();
        elements.remint_ids();
        Self {
            id: PageId::new(),
            name: format!("{} (Copy)", self.name),
            elements,
        }
    }
}

fn style(pairs: &[(&str, &str)]) -> StyleMap {
    pairs.iter().copied().collect()
}
