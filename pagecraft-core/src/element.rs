//! Page elements - the building blocks of a page tree.
//!
//! Every element kind is a closed enum variant, and everything that varies by
//! kind (default content, default style, placement size, property-form
//! capabilities, whether children are allowed) is answered by an exhaustive
//! `match` on [`ElementKind`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EditorError;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
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

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of element kinds a page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Layout block that may hold children.
    Container,
    /// Heading text.
    Heading,
    /// Paragraph text.
    Paragraph,
    /// Clickable button label.
    Button,
    /// Image; content is the source URL.
    Image,
    /// Horizontal rule.
    Divider,
    /// Empty vertical space.
    Spacer,
    /// Bulleted list; content holds one item per line.
    #[serde(alias = "text-list")]
    List,
    /// Card block that may hold children.
    Card,
}

/// Which property groups a kind exposes to the property form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct KindCapabilities {
    /// Content text is editable.
    pub content: bool,
    /// Font size / color / weight apply.
    pub text_style: bool,
    /// Background color applies.
    pub background: bool,
    /// Border radius applies.
    pub border_radius: bool,
    /// Padding applies.
    pub padding: bool,
    /// The element owns a children sequence.
    pub children: bool,
}

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200";
const CARD_SHADOW: &str =
    "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)";

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 9] = [
        Self::Container,
        Self::Heading,
        Self::Paragraph,
        Self::Button,
        Self::Image,
        Self::Divider,
        Self::Spacer,
        Self::List,
        Self::Card,
    ];

    /// Wire name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Button => "button",
            Self::Image => "image",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
            Self::List => "list",
            Self::Card => "card",
        }
    }

    /// Whether nodes of this kind own a children sequence.
    #[must_use]
    pub const fn accepts_children(self) -> bool {
        matches!(self, Self::Container | Self::Card)
    }

    /// Content filled in when a node is inserted with empty content.
    #[must_use]
    pub const fn default_content(self) -> &'static str {
        match self {
            Self::Heading => "New Heading",
            Self::Paragraph => "New paragraph text",
            Self::Button => "Button",
            Self::Image => PLACEHOLDER_IMAGE,
            Self::List => "Item 1\nItem 2\nItem 3",
            Self::Container | Self::Divider | Self::Spacer | Self::Card => "",
        }
    }

    /// Style filled in when a node is inserted with an empty style map.
    #[must_use]
    pub fn default_style(self) -> StyleMap {
        let pairs: &[(&str, &str)] = match self {
            Self::Heading => &[
                ("fontSize", "24px"),
                ("fontWeight", "600"),
                ("color", "#1e293b"),
            ],
            Self::Paragraph => &[("fontSize", "16px"), ("color", "#64748b")],
            Self::Button => &[
                ("backgroundColor", "hsl(215, 100%, 60%)"),
                ("color", "#ffffff"),
                ("padding", "10px 20px"),
                ("borderRadius", "6px"),
                ("cursor", "pointer"),
            ],
            Self::Image => &[("maxWidth", "100%"), ("height", "auto")],
            Self::Divider => &[
                ("width", "100%"),
                ("height", "1px"),
                ("backgroundColor", "#e2e8f0"),
                ("margin", "20px 0"),
            ],
            Self::Container => &[
                ("padding", "20px"),
                ("backgroundColor", "#f8fafc"),
                ("borderRadius", "8px"),
                ("minHeight", "100px"),
                ("width", "100%"),
            ],
            Self::Spacer => &[("width", "100%"), ("height", "20px")],
            Self::List => &[
                ("fontSize", "16px"),
                ("color", "#64748b"),
                ("lineHeight", "1.6"),
            ],
            Self::Card => &[
                ("padding", "20px"),
                ("backgroundColor", "#ffffff"),
                ("borderRadius", "8px"),
                ("boxShadow", CARD_SHADOW),
                ("width", "300px"),
                ("minHeight", "100px"),
            ],
        };
        pairs.iter().copied().collect()
    }

    /// Size given to a node dropped from the palette.
    #[must_use]
    pub const fn default_size(self) -> Size {
        let width = match self {
            Self::Container | Self::Divider => Dimension::Full,
            _ => Dimension::Auto,
        };
        Size {
            width,
            height: Dimension::Auto,
        }
    }

    /// Property groups that apply to this kind.
    #[must_use]
    pub const fn capabilities(self) -> KindCapabilities {
        KindCapabilities {
            content: !matches!(self, Self::Container | Self::Divider),
            text_style: matches!(self, Self::Heading | Self::Paragraph | Self::Button),
            background: matches!(self, Self::Container | Self::Button),
            border_radius: matches!(self, Self::Container | Self::Button | Self::Image),
            padding: matches!(self, Self::Container | Self::Button),
            children: self.accepts_children(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "text-list" {
            return Ok(Self::List);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EditorError::InvalidOperation(format!("unknown element kind: {s}")))
    }
}

/// A single style value: free text or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Numeric value, rendered without a unit.
    Number(f64),
    /// Text value, rendered verbatim.
    Text(String),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Insertion-ordered style properties keyed by camelCase property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<String, StyleValue>);

impl StyleMap {
    /// Create an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Set a property, keeping its original position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove a property.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.0.shift_remove(key)
    }

    /// Key-wise shallow merge: every key in `other` overwrites or extends `self`.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Offset of a placed element, in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the left of the canvas.
    pub x: i64,
    /// Pixels from the top of the canvas.
    pub y: i64,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// One axis of an element size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    /// Fixed pixel length.
    Px(f64),
    /// Sized by content (`auto`).
    Auto,
    /// Fills the parent (`100%`).
    Full,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Keyword(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = String;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(n) => Ok(Self::Px(n)),
            DimensionRepr::Keyword(s) => {
                Self::parse_input(&s).ok_or_else(|| format!("invalid dimension: {s:?}"))
            }
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dim: Dimension) -> Self {
        match dim {
            Dimension::Px(n) => Self::Number(n),
            Dimension::Auto => Self::Keyword("auto".to_string()),
            Dimension::Full => Self::Keyword("100%".to_string()),
        }
    }
}

impl Dimension {
    /// Parse free-text form input: `auto`, `100%`, or a leading integer
    /// (`"120px"` reads as 120). Anything else yields `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn parse_input(text: &str) -> Option<Self> {
        match text.trim() {
            "auto" => Some(Self::Auto),
            "100%" => Some(Self::Full),
            other => parse_int_prefix(other).map(|n| Self::Px(n as f64)),
        }
    }

    /// Pixel length, if this dimension is numeric.
    #[must_use]
    pub const fn as_px(self) -> Option<f64> {
        match self {
            Self::Px(n) => Some(n),
            Self::Auto | Self::Full => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(n) => write!(f, "{n}px"),
            Self::Auto => f.write_str("auto"),
            Self::Full => f.write_str("100%"),
        }
    }
}

/// Parse the leading integer of `text` the way form fields read numbers:
/// optional sign, then digits; trailing characters are ignored.
pub(crate) fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: Dimension,
    /// Vertical extent.
    pub height: Dimension,
}

impl Size {
    /// Fixed pixel size.
    #[must_use]
    pub const fn px(width: f64, height: f64) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
        }
    }
}

/// Key-wise update for [`Position`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPatch {
    /// New x, if changing.
    #[serde(default)]
    pub x: Option<i64>,
    /// New y, if changing.
    #[serde(default)]
    pub y: Option<i64>,
}

/// Key-wise update for [`Size`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizePatch {
    /// New width, if changing.
    #[serde(default)]
    pub width: Option<Dimension>,
    /// New height, if changing.
    #[serde(default)]
    pub height: Option<Dimension>,
}

/// Partial update applied to an existing element.
///
/// Unset fields are left alone; `style`, `position` and `size` merge per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// Replacement content.
    #[serde(default)]
    pub content: Option<String>,
    /// Style properties to merge.
    #[serde(default)]
    pub style: Option<StyleMap>,
    /// Position keys to replace.
    #[serde(default)]
    pub position: Option<PositionPatch>,
    /// Size keys to replace.
    #[serde(default)]
    pub size: Option<SizePatch>,
}

impl ElementPatch {
    /// Patch that replaces the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Patch that moves the element.
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(PositionPatch {
                x: Some(position.x),
                y: Some(position.y),
            }),
            ..Self::default()
        }
    }

    /// Patch that sets both size axes.
    #[must_use]
    pub fn size(size: Size) -> Self {
        Self {
            size: Some(SizePatch {
                width: Some(size.width),
                height: Some(size.height),
            }),
            ..Self::default()
        }
    }

    /// Patch that merges style properties.
    #[must_use]
    pub fn style(style: StyleMap) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    /// Check if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.style.is_none()
            && self.position.is_none()
            && self.size.is_none()
    }
}

/// A node in a page's element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    /// Unique identifier, immutable once assigned.
    pub id: ElementId,
    /// Element kind.
    #[serde(rename = "type", alias = "kind")]
    pub kind: ElementKind,
    /// Kind-dependent payload (text, image URL, newline-separated list items).
    #[serde(default)]
    pub content: String,
    /// Inline style properties.
    #[serde(default)]
    pub style: StyleMap,
    /// Placement offset.
    #[serde(default)]
    pub position: Position,
    /// Placement size.
    #[serde(default)]
    pub size: Size,
    /// Owned children; present only on kinds that accept children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ElementNode>>,
    /// Parent back-reference, for lookup only.
    #[serde(default)]
    pub parent_id: Option<ElementId>,
}

impl ElementNode {
    /// Create an empty node of the given kind with a fresh ID.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            content: String::new(),
            style: StyleMap::new(),
            position: Position::default(),
            size: Size::default(),
            children: kind.accepts_children().then(Vec::new),
            parent_id: None,
        }
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the style map.
    #[must_use]
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Append children, setting their parent back-reference.
    ///
    /// Ignored for kinds that do not accept children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        if let Some(own) = self.children.as_mut() {
            let parent = self.id;
            own.extend(children.into_iter().map(|mut child| {
                child.parent_id = Some(parent);
                child
            }));
        }
        self
    }

    /// Children of this node (empty for leaf kinds).
    #[must_use]
    pub fn children(&self) -> &[ElementNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: &ElementPatch) {
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(style) = &patch.style {
            self.style.merge(style);
        }
        if let Some(position) = patch.position {
            if let Some(x) = position.x {
                self.position.x = x;
            }
            if let Some(y) = position.y {
                self.position.y = y;
            }
        }
        if let Some(size) = patch.size {
            if let Some(width) = size.width {
                self.size.width = width;
            }
            if let Some(height) = size.height {
                self.size.height = height;
            }
        }
    }

    /// Give this node and every descendant a fresh ID, keeping parent links consistent.
    pub(crate) fn remint_ids(&mut self, parent: Option<ElementId>) {
        self.id = ElementId::new();
        self.parent_id = parent;
        let id = self.id;
        if let Some(children) = self.children.as_mut() {
            for child in children {
                child.remint_ids(Some(id));
            }
        }
    }
}

/// Caller-supplied description of an element to insert.
///
/// Empty content or style are replaced by the kind defaults on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    /// Element kind.
    #[serde(rename = "type", alias = "kind")]
    pub kind: ElementKind,
    /// Content, or empty for the kind default.
    #[serde(default)]
    pub content: String,
    /// Style, or empty for the kind default.
    #[serde(default)]
    pub style: StyleMap,
    /// Placement offset.
    #[serde(default)]
    pub position: Position,
    /// Placement size.
    #[serde(default)]
    pub size: Size,
    /// Parent back-reference recorded on the node.
    #[serde(default)]
    pub parent_id: Option<ElementId>,
}

impl NewElement {
    /// Describe an element of the given kind with everything defaulted.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            content: String::new(),
            style: StyleMap::new(),
            position: Position::default(),
            size: Size::default(),
            parent_id: None,
        }
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the style map.
    #[must_use]
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Build the node: assign a fresh ID and fill kind defaults.
    #[must_use]
    pub fn realize(self) -> ElementNode {
        let content = if self.content.is_empty() {
            self.kind.default_content().to_string()
        } else {
            self.content
        };
        let style = if self.style.is_empty() {
            self.kind.default_style()
        } else {
            self.style
        };
        ElementNode {
            content,
            style,
            position: self.position,
            size: self.size,
            parent_id: self.parent_id,
            ..ElementNode::new(self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_defaults() {
        let node = NewElement::new(ElementKind::Heading).realize();
        assert_eq!(node.content, "New Heading");
        assert_eq!(node.style.get("fontSize"), Some(&StyleValue::from("24px")));
        assert_eq!(node.style.get("fontWeight"), Some(&StyleValue::from("600")));
        assert!(node.children.is_none());
    }

    #[test]
    fn test_caller_content_and_style_are_kept() {
        let style: StyleMap = [("color", "red")].into_iter().collect();
        let node = NewElement::new(ElementKind::Button)
            .with_content("Buy")
            .with_style(style.clone())
            .realize();
        assert_eq!(node.content, "Buy");
        assert_eq!(node.style, style);
    }

    #[test]
    fn test_every_kind_has_default_style() {
        for kind in ElementKind::ALL {
            assert!(!kind.default_style().is_empty(), "{kind} has no default style");
        }
    }

    #[test]
    fn test_list_default_has_three_items() {
        assert_eq!(ElementKind::List.default_content().lines().count(), 3);
        assert_eq!(
            ElementKind::List.default_style().get("lineHeight"),
            Some(&StyleValue::from("1.6"))
        );
    }

    #[test]
    fn test_containers_own_children() {
        assert!(ElementNode::new(ElementKind::Container).children.is_some());
        assert!(ElementNode::new(ElementKind::Card).children.is_some());
        assert!(ElementNode::new(ElementKind::Paragraph).children.is_none());
    }

    #[test]
    fn test_with_children_ignored_for_leaf() {
        let leaf = ElementNode::new(ElementKind::Heading)
            .with_children(vec![ElementNode::new(ElementKind::Button)]);
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_with_children_sets_parent() {
        let container = ElementNode::new(ElementKind::Container)
            .with_children(vec![ElementNode::new(ElementKind::Button)]);
        assert_eq!(container.children()[0].parent_id, Some(container.id));
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(ElementKind::Container.default_size().width, Dimension::Full);
        assert_eq!(ElementKind::Divider.default_size().width, Dimension::Full);
        assert_eq!(ElementKind::Button.default_size().width, Dimension::Auto);
        assert_eq!(ElementKind::Button.default_size().height, Dimension::Auto);
    }

    #[test]
    fn test_capabilities() {
        let caps = ElementKind::Button.capabilities();
        assert!(caps.content && caps.text_style && caps.background && caps.padding);
        assert!(!caps.children);

        let caps = ElementKind::Divider.capabilities();
        assert!(!caps.content && !caps.text_style);

        assert!(ElementKind::Image.capabilities().border_radius);
        assert!(!ElementKind::Image.capabilities().background);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Heading".parse::<ElementKind>().ok(), Some(ElementKind::Heading));
        assert_eq!("text-list".parse::<ElementKind>().ok(), Some(ElementKind::List));
        assert!("table".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_kind_serde_alias() {
        let kind: ElementKind = serde_json::from_str("\"text-list\"").expect("alias");
        assert_eq!(kind, ElementKind::List);
        assert_eq!(serde_json::to_string(&kind).expect("ser"), "\"list\"");
    }

    #[test]
    fn test_dimension_wire_format() {
        let size = Size {
            width: Dimension::Px(120.0),
            height: Dimension::Full,
        };
        let json = serde_json::to_string(&size).expect("ser");
        assert_eq!(json, r#"{"width":120.0,"height":"100%"}"#);

        let auto: Dimension = serde_json::from_str("\"auto\"").expect("auto");
        assert_eq!(auto, Dimension::Auto);
        assert!(serde_json::from_str::<Dimension>("\"wide\"").is_err());
    }

    #[test]
    fn test_dimension_parse_input() {
        assert_eq!(Dimension::parse_input("auto"), Some(Dimension::Auto));
        assert_eq!(Dimension::parse_input(" 100% "), Some(Dimension::Full));
        assert_eq!(Dimension::parse_input("240"), Some(Dimension::Px(240.0)));
        assert_eq!(Dimension::parse_input("240px"), Some(Dimension::Px(240.0)));
        assert_eq!(Dimension::parse_input("-5"), Some(Dimension::Px(-5.0)));
        assert_eq!(Dimension::parse_input("abc"), None);
        assert_eq!(Dimension::parse_input(""), None);
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::Px(300.0).to_string(), "300px");
        assert_eq!(Dimension::Auto.to_string(), "auto");
        assert_eq!(Dimension::Full.to_string(), "100%");
    }

    #[test]
    fn test_style_merge_is_keywise() {
        let mut style: StyleMap = [("color", "red"), ("padding", "4px")].into_iter().collect();
        let patch: StyleMap = [("color", "blue"), ("margin", "0")].into_iter().collect();
        style.merge(&patch);

        let keys: Vec<_> = style.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["color", "padding", "margin"]);
        assert_eq!(style.get("color"), Some(&StyleValue::from("blue")));
    }

    #[test]
    fn test_style_value_number_display() {
        assert_eq!(StyleValue::Number(600.0).to_string(), "600");
        assert_eq!(StyleValue::Number(1.5).to_string(), "1.5");
        let value: StyleValue = serde_json::from_str("16").expect("number");
        assert_eq!(value, StyleValue::Number(16.0));
    }

    #[test]
    fn test_apply_patch_merges_per_key() {
        let mut node = NewElement::new(ElementKind::Paragraph).at(10, 20).realize();
        node.apply(&ElementPatch {
            position: Some(PositionPatch {
                x: Some(99),
                y: None,
            }),
            size: Some(SizePatch {
                width: Some(Dimension::Px(80.0)),
                height: None,
            }),
            ..ElementPatch::default()
        });
        assert_eq!(node.position, Position::new(99, 20));
        assert_eq!(node.size.width, Dimension::Px(80.0));
        assert_eq!(node.size.height, Dimension::Auto);
        assert_eq!(node.content, "New paragraph text");
    }

    #[test]
    fn test_node_wire_names() {
        let node = NewElement::new(ElementKind::Spacer).realize();
        let json = serde_json::to_value(&node).expect("ser");
        assert_eq!(json["type"], "spacer");
        assert!(json.get("parentId").is_some());
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  7em"), Some(7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("x1"), None);
    }
}
