//! One-way HTML export of a page.
//!
//! Each element becomes one tag carrying an inline style: its style map
//! (camelCase keys written as CSS property names), then
//! `position: relative; left; top;`, then explicit width and height.

use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, ElementNode};
use crate::page::PageDocument;

const BASE_STYLESHEET: &str = "\
body {
  margin: 0;
  padding: 0;
  font-family: system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif;
}
.canvas-container {
  position: relative;
  width: 100%;
  min-height: 100vh;
  overflow: hidden;
}";

const CARD_PLACEHOLDER: &str = "<div style=\"padding: 16px;\">\
<h3 style=\"font-size: 18px; margin-bottom: 8px;\">Card Title</h3>\
<p>Card content goes here</p></div>";

/// Configuration for HTML export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Document title; the page name when unset.
    pub title: Option<String>,
    /// Stylesheet placed in the document head.
    pub stylesheet: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: None,
            stylesheet: BASE_STYLESHEET.to_string(),
        }
    }
}

/// Renders pages as standalone HTML documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    config: ExportConfig,
}

impl HtmlExporter {
    /// Create an exporter with custom configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a page as a complete HTML document.
    #[must_use]
    pub fn export_page(&self, page: &PageDocument) -> String {
        let title = self.config.title.as_deref().unwrap_or(&page.name);
        let mut out = String::with_capacity(1024);

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("  <meta charset=\"UTF-8\">\n");
        out.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        out.push_str("  <title>");
        html_escape_into(&mut out, title);
        out.push_str("</title>\n  <style>\n");
        out.push_str(&self.config.stylesheet);
        out.push_str("\n  </style>\n</head>\n<body>\n  <div class=\"canvas-container\">\n");
        for node in page.elements.roots() {
            out.push_str("    ");
            write_element(&mut out, node);
            out.push('\n');
        }
        out.push_str("  </div>\n</body>\n</html>\n");

        tracing::debug!(page = %page.id, bytes = out.len(), "Exported page");
        out
    }

    /// Export only the markup of the page's elements, without the document
    /// wrapper.
    #[must_use]
    pub fn export_fragment(&self, page: &PageDocument) -> String {
        let mut out = String::new();
        for node in page.elements.roots() {
            write_element(&mut out, node);
        }
        out
    }
}

/// File name a page exports to: lowercased, whitespace runs as `-`, `.html`.
#[must_use]
pub fn export_file_name(page: &PageDocument) -> String {
    let mut stem = String::with_capacity(page.name.len());
    let mut in_space = false;
    for c in page.name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('-');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }
    format!("{stem}.html")
}

fn write_element(out: &mut String, node: &ElementNode) {
    let style = inline_style(node);
    match node.kind {
        ElementKind::Container => {
            open_tag(out, "div", &style);
            write_children(out, node);
            out.push_str("</div>");
        }
        ElementKind::Heading => text_tag(out, "h1", &style, &node.content),
        ElementKind::Paragraph => text_tag(out, "p", &style, &node.content),
        ElementKind::Button => text_tag(out, "button", &style, &node.content),
        ElementKind::Image => {
            out.push_str("<img src=\"");
            html_escape_into(out, &node.content);
            out.push_str("\" style=\"");
            html_escape_into(out, &style);
            out.push_str("\" alt=\"Image\" />");
        }
        ElementKind::Divider => {
            out.push_str("<hr style=\"");
            html_escape_into(out, &style);
            out.push_str("\" />");
        }
        ElementKind::Spacer => {
            open_tag(out, "div", &style);
            out.push_str("</div>");
        }
        ElementKind::List => {
            open_tag(out, "ul", &style);
            for item in node.content.split('\n') {
                out.push_str("<li>");
                html_escape_into(out, item.trim());
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        ElementKind::Card => {
            open_tag(out, "div", &style);
            if node.children().is_empty() {
                out.push_str(CARD_PLACEHOLDER);
            } else {
                write_children(out, node);
            }
            out.push_str("</div>");
        }
    }
}

fn write_children(out: &mut String, node: &ElementNode) {
    for child in node.children() {
        write_element(out, child);
    }
}

fn open_tag(out: &mut String, tag: &str, style: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(" style=\"");
    html_escape_into(out, style);
    out.push_str("\">");
}

fn text_tag(out: &mut String, tag: &str, style: &str, text: &str) {
    open_tag(out, tag, style);
    html_escape_into(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn inline_style(node: &ElementNode) -> String {
    let mut parts: Vec<String> = node
        .style
        .iter()
        .map(|(key, value)| format!("{}: {value};", css_property(key)))
        .collect();
    parts.push(format!(
        "position: relative; left: {}px; top: {}px;",
        node.position.x, node.position.y
    ));
    parts.push(format!(
        "width: {}; height: {};",
        node.size.width, node.size.height
    ));
    parts.join(" ")
}

/// `backgroundColor` -> `background-color`; already-kebab names pass through.
fn css_property(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// HTML-escape a string into the output buffer.
fn html_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Dimension, NewElement, Size, StyleMap};

    fn page_with(elements: Vec<NewElement>) -> PageDocument {
        let mut page = PageDocument::new("Landing Page");
        for element in elements {
            page.elements.insert(element);
        }
        page
    }

    #[test]
    fn test_document_wrapper() {
        let html = HtmlExporter::default().export_page(&page_with(Vec::new()));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Landing Page</title>"));
        assert!(html.contains("<div class=\"canvas-container\">"));
        assert!(html.contains(".canvas-container {"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_title_override_and_escape() {
        let exporter = HtmlExporter::new(ExportConfig {
            title: Some("Tom & Jerry".into()),
            ..ExportConfig::default()
        });
        let html = exporter.export_page(&page_with(Vec::new()));
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
    }

    #[test]
    fn test_inline_style_order_and_units() {
        let style: StyleMap = [("fontSize", "24px")].into_iter().collect();
        let page = page_with(vec![NewElement::new(ElementKind::Heading)
            .with_content("Hi")
            .with_style(style)
            .at(12, 34)
            .with_size(Size {
                width: Dimension::Px(300.0),
                height: Dimension::Auto,
            })]);
        let fragment = HtmlExporter::default().export_fragment(&page);
        assert_eq!(
            fragment,
            "<h1 style=\"font-size: 24px; position: relative; left: 12px; top: 34px; \
             width: 300px; height: auto;\">Hi</h1>"
        );
    }

    #[test]
    fn test_tag_mapping() {
        let page = page_with(vec![
            NewElement::new(ElementKind::Paragraph).with_content("a < b"),
            NewElement::new(ElementKind::Button),
            NewElement::new(ElementKind::Image).with_content("https://x.test/a.png?w=1&h=2"),
            NewElement::new(ElementKind::Divider),
            NewElement::new(ElementKind::Spacer),
            NewElement::new(ElementKind::List).with_content(" One \nTwo"),
            NewElement::new(ElementKind::Card),
        ]);
        let html = HtmlExporter::default().export_fragment(&page);

        assert!(html.contains(">a &lt; b</p>"));
        assert!(html.contains(">Button</button>"));
        assert!(html.contains("<img src=\"https://x.test/a.png?w=1&amp;h=2\""));
        assert!(html.contains("alt=\"Image\" />"));
        assert!(html.contains("<hr style=\""));
        assert!(html.contains("<li>One</li><li>Two</li></ul>"));
        assert!(html.contains("Card Title"));
        assert!(html.contains("Card content goes here"));
        assert!(html.contains("width: 100%;"));
    }

    #[test]
    fn test_children_rendered_recursively() {
        let page = PageDocument::starter("Home");
        let html = HtmlExporter::default().export_fragment(&page);
        assert!(html.starts_with("<div style=\""));
        assert!(html.contains("flex-direction: column;"));
        assert!(html.contains(">Welcome to Your Website</h1>"));
        assert!(html.contains(">Get Started</button></div>"));
    }

    #[test]
    fn test_card_children_replace_placeholder() {
        let card = ElementNode::new(ElementKind::Card)
            .with_children(vec![ElementNode::new(ElementKind::Paragraph).with_content("Inside")]);
        let mut page = PageDocument::new("Cards");
        page.elements = crate::tree::ElementTree::from_roots(vec![card]);
        let html = HtmlExporter::default().export_fragment(&page);
        assert!(html.contains(">Inside</p>"));
        assert!(!html.contains("Card Title"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&PageDocument::new("Landing  Page")), "landing-page.html");
        assert_eq!(export_file_name(&PageDocument::new("About")), "about.html");
        assert_eq!(export_file_name(&PageDocument::new(" My\tPage ")), "-my-page-.html");
    }

    #[test]
    fn test_css_property() {
        assert_eq!(css_property("backgroundColor"), "background-color");
        assert_eq!(css_property("margin"), "margin");
        assert_eq!(css_property("border-radius"), "border-radius");
    }

    #[test]
    fn test_html_escape() {
        let mut out = String::new();
        html_escape_into(&mut out, "<script>alert(\"hi&bye\")</script>");
        assert_eq!(
            out,
            "&lt;script&gt;alert(&quot;hi&amp;bye&quot;)&lt;/script&gt;"
        );
    }
}
