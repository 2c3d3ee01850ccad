//! A minimal document model.
//!
//! The engine touches a page in three places: the marking attribute on the
//! root and body elements, the stylesheets it scans for tokens, and the one
//! `<style>` element it injects. [`Document`] models exactly that:
//!
//! - optional root and body [`Element`]s (either may be missing),
//! - an ordered head of [`HeadNode`]s, each a linked [`StyleSheet`] or an
//!   inline [`StyleElement`]. Document order is stylesheet order.
//!
//! Style elements with an id form a registry: [`Document::replace_style`] is
//! the single create-or-replace operation, and it guarantees at most one
//! element per id.
//!
//! ```rust
//! use nightfall::{Document, StyleElement};
//!
//! let mut doc = Document::new();
//! doc.replace_style(StyleElement::with_id("overrides", "body { color: red; }"));
//! doc.replace_style(StyleElement::with_id("overrides", "body { color: blue; }"));
//!
//! assert_eq!(doc.styles_with_id("overrides").count(), 1);
//! ```

mod parser;
mod sheet;

use std::collections::BTreeMap;

pub use sheet::{CssRule, Declaration, MediaRule, StyleRule, StyleSheet};

/// An element with attributes. Only attributes matter to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }
}

/// An inline `<style>` element: its text and the sheet parsed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    id: Option<String>,
    text: String,
    sheet: StyleSheet,
}

impl StyleElement {
    /// An anonymous style element.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let sheet = StyleSheet::parse(&text);
        Self {
            id: None,
            text,
            sheet,
        }
    }

    /// A style element carrying an id.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(text)
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }
}

/// One stylesheet-bearing node in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
    /// A `<link rel="stylesheet">`.
    Link(StyleSheet),
    /// An inline `<style>`.
    Style(StyleElement),
}

impl HeadNode {
    pub fn sheet(&self) -> &StyleSheet {
        match self {
            HeadNode::Link(sheet) => sheet,
            HeadNode::Style(style) => style.sheet(),
        }
    }
}

/// The page the engine operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Option<Element>,
    body: Option<Element>,
    head: Vec<HeadNode>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with `<html>` and `<body>` elements and an empty head.
    pub fn new() -> Self {
        Self {
            root: Some(Element::new("html")),
            body: Some(Element::new("body")),
            head: Vec::new(),
        }
    }

    /// A document with neither root nor body, as seen by a script that runs
    /// before the parser has created them.
    pub fn detached() -> Self {
        Self {
            root: None,
            body: None,
            head: Vec::new(),
        }
    }

    /// Builder form of [`link_stylesheet`](Self::link_stylesheet).
    pub fn with_stylesheet(mut self, sheet: StyleSheet) -> Self {
        self.link_stylesheet(sheet);
        self
    }

    /// Drops the body element.
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Drops the root element.
    pub fn without_root(mut self) -> Self {
        self.root = None;
        self
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    pub fn body(&self) -> Option<&Element> {
        self.body.as_ref()
    }

    /// Appends a linked stylesheet to the head.
    pub fn link_stylesheet(&mut self, sheet: StyleSheet) {
        self.head.push(HeadNode::Link(sheet));
    }

    /// Appends an inline style element to the head without any id check.
    pub fn append_style(&mut self, style: StyleElement) {
        self.head.push(HeadNode::Style(style));
    }

    /// Installs `style`, first removing every element sharing its id.
    ///
    /// The new element is appended at the end of the head, so it is the last
    /// stylesheet in document order. Elements without an id are appended.
    pub fn replace_style(&mut self, style: StyleElement) {
        if let Some(id) = style.id() {
            self.remove_styles_with_id(id);
        }
        self.append_style(style);
    }

    /// Removes every style element with `id`, returning how many were removed.
    pub fn remove_styles_with_id(&mut self, id: &str) -> usize {
        let before = self.head.len();
        self.head
            .retain(|node| !matches!(node, HeadNode::Style(style) if style.id() == Some(id)));
        before - self.head.len()
    }

    /// Style elements carrying `id`, in document order.
    pub fn styles_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a StyleElement> + 'a {
        self.style_elements().filter(move |style| style.id() == Some(id))
    }

    /// All inline style elements, in document order.
    pub fn style_elements(&self) -> impl Iterator<Item = &StyleElement> {
        self.head.iter().filter_map(|node| match node {
            HeadNode::Style(style) => Some(style),
            HeadNode::Link(_) => None,
        })
    }

    /// Every stylesheet, linked or inline, in document order.
    pub fn stylesheets(&self) -> impl Iterator<Item = &StyleSheet> {
        self.head.iter().map(HeadNode::sheet)
    }

    pub fn head(&self) -> &[HeadNode] {
        &self.head
    }

    /// Sets `attribute` on the root and the body element, skipping whichever
    /// is missing.
    pub fn mark(&mut self, attribute: &str, value: &str) {
        for element in [self.root.as_mut(), self.body.as_mut()].into_iter().flatten() {
            element.set_attribute(attribute, value);
        }
    }
}
