//! Owned HTML tree.
//!
//! Parents own their children outright; a child is addressed by its index in
//! the parent's `children`. Every structural edit goes through the parent, so
//! nodes carry no back-pointers.
//!
//! # Modules
//!
//! - `attrs`: ordered attribute list
//! - `parse`: HTML5 source → [`Document`] (via html5ever)
//! - `serialize`: [`Document`] → HTML5 string (via html5ever's serializer)

mod attrs;
mod parse;
mod serialize;

pub use attrs::{Attr, Attrs};
pub use parse::{parse_document, parse_element};

use html5ever::Namespace;

pub(crate) const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

#[inline]
pub(crate) fn html_ns() -> Namespace {
    Namespace::from(HTML_NS)
}

// =============================================================================
// Nodes
// =============================================================================

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    Text(String),
    Comment(String),
}

impl Node {
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(elem) => Some(elem),
            Node::Text(_) | Node::Comment(_) => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(elem) => Some(elem),
            Node::Text(_) | Node::Comment(_) => None,
        }
    }

    /// True if this is an HTML element with the given tag.
    #[inline]
    pub fn is_element(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|elem| elem.is(tag))
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

/// An element: namespace, lowercase local name, ordered attributes, ordered
/// children.
///
/// The namespace decides how text children serialize: `<style>` inside
/// `<svg>` is escaped text, `<style>` in HTML is raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub ns: Namespace,
    pub tag: String,
    pub attrs: Attrs,
    pub children: Vec<Node>,
}

impl Element {
    /// An HTML element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_attrs(tag, Attrs::new())
    }

    /// An HTML element with attributes.
    pub fn with_attrs(tag: impl Into<String>, attrs: Attrs) -> Self {
        Self::in_namespace(html_ns(), tag, attrs)
    }

    pub fn in_namespace(ns: Namespace, tag: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            ns,
            tag: tag.into(),
            attrs,
            children: Vec::new(),
        }
    }

    /// True if this is the HTML element `tag`. Foreign elements (`svg`,
    /// `math` content) never match.
    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag && &*self.ns == HTML_NS
    }

    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has(name)
    }

    #[inline]
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.set(name, value);
    }

    /// True if the attribute `name` exists and equals `value`.
    #[inline]
    pub fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attrs.get(name) == Some(value)
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Concatenated text of direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn prepend(&mut self, node: impl Into<Node>) {
        self.children.insert(0, node.into());
    }

    /// First direct child HTML element with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find(|elem| elem.is(tag))
    }

    /// Mutable access to the first direct child HTML element with the given tag.
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|elem| elem.is(tag))
    }

    /// Iterator over direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Remove every direct child element matching `pred`. Returns the count.
    pub fn remove_children_where(&mut self, mut pred: impl FnMut(&Element) -> bool) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(elem) if pred(elem)));
        before - self.children.len()
    }

    /// Visit this element and every descendant element, depth first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(elem) = child {
                elem.walk_mut(f);
            }
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// A parsed HTML document whose `<html>`, `<head>` and `<body>` are known to
/// exist.
///
/// Only [`parse_document`] constructs it, after locating all three. The head
/// and body indices stay valid because nothing in this crate edits the child
/// list of `<html>` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Doctype name (`html` for `<!DOCTYPE html>`).
    pub doctype: Option<String>,
    /// Comments that precede `<html>`.
    pub(crate) leading: Vec<Node>,
    pub(crate) root: Element,
    /// Comments that follow `</html>`.
    pub(crate) trailing: Vec<Node>,
    head: usize,
    body: usize,
}

impl Document {
    pub(crate) fn new(
        doctype: Option<String>,
        leading: Vec<Node>,
        root: Element,
        trailing: Vec<Node>,
        head: usize,
        body: usize,
    ) -> Self {
        Self {
            doctype,
            leading,
            root,
            trailing,
            head,
            body,
        }
    }

    /// The `<html>` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn head(&self) -> &Element {
        Self::element_at(&self.root, self.head)
    }

    pub fn head_mut(&mut self) -> &mut Element {
        Self::element_at_mut(&mut self.root, self.head)
    }

    pub fn body(&self) -> &Element {
        Self::element_at(&self.root, self.body)
    }

    pub fn body_mut(&mut self) -> &mut Element {
        Self::element_at_mut(&mut self.root, self.body)
    }

    fn element_at(root: &Element, index: usize) -> &Element {
        match &root.children[index] {
            Node::Element(elem) => elem,
            _ => unreachable!("head/body index points at an element"),
        }
    }

    fn element_at_mut(root: &mut Element, index: usize) -> &mut Element {
        match &mut root.children[index] {
            Node::Element(elem) => elem,
            _ => unreachable!("head/body index points at an element"),
        }
    }
}
