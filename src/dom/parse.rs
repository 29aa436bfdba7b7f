//! HTML5 parsing into the owned tree.
//!
//! html5ever builds an `RcDom`, which is then converted node by node into
//! [`Node`]/[`Element`]. Doctypes are kept as a name, processing instructions
//! are dropped (the HTML5 tree builder turns them into comments anyway).

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, parse_document as html5ever_parse};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::{Attrs, Document, Element, HTML_NS, Node};
use crate::error::TemplateError;

/// Parse an HTML source string and locate `html`, `head` and `body`.
///
/// Fails with [`TemplateError::MalformedDocument`] when any of the three is
/// missing. Missing containers are never synthesized here.
pub fn parse_document(source: &str) -> Result<Document, TemplateError> {
    from_rcdom(&parse_rcdom(source))
}

/// Convert a built `RcDom`, failing fast when a container is missing.
fn from_rcdom(dom: &RcDom) -> Result<Document, TemplateError> {
    let mut doctype = None;
    let mut leading = Vec::new();
    let mut trailing = Vec::new();
    let mut root = None;

    for child in dom.document.children.borrow().iter() {
        match &child.data {
            NodeData::Doctype { name, .. } => doctype = Some(name.to_string()),
            NodeData::Element { name, .. } if is_html_tag(name, "html") && root.is_none() => {
                root = convert_element(child);
            }
            _ => {
                let Some(node) = convert(child) else { continue };
                if root.is_none() {
                    leading.push(node);
                } else {
                    trailing.push(node);
                }
            }
        }
    }

    let root = root.ok_or(TemplateError::MalformedDocument("html"))?;
    let head = find_child(&root, "head").ok_or(TemplateError::MalformedDocument("head"))?;
    let body = find_child(&root, "body").ok_or(TemplateError::MalformedDocument("body"))?;

    Ok(Document::new(doctype, leading, root, trailing, head, body))
}

/// Parse a standalone piece of markup and return the first element it yields.
///
/// The markup is run through the full document tree builder, so head-level
/// tags (`meta`, `link`, `title`, `script`, ...) land in `<head>` and
/// everything else in `<body>`. Head is searched first. Returns `None` when
/// the markup produces no element at all (plain text, empty input, a lone
/// end tag).
pub fn parse_element(markup: &str) -> Option<Element> {
    let dom = parse_rcdom(markup);
    let document = dom.document.children.borrow();
    let html = document
        .iter()
        .find(|node| matches!(&node.data, NodeData::Element { name, .. } if is_html_tag(name, "html")))?;

    let html_children = html.children.borrow();
    ["head", "body"].into_iter().find_map(|container| {
        let container = html_children
            .iter()
            .find(|node| matches!(&node.data, NodeData::Element { name, .. } if is_html_tag(name, container)))?;
        let children = container.children.borrow();
        children.iter().find_map(|child| match &child.data {
            NodeData::Element { .. } => convert_element(child),
            _ => None,
        })
    })
}

fn parse_rcdom(source: &str) -> RcDom {
    html5ever_parse(RcDom::default(), ParseOpts::default()).one(source)
}

#[inline]
fn is_html_tag(name: &QualName, tag: &str) -> bool {
    &*name.local == tag && &*name.ns == HTML_NS
}

fn find_child(root: &Element, tag: &str) -> Option<usize> {
    root.children.iter().position(|node| node.is_element(tag))
}

/// Convert an rcdom node; `None` for node kinds the tree does not model.
fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { .. } => convert_element(handle).map(Node::from),
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        }
    }
}

fn convert_element(handle: &Handle) -> Option<Element> {
    let NodeData::Element {
        name,
        attrs,
        template_contents,
        ..
    } = &handle.data
    else {
        return None;
    };

    let mut converted = Attrs::new();
    for attr in attrs.borrow().iter() {
        let attr_name = match &attr.name.prefix {
            Some(prefix) => format!("{}:{}", prefix, attr.name.local),
            None => attr.name.local.to_string(),
        };
        converted.push(attr_name, attr.value.to_string());
    }

    let mut elem = Element::in_namespace(name.ns.clone(), name.local.to_string(), converted);

    // `<template>` keeps its children in a separate fragment.
    let template = template_contents.borrow();
    let source = match template.as_ref() {
        Some(fragment) => fragment,
        None => handle,
    };
    for child in source.children.borrow().iter() {
        if let Some(node) = convert(child) {
            elem.children.push(node);
        }
    }

    Some(elem)
}
