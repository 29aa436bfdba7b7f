//! HTML5 serialization of the owned tree.
//!
//! The tree implements html5ever's `Serialize` so escaping, void elements and
//! raw-text handling (`script`, `style`, ...) come from `HtmlSerializer`.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{LocalName, Namespace, QualName};

use super::{Document, Element, Node};
use crate::error::TemplateError;

/// The serializer picks raw-text handling from the namespace, so foreign
/// elements must keep theirs.
fn element_name(elem: &Element) -> QualName {
    QualName::new(None, elem.ns.clone(), LocalName::from(elem.tag.as_str()))
}

/// Attribute names carry their prefix inline (`xlink:href`), so they are
/// emitted in the null namespace where the serializer writes the local name
/// verbatim.
fn attr_name(name: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(name))
}

impl Serialize for Element {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        let include_node = traversal_scope == TraversalScope::IncludeNode;

        if include_node {
            let names: Vec<QualName> = self.attrs.iter().map(|a| attr_name(&a.name)).collect();
            serializer.start_elem(
                element_name(self),
                names
                    .iter()
                    .zip(self.attrs.iter())
                    .map(|(name, attr)| (name, attr.value.as_str())),
            )?;
        }

        for child in &self.children {
            child.serialize(serializer, TraversalScope::IncludeNode)?;
        }

        if include_node {
            serializer.end_elem(element_name(self))?;
        }
        Ok(())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match self {
            Node::Element(elem) => elem.serialize(serializer, traversal_scope),
            Node::Text(text) => serializer.write_text(text),
            Node::Comment(text) => serializer.write_comment(text),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: &mut S, _: TraversalScope) -> io::Result<()> {
        if let Some(name) = &self.doctype {
            serializer.write_doctype(name)?;
        }
        for node in &self.leading {
            node.serialize(serializer, TraversalScope::IncludeNode)?;
        }
        self.root.serialize(serializer, TraversalScope::IncludeNode)?;
        for node in &self.trailing {
            node.serialize(serializer, TraversalScope::IncludeNode)?;
        }
        Ok(())
    }
}

impl Document {
    /// Serialize the whole document to an HTML string.
    pub fn to_html(&self) -> Result<String, TemplateError> {
        let mut buf = Vec::new();
        html5ever::serialize(
            &mut buf,
            self,
            SerializeOpts {
                traversal_scope: TraversalScope::ChildrenOnly(None),
                ..Default::default()
            },
        )?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Element {
    /// Serialize this element (tag included) to an HTML string.
    pub fn to_html(&self) -> Result<String, TemplateError> {
        let mut buf = Vec::new();
        html5ever::serialize(
            &mut buf,
            self,
            SerializeOpts {
                traversal_scope: TraversalScope::IncludeNode,
                ..Default::default()
            },
        )?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attrs, parse_document};

    #[test]
    fn test_round_trip_minimal() {
        let source = "<html><head></head><body></body></html>";
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.to_html().unwrap(), source);
    }

    #[test]
    fn test_round_trip_doctype_and_void_elements() {
        let source = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><link rel="icon" href="/f.ico"></head><body><br></body></html>"#;
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.to_html().unwrap(), source);
    }

    #[test]
    fn test_script_text_not_escaped() {
        let mut script = Element::with_attrs("script", Attrs::from([("id", "x")]));
        script.set_text("if (a < b && c) { run(\"x\"); }");

        assert_eq!(
            script.to_html().unwrap(),
            r#"<script id="x">if (a < b && c) { run("x"); }</script>"#
        );
    }

    #[test]
    fn test_title_text_escaped() {
        let mut title = Element::new("title");
        title.set_text("Tom & Jerry <3");
        assert_eq!(title.to_html().unwrap(), "<title>Tom &amp; Jerry &lt;3</title>");
    }

    #[test]
    fn test_attribute_value_escaped() {
        let link = Element::with_attrs("link", Attrs::from([("href", "/a?x=1&y=\"2\"")]));
        assert_eq!(
            link.to_html().unwrap(),
            r#"<link href="/a?x=1&amp;y=&quot;2&quot;">"#
        );
    }

    #[test]
    fn test_foreign_style_escaped_and_stable() {
        let source = "<html><head></head><body><svg><style>a&lt;b{}</style></svg></body></html>";
        let once = parse_document(source).unwrap().to_html().unwrap();
        let twice = parse_document(&once).unwrap().to_html().unwrap();

        assert_eq!(once, source);
        assert_eq!(twice, once);
    }
}
