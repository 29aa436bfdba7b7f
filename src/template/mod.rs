//! Template assembly.
//!
//! [`Template`] wraps a parsed [`Document`] and exposes one by-value builder
//! method per content kind. [`Template::serialize`] runs the sort-and-strip
//! pass before producing the final HTML.
//!
//! ```text
//! source ──► parse ──► upsert_* (any number) ──► sort + strip ──► HTML
//! ```
//!
//! [`parse_template`] applies a whole [`TemplateOptions`] in a fixed
//! precedence: meta tags, favicon, title, styles, inline styles, head
//! scripts, head inline scripts, body scripts.

pub mod options;
pub mod order;
pub mod sort;
pub mod upsert;

pub use options::{
    FaviconItem, InlineScriptItem, InlineStyleItem, ScriptItem, StyleItem, TemplateOptions,
};
pub use order::{Position, SortKey};

use crate::dom::{Document, parse_document};
use crate::error::TemplateError;

/// A document being assembled.
#[derive(Debug, Clone)]
pub struct Template {
    doc: Document,
}

impl Template {
    /// Parse `source`, failing if it has no `<head>` or `<body>`.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            doc: parse_document(source)?,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn upsert_title(mut self, title: &str) -> Self {
        upsert::upsert_title(self.doc.head_mut(), title);
        self
    }

    pub fn upsert_favicon(mut self, favicon: &FaviconItem) -> Self {
        upsert::upsert_favicon(self.doc.head_mut(), favicon);
        self
    }

    pub fn upsert_meta_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        upsert::upsert_meta_tags(self.doc.head_mut(), tags);
        self
    }

    pub fn upsert_styles(mut self, styles: &[StyleItem]) -> Self {
        upsert::upsert_styles(self.doc.head_mut(), styles);
        self
    }

    pub fn upsert_inline_styles(mut self, styles: &[InlineStyleItem]) -> Self {
        upsert::upsert_inline_styles(self.doc.head_mut(), styles);
        self
    }

    pub fn upsert_head_scripts(mut self, scripts: &[ScriptItem]) -> Self {
        upsert::upsert_scripts(self.doc.head_mut(), scripts);
        self
    }

    pub fn upsert_head_inline_scripts(mut self, scripts: &[InlineScriptItem]) -> Self {
        upsert::upsert_inline_scripts(self.doc.head_mut(), scripts);
        self
    }

    pub fn upsert_body_scripts(mut self, scripts: &[ScriptItem]) -> Self {
        upsert::upsert_scripts(self.doc.body_mut(), scripts);
        self
    }

    pub fn upsert_body_inline_scripts(mut self, scripts: &[InlineScriptItem]) -> Self {
        upsert::upsert_inline_scripts(self.doc.body_mut(), scripts);
        self
    }

    /// Apply every field of `options`. Absent fields, empty lists and an
    /// empty title are skipped.
    pub fn apply(self, options: &TemplateOptions) -> Self {
        let mut template = self.upsert_meta_tags(&options.head_meta_tags);

        if let Some(favicon) = &options.favicon {
            template = template.upsert_favicon(favicon);
        }
        if let Some(title) = options.title.as_deref().filter(|t| !t.is_empty()) {
            template = template.upsert_title(title);
        }

        template
            .upsert_styles(&options.head_styles)
            .upsert_inline_styles(&options.head_inline_styles)
            .upsert_head_scripts(&options.head_scripts)
            .upsert_head_inline_scripts(&options.head_inline_scripts)
            .upsert_body_scripts(&options.body_scripts)
    }

    /// Sort annotated nodes, strip annotations and serialize.
    pub fn serialize(mut self) -> Result<String, TemplateError> {
        sort::sort_document(&mut self.doc);
        self.doc.to_html()
    }
}

/// Parse `source` and apply `options`, returning the template for further
/// chained upserts.
pub fn parse_template(source: &str, options: &TemplateOptions) -> Result<Template, TemplateError> {
    Ok(Template::parse(source)?.apply(options))
}

/// Parse, apply and serialize in one step.
pub fn render_template(source: &str, options: &TemplateOptions) -> Result<String, TemplateError> {
    parse_template(source, options)?.serialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body><div id=\"app\"></div></body></html>";

    #[test]
    fn test_no_options_round_trip() {
        let html = render_template(PAGE, &TemplateOptions::default()).unwrap();
        assert_eq!(html, PAGE);
    }

    #[test]
    fn test_cross_call_reconciliation() {
        let html = Template::parse(PAGE)
            .unwrap()
            .upsert_head_scripts(&[ScriptItem::new("x", "/x.js", Position::Beginning).with_order(1)])
            .upsert_head_scripts(&[ScriptItem::new("y", "/y.js", Position::Beginning).with_order(0)])
            .serialize()
            .unwrap();

        let y = html.find("/y.js").unwrap();
        let x = html.find("/x.js").unwrap();
        assert!(y < x);
        assert!(!html.contains("data-order"));
        assert!(!html.contains("data-position"));
    }

    #[test]
    fn test_annotations_visible_before_serialize() {
        let template = Template::parse(PAGE)
            .unwrap()
            .upsert_styles(&[StyleItem::new("s", "/s.css", Position::End).with_order(4)]);

        let link = template.document().head().child("link").unwrap();
        assert_eq!(
            SortKey::read(link),
            Some(SortKey::new(Position::End, 4))
        );
    }

    #[test]
    fn test_empty_title_skipped_by_apply() {
        let source = "<html><head><title>Keep</title></head><body></body></html>";
        let options = TemplateOptions {
            title: Some(String::new()),
            ..Default::default()
        };

        let html = render_template(source, &options).unwrap();

        assert_eq!(html, source);
    }

    #[test]
    fn test_explicit_empty_title_is_written() {
        let html = Template::parse("<html><head><title>Old</title></head><body></body></html>")
            .unwrap()
            .upsert_title("")
            .serialize()
            .unwrap();

        assert_eq!(html, "<html><head><title></title></head><body></body></html>");
    }

    #[test]
    fn test_head_inline_scripts_go_to_head() {
        let options = TemplateOptions {
            head_inline_scripts: vec![InlineScriptItem::new("boot", "boot()", Position::End)],
            ..Default::default()
        };

        let template = parse_template(PAGE, &options).unwrap();

        assert!(template.document().head().child("script").is_some());
        assert!(template.document().body().child("script").is_none());
    }

    #[test]
    fn test_body_inline_scripts() {
        let html = Template::parse(PAGE)
            .unwrap()
            .upsert_body_inline_scripts(&[
                InlineScriptItem::new("late", "late()", Position::End).with_order(2),
                InlineScriptItem::new("early", "early()", Position::End).with_order(1),
            ])
            .serialize()
            .unwrap();

        assert!(html.ends_with(
            "<div id=\"app\"></div><script id=\"early\">early()</script><script id=\"late\">late()</script></body></html>"
        ));
    }

    #[test]
    fn test_precedence_meta_before_title() {
        let options = TemplateOptions {
            title: Some("T".into()),
            head_meta_tags: vec![r#"<meta name="description" content="d">"#.into()],
            ..Default::default()
        };

        let html = render_template("<html><head></head><body></body></html>", &options).unwrap();

        // Title is prepended after meta tags, so it lands first.
        assert_eq!(
            html,
            r#"<html><head><title>T</title><meta name="description" content="d"></head><body></body></html>"#
        );
    }

    #[test]
    fn test_malformed_source_errors() {
        // html5ever always synthesizes containers; build the failure directly.
        let err = TemplateError::MalformedDocument("head");
        assert!(err.to_string().contains("<head>"));
        assert!(Template::parse("").is_ok());
    }
}
