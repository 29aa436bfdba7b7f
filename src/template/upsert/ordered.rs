//! Position/order upsert shared by stylesheets, inline styles and scripts.
//!
//! Every item kind implements [`Positioned`]: how to recognise an existing
//! node of its kind and how to build a fresh one. [`upsert_positioned`] then
//! runs the common algorithm:
//!
//! 1. remove existing nodes of the same kind and `id`
//! 2. stable-sort items by order
//! 3. build each node, tagged with its [`SortKey`]
//! 4. prepend the beginning group, append the end group (both ascending)

use crate::dom::Element;
use crate::template::options::{InlineScriptItem, InlineStyleItem, ScriptItem, StyleItem};
use crate::template::order::{Position, SortKey};

/// An item placed by position and order, identified by `id`.
pub trait Positioned {
    fn id(&self) -> &str;

    fn sort_key(&self) -> SortKey;

    /// Whether `elem` is a node of this item's kind (ignoring `id`).
    fn is_same_kind(elem: &Element) -> bool;

    /// Build the node. `key` is written right after the identifying
    /// attributes, before any optional ones.
    fn build(&self, key: SortKey) -> Element;
}

/// Upsert `items` into `target`. An empty list leaves `target` untouched.
pub fn upsert_positioned<T: Positioned>(target: &mut Element, items: &[T]) {
    if items.is_empty() {
        return;
    }

    for item in items {
        let id = item.id();
        target.remove_children_where(|e| T::is_same_kind(e) && e.attr_is("id", id));
    }

    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.sort_key().order);

    let (beginning, end): (Vec<_>, Vec<_>) = sorted
        .into_iter()
        .map(|item| {
            let key = item.sort_key();
            (key.position, item.build(key))
        })
        .partition(|(position, _)| *position == Position::Beginning);

    for (_, elem) in beginning.into_iter().rev() {
        target.prepend(elem);
    }
    for (_, elem) in end {
        target.push(elem);
    }
}

// ============================================================================
// Item kinds
// ============================================================================

impl Positioned for StyleItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> SortKey {
        StyleItem::sort_key(self)
    }

    fn is_same_kind(elem: &Element) -> bool {
        elem.is("link") && elem.attr_is("rel", "stylesheet")
    }

    fn build(&self, key: SortKey) -> Element {
        let mut link = Element::new("link");
        link.set_attr("rel", "stylesheet");
        link.set_attr("href", self.href.as_str());
        link.set_attr("id", self.id.as_str());
        key.write(&mut link);
        link
    }
}

impl Positioned for InlineStyleItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> SortKey {
        InlineStyleItem::sort_key(self)
    }

    fn is_same_kind(elem: &Element) -> bool {
        elem.is("style")
    }

    fn build(&self, key: SortKey) -> Element {
        let mut style = Element::new("style");
        style.set_attr("id", self.id.as_str());
        key.write(&mut style);
        style.set_text(self.content.as_str());
        style
    }
}

impl Positioned for ScriptItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> SortKey {
        ScriptItem::sort_key(self)
    }

    fn is_same_kind(elem: &Element) -> bool {
        elem.is("script")
    }

    /// `id`, `src`, the annotation, then the optional attributes in a fixed
    /// order. Boolean flags are written as `"true"`; unset flags are left out.
    fn build(&self, key: SortKey) -> Element {
        let mut script = Element::new("script");
        script.set_attr("id", self.id.as_str());
        script.set_attr("src", self.src.as_str());
        key.write(&mut script);
        if let Some(kind) = &self.kind {
            script.set_attr("type", kind.as_str());
        }
        if self.is_async {
            script.set_attr("async", "true");
        }
        if self.defer {
            script.set_attr("defer", "true");
        }
        if let Some(cross_origin) = &self.cross_origin {
            script.set_attr("crossorigin", cross_origin.as_str());
        }
        if let Some(integrity) = &self.integrity {
            script.set_attr("integrity", integrity.as_str());
        }
        if let Some(nonce) = &self.nonce {
            script.set_attr("nonce", nonce.as_str());
        }
        script
    }
}

impl Positioned for InlineScriptItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> SortKey {
        InlineScriptItem::sort_key(self)
    }

    fn is_same_kind(elem: &Element) -> bool {
        elem.is("script")
    }

    fn build(&self, key: SortKey) -> Element {
        let mut script = Element::new("script");
        script.set_attr("id", self.id.as_str());
        key.write(&mut script);
        script.set_text(self.content.as_str());
        script
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// External stylesheets into head.
#[inline]
pub fn upsert_styles(head: &mut Element, styles: &[StyleItem]) {
    upsert_positioned(head, styles);
}

/// Inline `<style>` blocks into head.
#[inline]
pub fn upsert_inline_styles(head: &mut Element, styles: &[InlineStyleItem]) {
    upsert_positioned(head, styles);
}

/// External scripts into head or body.
#[inline]
pub fn upsert_scripts(target: &mut Element, scripts: &[ScriptItem]) {
    upsert_positioned(target, scripts);
}

/// Inline scripts into head or body.
#[inline]
pub fn upsert_inline_scripts(target: &mut Element, scripts: &[InlineScriptItem]) {
    upsert_positioned(target, scripts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Node, parse_document};

    fn ids(elem: &Element) -> Vec<&str> {
        elem.child_elements().filter_map(|e| e.get_attr("id")).collect()
    }

    #[test]
    fn test_position_and_order_into_empty_head() {
        let mut head = Element::new("head");
        let styles = [
            StyleItem::new("a", "a.css", Position::End).with_order(2),
            StyleItem::new("b", "b.css", Position::Beginning).with_order(1),
            StyleItem::new("c", "c.css", Position::End).with_order(1),
        ];

        upsert_styles(&mut head, &styles);

        assert_eq!(ids(&head), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_beginning_goes_before_existing_content() {
        let mut doc = parse_document(
            r#"<html><head><meta charset="utf-8"><title>T</title></head><body></body></html>"#,
        )
        .unwrap();
        let head = doc.head_mut();

        upsert_scripts(
            head,
            &[
                ScriptItem::new("late", "late.js", Position::Beginning).with_order(5),
                ScriptItem::new("early", "early.js", Position::Beginning).with_order(0),
                ScriptItem::new("tail", "tail.js", Position::End),
            ],
        );

        let tags: Vec<_> = head.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["script", "script", "meta", "title", "script"]);
        assert_eq!(ids(head), vec!["early", "late", "tail"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut body = Element::new("body");
        upsert_scripts(
            &mut body,
            &[
                ScriptItem::new("x", "x.js", Position::End),
                ScriptItem::new("y", "y.js", Position::End),
                ScriptItem::new("z", "z.js", Position::End),
            ],
        );
        assert_eq!(ids(&body), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_replace_by_id() {
        let mut head = Element::new("head");
        upsert_styles(&mut head, &[StyleItem::new("main", "/v1.css", Position::End)]);
        upsert_styles(&mut head, &[StyleItem::new("main", "/v2.css", Position::End)]);

        let links: Vec<_> = head.child_elements().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_attr("href"), Some("/v2.css"));
    }

    #[test]
    fn test_same_id_in_one_call_inserts_both() {
        let mut body = Element::new("body");
        upsert_scripts(
            &mut body,
            &[
                ScriptItem::new("x", "/x.js", Position::End),
                ScriptItem::new("x", "/y.js", Position::End),
            ],
        );
        assert_eq!(ids(&body), vec!["x", "x"]);
    }

    #[test]
    fn test_inline_annotation_follows_id() {
        let mut head = Element::new("head");
        upsert_inline_scripts(
            &mut head,
            &[InlineScriptItem::new("boot", "1", Position::End).with_order(3)],
        );
        assert_eq!(
            head.child("script").unwrap().attrs.names(),
            vec!["id", "data-order", "data-position"]
        );
    }

    #[test]
    fn test_dedup_is_kind_specific() {
        let mut head = Element::new("head");
        upsert_inline_styles(&mut head, &[InlineStyleItem::new("shared", "a{}", Position::End)]);
        upsert_styles(&mut head, &[StyleItem::new("shared", "/s.css", Position::End)]);

        // A stylesheet link never evicts a <style> with the same id.
        let tags: Vec<_> = head.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["style", "link"]);
    }

    #[test]
    fn test_annotations_written() {
        let mut head = Element::new("head");
        upsert_styles(&mut head, &[StyleItem::new("s1", "s1.css", Position::Beginning).with_order(1)]);

        let link = head.child("link").unwrap();
        assert_eq!(
            link.attrs.names(),
            vec!["rel", "href", "id", "data-order", "data-position"]
        );
        assert_eq!(link.get_attr("data-order"), Some("1"));
        assert_eq!(link.get_attr("data-position"), Some("beginning"));
    }

    #[test]
    fn test_script_optional_attributes_order() {
        let mut body = Element::new("body");
        let script = ScriptItem {
            kind: Some("module".into()),
            is_async: true,
            defer: true,
            cross_origin: Some("anonymous".into()),
            integrity: Some("sha384-abc".into()),
            nonce: Some("n0nce".into()),
            ..ScriptItem::new("app", "/app.js", Position::End)
        };

        upsert_scripts(&mut body, &[script]);

        let elem = body.child("script").unwrap();
        assert_eq!(
            elem.attrs.names(),
            vec![
                "id",
                "src",
                "data-order",
                "data-position",
                "type",
                "async",
                "defer",
                "crossorigin",
                "integrity",
                "nonce",
            ]
        );
        assert_eq!(elem.get_attr("async"), Some("true"));
        assert_eq!(elem.get_attr("defer"), Some("true"));
    }

    #[test]
    fn test_false_flags_omitted() {
        let mut body = Element::new("body");
        upsert_scripts(&mut body, &[ScriptItem::new("a", "/a.js", Position::End)]);

        let elem = body.child("script").unwrap();
        assert!(!elem.has_attr("async"));
        assert!(!elem.has_attr("defer"));
        assert!(!elem.has_attr("type"));
    }

    #[test]
    fn test_inline_content() {
        let mut head = Element::new("head");
        upsert_inline_scripts(
            &mut head,
            &[InlineScriptItem::new("boot", "window.boot = 1;", Position::End)],
        );
        upsert_inline_styles(
            &mut head,
            &[InlineStyleItem::new("crit", "body{margin:0}", Position::Beginning)],
        );

        assert_eq!(head.children.len(), 2);
        let Node::Element(style) = &head.children[0] else {
            panic!("expected style");
        };
        assert_eq!(style.tag, "style");
        assert_eq!(style.text(), "body{margin:0}");
        assert_eq!(head.child("script").unwrap().text(), "window.boot = 1;");
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut head = Element::new("head");
        head.push(Element::new("title"));
        let before = head.clone();

        upsert_scripts(&mut head, &[]);

        assert_eq!(head, before);
    }
}
