//! `<title>` singleton.

use crate::dom::Element;

/// Set the document title.
///
/// Rewrites the text of the first `<title>` child of head in place, or
/// creates one as the very first child of head.
pub fn upsert_title(head: &mut Element, title: &str) {
    if let Some(existing) = head.child_mut("title") {
        existing.set_text(title);
        return;
    }

    let mut elem = Element::new("title");
    elem.set_text(title);
    head.prepend(elem);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attrs, Node};

    #[test]
    fn test_creates_title_first() {
        let mut head = Element::new("head");
        head.push(Element::with_attrs("meta", Attrs::from([("charset", "utf-8")])));

        upsert_title(&mut head, "Hello");

        assert!(head.children[0].is_element("title"));
        assert_eq!(head.child("title").unwrap().text(), "Hello");
        assert_eq!(head.children.len(), 2);
    }

    #[test]
    fn test_replaces_existing_in_place() {
        let mut head = Element::new("head");
        head.push(Element::with_attrs("meta", Attrs::from([("charset", "utf-8")])));
        let mut old = Element::with_attrs("title", Attrs::from([("data-x", "kept")]));
        old.set_text("Old");
        head.push(old);

        upsert_title(&mut head, "New");

        // Element identity (position + attributes) survives, content is replaced.
        let Node::Element(title) = &head.children[1] else {
            panic!("expected title element");
        };
        assert_eq!(title.tag, "title");
        assert_eq!(title.get_attr("data-x"), Some("kept"));
        assert_eq!(title.children, vec![Node::Text("New".into())]);
    }

    #[test]
    fn test_repeated_calls_leave_one_title() {
        let mut head = Element::new("head");

        upsert_title(&mut head, "One");
        upsert_title(&mut head, "Two");
        upsert_title(&mut head, "Three");

        let titles: Vec<_> = head.child_elements().filter(|e| e.tag == "title").collect();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text(), "Three");
    }
}
