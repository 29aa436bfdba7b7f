//! Sort-and-strip pass.
//!
//! Each style/script upsert only orders the nodes it inserted itself. When
//! several calls touch the same container their beginning/end groups
//! interleave by call order instead of by `data-order`. This pass regroups
//! every annotated node once, right before serialization, then removes the
//! annotations from the whole tree.
//!
//! Families are sorted independently, in this order:
//!
//! | Container | Family                                   |
//! |-----------|------------------------------------------|
//! | head      | `link[rel=stylesheet]` + `style`         |
//! | head      | `script`                                 |
//! | body      | `script`                                 |
//!
//! Nodes without `id` + `data-order` + `data-position` are never moved.

use crate::dom::{Document, Element, Node};
use crate::template::order::{self, Position, SortKey};

fn is_style(elem: &Element) -> bool {
    elem.is("style") || (elem.is("link") && elem.attr_is("rel", "stylesheet"))
}

fn is_script(elem: &Element) -> bool {
    elem.is("script")
}

/// Reorder annotated nodes in head and body, then strip all annotations.
pub fn sort_document(doc: &mut Document) {
    let head = doc.head_mut();
    sort_family(head, is_style);
    sort_family(head, is_script);

    sort_family(doc.body_mut(), is_script);

    order::strip(doc.root_mut());
}

/// Pull every eligible child of one family out of `container` and put it
/// back: the beginning group at the front, the end group at the back, each
/// in ascending order. Ties keep their relative document order.
fn sort_family(container: &mut Element, family: fn(&Element) -> bool) {
    let key_of = |node: &Node| {
        node.as_element()
            .filter(|elem| family(elem))
            .and_then(SortKey::read)
    };

    if !container.children.iter().any(|node| key_of(node).is_some()) {
        return;
    }

    let mut beginning = Vec::new();
    let mut end = Vec::new();
    let mut rest = Vec::with_capacity(container.children.len());

    for node in std::mem::take(&mut container.children) {
        match key_of(&node) {
            Some(key) if key.position == Position::Beginning => beginning.push((key.order, node)),
            Some(key) => end.push((key.order, node)),
            None => rest.push(node),
        }
    }

    beginning.sort_by_key(|(order, _)| *order);
    end.sort_by_key(|(order, _)| *order);

    container.children = beginning
        .into_iter()
        .map(|(_, node)| node)
        .chain(rest)
        .chain(end.into_iter().map(|(_, node)| node))
        .collect();
}
