//! Raw head tags, deduplicated by `<meta name>`.

use crate::debug;
use crate::dom::{Element, parse_element};

/// Insert raw tags at the very beginning of head, in input order.
///
/// Only `<meta>` tags with a `name` attribute replace existing head `<meta>`
/// tags with the same name. Anything else (`<meta charset>`, `<link>`, ...)
/// is inserted as-is and may accumulate over repeated calls. Markup that
/// parses to no element is skipped.
pub fn upsert_meta_tags<S: AsRef<str>>(head: &mut Element, tags: &[S]) {
    let parsed: Vec<Element> = tags
        .iter()
        .filter_map(|tag| {
            let markup = tag.as_ref();
            let elem = parse_element(markup);
            if elem.is_none() {
                debug!("meta"; "skipping markup without an element: {:?}", markup);
            }
            elem
        })
        .collect();

    for elem in &parsed {
        if !elem.is("meta") {
            continue;
        }
        let Some(name) = elem.get_attr("name") else {
            continue;
        };
        head.remove_children_where(|e| e.is("meta") && e.attr_is("name", name));
    }

    for elem in parsed.into_iter().rev() {
        head.prepend(elem);
    }
}
