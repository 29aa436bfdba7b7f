//! Favicon `<link>`, keyed by `rel`.

use crate::dom::Element;
use crate::template::options::FaviconItem;

/// Replace the favicon link with the same `rel`, appending the new one at
/// the end of head. Links with other `rel` values are left alone.
pub fn upsert_favicon(head: &mut Element, favicon: &FaviconItem) {
    let rel = favicon.rel();
    head.remove_children_where(|e| e.is("link") && e.attr_is("rel", rel));

    let mut link = Element::new("link");
    link.set_attr("rel", rel);
    link.set_attr("href", favicon.href.as_str());
    for attr in favicon.attributes.iter() {
        link.set_attr(attr.name.as_str(), attr.value.as_str());
    }
    head.push(link);
}
