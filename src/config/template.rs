//! `[template]` section validation.
//!
//! The section itself is [`TemplateOptions`]; this only checks the values
//! that would silently produce broken markup.

use std::collections::HashSet;

use super::{ConfigDiagnostics, FieldPath};
use crate::template::TemplateOptions;

const FAVICON: FieldPath = FieldPath::new("template.favicon");
const META_TAGS: FieldPath = FieldPath::new("template.headMetaTags");
const HEAD_STYLES: FieldPath = FieldPath::new("template.headStyles");
const HEAD_INLINE_STYLES: FieldPath = FieldPath::new("template.headInlineStyles");
const HEAD_SCRIPTS: FieldPath = FieldPath::new("template.headScripts");
const HEAD_INLINE_SCRIPTS: FieldPath = FieldPath::new("template.headInlineScripts");
const BODY_SCRIPTS: FieldPath = FieldPath::new("template.bodyScripts");

/// Inline kinds carry content instead of a url attribute.
const NO_URL: Option<(&str, &str)> = None;

pub fn validate_template(options: &TemplateOptions, diag: &mut ConfigDiagnostics) {
    if let Some(favicon) = &options.favicon
        && favicon.href.trim().is_empty()
    {
        diag.error(FAVICON.join("href"), "favicon href is empty");
    }

    for (i, tag) in options.head_meta_tags.iter().enumerate() {
        if tag.trim().is_empty() {
            diag.warn(META_TAGS.item(i, "markup"), "empty markup is skipped");
        }
    }

    check_list(
        &HEAD_STYLES,
        options.head_styles.iter().map(|s| (s.id.as_str(), Some(("href", s.href.as_str())))),
        diag,
    );
    check_list(
        &HEAD_INLINE_STYLES,
        options.head_inline_styles.iter().map(|s| (s.id.as_str(), NO_URL)),
        diag,
    );
    check_list(
        &HEAD_SCRIPTS,
        options.head_scripts.iter().map(|s| (s.id.as_str(), Some(("src", s.src.as_str())))),
        diag,
    );
    check_list(
        &HEAD_INLINE_SCRIPTS,
        options.head_inline_scripts.iter().map(|s| (s.id.as_str(), NO_URL)),
        diag,
    );
    check_list(
        &BODY_SCRIPTS,
        options.body_scripts.iter().map(|s| (s.id.as_str(), Some(("src", s.src.as_str())))),
        diag,
    );
}

/// Ids must be non-empty and unique within one list; the url attribute,
/// when the kind has one, must be non-empty.
fn check_list<'a>(
    list: &FieldPath,
    items: impl Iterator<Item = (&'a str, Option<(&'static str, &'a str)>)>,
    diag: &mut ConfigDiagnostics,
) {
    let mut seen = HashSet::new();
    for (i, (id, url)) in items.enumerate() {
        if id.trim().is_empty() {
            diag.error_with_hint(
                list.item(i, "id"),
                "id is empty",
                "ids identify nodes across renders; pick a stable name",
            );
        } else if !seen.insert(id) {
            diag.error(
                list.item(i, "id"),
                format!("duplicate id `{id}`, both items would be inserted"),
            );
        }

        if let Some((field, value)) = url
            && value.trim().is_empty()
        {
            diag.error(list.item(i, field), format!("{field} is empty"));
        }
    }
}
