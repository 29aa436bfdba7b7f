//! Declarative template options.
//!
//! Keys are camelCase (`headStyles`, `crossOrigin`) in both JSON params and
//! the `[template]` config section.

use serde::{Deserialize, Serialize};

use super::order::{Position, SortKey};
use crate::dom::Attrs;

/// Default `rel` of a favicon link.
pub const DEFAULT_FAVICON_REL: &str = "icon";

// ============================================================================
// Items
// ============================================================================

/// Favicon link, keyed by `rel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaviconItem {
    pub href: String,
    /// Defaults to `icon`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// Extra attributes, emitted after `rel` and `href` in the given order.
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attributes: Attrs,
}

impl FaviconItem {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: None,
            attributes: Attrs::new(),
        }
    }

    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn rel(&self) -> &str {
        self.rel.as_deref().unwrap_or(DEFAULT_FAVICON_REL)
    }
}

/// External stylesheet (`<link rel="stylesheet">`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleItem {
    pub id: String,
    pub href: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Inline `<style>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyleItem {
    pub id: String,
    pub content: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// External `<script src>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptItem {
    pub id: String,
    pub src: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default)]
    pub defer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl ScriptItem {
    pub fn new(id: impl Into<String>, src: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            position,
            order: None,
            kind: None,
            is_async: false,
            defer: false,
            cross_origin: None,
            integrity: None,
            nonce: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Inline `<script>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineScriptItem {
    pub id: String,
    pub content: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

macro_rules! positioned {
    ($($item:ty),* $(,)?) => {$(
        impl $item {
            /// Sort key with the order defaulted to 0.
            #[inline]
            pub fn sort_key(&self) -> SortKey {
                SortKey::new(self.position, self.order.unwrap_or(0))
            }
        }
    )*};
}

positioned!(StyleItem, InlineStyleItem, ScriptItem, InlineScriptItem);

impl StyleItem {
    pub fn new(id: impl Into<String>, href: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            position,
            order: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

impl InlineStyleItem {
    pub fn new(id: impl Into<String>, content: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            position,
            order: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

impl InlineScriptItem {
    pub fn new(id: impl Into<String>, content: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            position,
            order: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

// ============================================================================
// TemplateOptions
// ============================================================================

/// Everything to inject into one page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<FaviconItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head_meta_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head_styles: Vec<StyleItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head_inline_styles: Vec<InlineStyleItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head_scripts: Vec<ScriptItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head_inline_scripts: Vec<InlineScriptItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_scripts: Vec<ScriptItem>,
}

impl TemplateOptions {
    /// Parse options from a JSON object (loader template params).
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// True when applying these options would not touch the document.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Scalars present in `other` replace ours; lists replace ours when
    /// `other`'s list is non-empty.
    pub fn merge(mut self, other: Self) -> Self {
        fn overlay<T>(base: &mut Vec<T>, top: Vec<T>) {
            if !top.is_empty() {
                *base = top;
            }
        }

        if other.title.is_some() {
            self.title = other.title;
        }
        if other.favicon.is_some() {
            self.favicon = other.favicon;
        }
        overlay(&mut self.head_meta_tags, other.head_meta_tags);
        overlay(&mut self.head_styles, other.head_styles);
        overlay(&mut self.head_inline_styles, other.head_inline_styles);
        overlay(&mut self.head_scripts, other.head_scripts);
        overlay(&mut self.head_inline_scripts, other.head_inline_scripts);
        overlay(&mut self.body_scripts, other.body_scripts);
        self
    }
}
