//! Config field path used in diagnostics.

use crate::logger::paint;
use owo_colors::Style;
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field, e.g. `template.headStyles[2].id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of `field` inside item `index` of the list at `self`.
    pub fn item(&self, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("{}[{index}].{field}", self.0)))
    }

    /// Path of `field` nested under `self`.
    pub fn join(&self, field: &str) -> Self {
        Self(Cow::Owned(format!("{}.{field}", self.0)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", paint(format_args!("`{}`", self.0), Style::new().bright_blue()))
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
