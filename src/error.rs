//! Template pipeline errors.

use thiserror::Error;

/// Errors raised while opening, transforming or serializing a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// `<html>`, `<head>` or `<body>` could not be located after parsing.
    #[error("invalid HTML template: missing <{0}> element")]
    MalformedDocument(&'static str),

    #[error("failed to serialize document")]
    Serialize(#[from] std::io::Error),
}
