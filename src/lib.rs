//! Idempotent HTML template injection.
//!
//! Upserts a title, favicon, meta tags, stylesheets, inline styles and
//! scripts into an HTML document, then regroups every positioned node by
//! `beginning`/`end` and numeric order before serializing.
//!
//! ```
//! use html_upsert::template::{Position, ScriptItem, Template};
//!
//! let html = Template::parse("<html><head></head><body></body></html>")?
//!     .upsert_title("Home")
//!     .upsert_body_scripts(&[ScriptItem::new("app", "/app.js", Position::End)])
//!     .serialize()?;
//!
//! assert_eq!(
//!     html,
//!     r#"<html><head><title>Home</title></head><body><script id="app" src="/app.js"></script></body></html>"#
//! );
//! # Ok::<(), html_upsert::TemplateError>(())
//! ```
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `dom`      | Owned HTML tree, html5ever parse/serialize        |
//! | `template` | Upsert primitives, sort pass, `Template` facade  |
//! | `loader`   | Bundler chain gating                             |
//! | `config`   | `html-upsert.toml` + JSON params                 |
//! | `logger`   | `log!`/`debug!` and progress line                |

pub mod config;
pub mod dom;
pub mod error;
pub mod loader;
pub mod logger;
pub mod template;

pub use error::TemplateError;
pub use template::{Template, TemplateOptions, parse_template, render_template};
