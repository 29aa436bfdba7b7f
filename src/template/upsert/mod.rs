//! Upsert primitives, one per content kind.
//!
//! Each takes the target container (head or body) and mutates it in place.
//! They are independent of each other; ordering across calls is reconciled
//! later by [`crate::template::sort`].

mod favicon;
mod meta;
mod ordered;
mod title;

pub use favicon::upsert_favicon;
pub use meta::upsert_meta_tags;
pub use ordered::{
    Positioned, upsert_inline_scripts, upsert_inline_styles, upsert_positioned, upsert_scripts,
    upsert_styles,
};
pub use title::upsert_title;
