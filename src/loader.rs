//! Bundler-facing entry point.
//!
//! A bundler runs a chain of loaders over each resource. This loader only
//! renders when it is the sole loader in the chain (or `force` is set), when
//! it is the last occurrence of itself, and when the resource path matches
//! the `test` pattern. Otherwise the source passes through unchanged.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::debug;
use crate::error::TemplateError;
use crate::template::{TemplateOptions, render_template};

/// Name under which this loader appears in a chain.
pub const LOADER_NAME: &str = "html-upsert";

/// Resources matched when no `test` pattern is configured.
pub const DEFAULT_TEST: &str = r"\.html$";

/// Where in a loader chain the current invocation sits.
#[derive(Debug, Clone)]
pub struct LoaderContext {
    pub resource_path: PathBuf,
    /// Names of every loader in the chain, in chain order.
    pub loaders: Vec<String>,
    /// Index of the current invocation in `loaders`.
    pub index: usize,
}

impl LoaderContext {
    /// A chain holding only this loader.
    pub fn standalone(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: resource_path.into(),
            loaders: vec![LOADER_NAME.to_string()],
            index: 0,
        }
    }

    /// This loader at the last position of `chain` followed by itself.
    ///
    /// Useful when a configured chain lists only the foreign loaders.
    pub fn with_chain(resource_path: impl Into<PathBuf>, chain: &[String]) -> Self {
        let mut loaders = chain.to_vec();
        if !loaders.iter().any(|name| name == LOADER_NAME) {
            loaders.push(LOADER_NAME.to_string());
        }
        let index = loaders
            .iter()
            .rposition(|name| name == LOADER_NAME)
            .unwrap_or_default();
        Self {
            resource_path: resource_path.into(),
            loaders,
            index,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Render even when other loaders are in the chain.
    pub force: bool,
    /// Resource path filter. `None` means [`DEFAULT_TEST`].
    pub test: Option<Regex>,
}

impl LoaderOptions {
    pub fn matches(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        match &self.test {
            Some(test) => test.is_match(&path),
            None => path.ends_with(".html"),
        }
    }
}

/// Why a resource passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OtherLoaders,
    NotLastInstance,
    NotHtml,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::OtherLoaders => "other loaders in chain",
            Self::NotLastInstance => "not the last instance",
            Self::NotHtml => "resource does not match test",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderOutcome {
    Rendered(String),
    Skipped(SkipReason),
}

impl LoaderOutcome {
    /// The text handed to the next loader: rendered HTML or the source.
    pub fn into_output(self, source: &str) -> Cow<'_, str> {
        match self {
            Self::Rendered(html) => Cow::Owned(html),
            Self::Skipped(_) => Cow::Borrowed(source),
        }
    }
}

/// Decide whether this invocation should render.
pub fn gate(ctx: &LoaderContext, options: &LoaderOptions) -> Option<SkipReason> {
    let others = ctx.loaders.iter().any(|name| name != LOADER_NAME);
    if others && !options.force {
        return Some(SkipReason::OtherLoaders);
    }

    let last = ctx.loaders.iter().rposition(|name| name == LOADER_NAME);
    if last != Some(ctx.index) {
        return Some(SkipReason::NotLastInstance);
    }

    if !options.matches(&ctx.resource_path) {
        return Some(SkipReason::NotHtml);
    }

    None
}

/// Run the loader over one resource.
pub fn run(
    ctx: &LoaderContext,
    options: &LoaderOptions,
    template: &TemplateOptions,
    source: &str,
) -> Result<LoaderOutcome, TemplateError> {
    if let Some(reason) = gate(ctx, options) {
        debug!("loader"; "skip {}: {}", ctx.resource_path.display(), reason);
        return Ok(LoaderOutcome::Skipped(reason));
    }

    render_template(source, template).map(LoaderOutcome::Rendered)
}
