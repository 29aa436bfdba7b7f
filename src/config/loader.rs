//! `[loader]` section configuration.
//!
//! ```toml
//! [loader]
//! force = false               # Render even when other loaders are chained
//! test = '\.html$'            # Resource path pattern
//! chain = ["posthtml"]        # Loaders running before this one
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ConfigDiagnostics, ConfigError, FieldPath};
use crate::loader::{DEFAULT_TEST, LoaderOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSection {
    pub force: bool,
    /// Regex over the resource path. Defaults to `\.html$`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    /// Other loaders the bundler runs on the same resources.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
}

impl LoaderSection {
    pub const FORCE: FieldPath = FieldPath::new("loader.force");
    pub const TEST: FieldPath = FieldPath::new("loader.test");
    pub const CHAIN: FieldPath = FieldPath::new("loader.chain");

    /// Compile into runtime options.
    pub fn options(&self) -> Result<LoaderOptions, ConfigError> {
        let test = self
            .test
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| ConfigError::Pattern(pattern.to_string(), err))
            })
            .transpose()?;

        Ok(LoaderOptions {
            force: self.force,
            test,
        })
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(pattern) = &self.test
            && let Err(err) = Regex::new(pattern)
        {
            diag.error_with_hint(
                Self::TEST,
                format!("invalid pattern: {err}"),
                format!("the default is '{DEFAULT_TEST}'"),
            );
        }

        for (i, name) in self.chain.iter().enumerate() {
            if name.trim().is_empty() {
                diag.error(Self::CHAIN.item(i, "name"), "loader name is empty");
            }
        }

        if !self.force && !self.chain.is_empty() {
            diag.warn(
                Self::FORCE,
                "other loaders are chained, every resource will pass through unless `force = true`",
            );
        }
    }
}
