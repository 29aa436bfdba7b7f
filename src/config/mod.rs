//! Configuration for `html-upsert.toml`.
//!
//! ```text
//! config/
//! ├── types/         # ConfigError, diagnostics, field paths
//! ├── loader.rs      # [loader]
//! ├── template.rs    # [template] validation
//! ├── util.rs        # config file lookup
//! └── mod.rs         # UpsertConfig (this file)
//! ```
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[loader]`   | Chain gating: `force`, `test`, `chain`            |
//! | `[template]` | Default template options (camelCase keys)         |
//!
//! Template params given as JSON are merged over `[template]`.

mod loader;
mod template;
pub mod types;
mod util;

pub use loader::LoaderSection;
pub use template::validate_template;
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::template::TemplateOptions;
use crate::{debug, log};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = "html-upsert.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `html-upsert.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub loader: LoaderSection,

    #[serde(default)]
    pub template: TemplateOptions,
}

impl UpsertConfig {
    /// Load configuration for a run.
    ///
    /// `config` is searched upward from `cwd`; a missing file yields the
    /// defaults. `params` (JSON) is merged over `[template]`. The result is
    /// validated before it is returned.
    pub fn load(config: &Path, cwd: &Path, params: Option<&Path>) -> Result<Self, ConfigError> {
        let mut loaded = match find_config_file(config, cwd) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut loaded = Self::from_path(&path)?;
                loaded.config_path = Some(path);
                loaded
            }
            None => {
                debug!("config"; "no {} found, using defaults", config.display());
                Self::default()
            }
        };

        if let Some(params) = params {
            loaded.merge_params(params)?;
        }

        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Overlay JSON template params on `[template]`.
    pub fn merge_params(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let params = TemplateOptions::from_json(&content)
            .map_err(|err| ConfigError::Json(path.to_path_buf(), err))?;

        self.template = std::mem::take(&mut self.template).merge(params);
        Ok(())
    }

    /// Validate every section, printing warnings and failing on errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.loader.validate(&mut diag);
        validate_template(&self.template, &mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Directory containing the config file, if any.
    pub fn root(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }
}

#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> UpsertConfig {
    UpsertConfig::from_str(content).unwrap()
}
