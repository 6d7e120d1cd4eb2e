//! Configuration for `svgstream.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/     # [sanitize] [replay] [export]
//! ├── error        # ConfigError, diagnostics
//! ├── field        # FieldPath
//! ├── util         # config file lookup
//! └── mod.rs       # SvgStreamConfig (this file)
//! ```
//!
//! Every section is optional; a missing file means all defaults.

mod error;
mod field;
pub mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use section::{ExportConfig, ReplayConfig, SanitizeConfig};
pub use util::find_config_file;

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, looked up from the working directory upward.
pub const CONFIG_FILE: &str = "svgstream.toml";

/// Root configuration structure representing `svgstream.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SvgStreamConfig {
    /// Path of the loaded file; empty when running on defaults.
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub sanitize: SanitizeConfig,

    #[serde(default)]
    pub replay: ReplayConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl SvgStreamConfig {
    /// Load configuration.
    ///
    /// `explicit` must exist. Otherwise [`CONFIG_FILE`] is searched upward
    /// from `cwd`, and defaults are used when nothing is found.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Some(path)
            }
            None => find_config_file(cwd, Path::new(CONFIG_FILE)),
        };

        let config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path; unknown keys are reported and skipped.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = path.to_path_buf();
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
        log!("config"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Validate all sections, collecting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.sanitize.validate(&mut diag);
        self.replay.validate(&mut diag);
        self.export.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Validation)
    }

    /// Update config option if CLI value is provided.
    pub fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SvgStreamConfig {
    let (parsed, ignored) = SvgStreamConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
