//! Errors from loading `svgstream.toml`.
//!
//! Validation never stops at the first problem: each section reports into a
//! shared [`ConfigDiagnostics`], which prints them grouped by section.
//!
//! ```text
//! config validation failed in [replay], [export]:
//!
//! [replay]
//!   chunk_size → must be at least 1
//!
//! [export]
//!   scale → must be a positive number, got -1
//!
//! found 2 errors
//! ```

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a usable [`SvgStreamConfig`](super::SvgStreamConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// `--config` named a file that does not exist.
    #[error("config file `{0}` not found")]
    NotFound(PathBuf),

    #[error("config file is not valid TOML")]
    Toml(#[from] toml::de::Error),

    // No #[from]: a source() would print every diagnostic twice.
    #[error("{0}")]
    Validation(ConfigDiagnostics),
}

/// One rejected setting.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    /// e.g. `export.scale`
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Printed under its section heading, so only the key is shown.
impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {} {} {}",
            self.field.key().cyan(),
            "→".red(),
            self.message
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Problems collected across `[sanitize]`, `[replay]` and `[export]`.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(field, message).with_hint(hint));
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    /// Sections with at least one error, in the order they were reported.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut sections = Vec::new();
        for err in &self.errors {
            let section = err.field.section();
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        sections
    }

    /// `Err(self)` when anything was reported.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = self.sections();
        let headings: Vec<_> = sections.iter().map(|s| format!("[{s}]")).collect();
        write!(
            f,
            "{} {}{}",
            "config validation failed in".red().bold(),
            headings.join(", ").red().bold(),
            ":".red().bold()
        )?;

        for (section, heading) in sections.iter().zip(&headings) {
            write!(f, "\n\n{}", heading.dimmed())?;
            for err in self.errors.iter().filter(|e| e.field.section() == *section) {
                write!(f, "\n{err}")?;
            }
        }

        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExportConfig, ReplayConfig, SanitizeConfig};
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("svgstream.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read config `svgstream.toml`");
    }

    #[test]
    fn test_sections_in_report_order() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(ExportConfig::SCALE, "must be positive");
        diag.error(ReplayConfig::CHUNK_SIZE, "must be at least 1");
        diag.error(ExportConfig::QUALITY, "must be at most 100");
        assert_eq!(diag.sections(), ["export", "replay"]);
    }

    #[test]
    fn test_display_groups_by_section() {
        owo_colors::set_override(false);
        let mut diag = ConfigDiagnostics::new();
        diag.error_with_hint(
            SanitizeConfig::DEFAULT_VIEWBOX,
            "`x` is not a viewBox",
            "use four numbers, e.g. \"0 0 800 600\"",
        );
        diag.error(ExportConfig::SCALE, "must be a positive number, got -1");
        diag.error(ExportConfig::QUALITY, "must be at most 100, got 120");

        let display = ConfigError::Validation(diag).to_string();
        assert!(display.starts_with("config validation failed in [sanitize], [export]:"));
        assert!(display.contains(
            "[sanitize]\n  default_viewbox → `x` is not a viewBox\n    hint: use four numbers"
        ));
        assert!(display.contains(
            "[export]\n  scale → must be a positive number, got -1\n  quality → must be at most 100, got 120"
        ));
        assert!(display.ends_with("found 3 errors"));
    }

    #[test]
    fn test_single_error_has_no_count() {
        owo_colors::set_override(false);
        let mut diag = ConfigDiagnostics::new();
        diag.error(ReplayConfig::CHUNK_SIZE, "must be at least 1");
        let display = diag.to_string();
        assert!(display.ends_with("[replay]\n  chunk_size → must be at least 1"));
        assert!(!display.contains("found"));
    }

    #[test]
    fn test_empty_diagnostics_ok() {
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
