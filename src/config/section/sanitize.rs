//! `[sanitize]` section configuration.
//!
//! ```toml
//! [sanitize]
//! default_viewbox = "0 0 800 600"
//! check = true
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::svg::{DEFAULT_VIEWBOX, SanitizeOptions, ViewBox};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// viewBox written when a document has none, as four numbers.
    pub default_viewbox: String,

    /// Return structurally valid buffers unchanged.
    pub check: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            default_viewbox: DEFAULT_VIEWBOX.to_string(),
            check: true,
        }
    }
}

impl SanitizeConfig {
    pub(crate) const DEFAULT_VIEWBOX: FieldPath = FieldPath::new("sanitize.default_viewbox");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(err) = self.default_viewbox.parse::<ViewBox>() {
            diag.error_with_hint(
                Self::DEFAULT_VIEWBOX,
                err.to_string(),
                format!("use four numbers, e.g. {} = \"{DEFAULT_VIEWBOX}\"", Self::DEFAULT_VIEWBOX),
            );
        }
    }

    /// Sanitizer options; an unparseable viewBox falls back to the default.
    pub fn to_options(&self) -> SanitizeOptions {
        SanitizeOptions {
            default_viewbox: self.default_viewbox.parse().unwrap_or(DEFAULT_VIEWBOX),
            check: self.check,
        }
    }
}
