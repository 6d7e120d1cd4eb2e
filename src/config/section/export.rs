//! `[export]` section configuration.
//!
//! ```toml
//! [export]
//! format = "png"   # svg | png | jpg | webp
//! scale = 4.0      # pixel density multiplier for raster formats
//! quality = 90     # JPEG quality (0-100)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::{ExportFormat, ExportOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub scale: f64,
    pub quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            format: options.format,
            scale: options.scale,
            quality: options.quality,
        }
    }
}

impl ExportConfig {
    pub(crate) const SCALE: FieldPath = FieldPath::new("export.scale");
    pub(crate) const QUALITY: FieldPath = FieldPath::new("export.quality");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            diag.error(Self::SCALE, format!("must be a positive number, got {}", self.scale));
        }
        if self.quality > 100 {
            diag.error_with_hint(
                Self::QUALITY,
                format!("must be at most 100, got {}", self.quality),
                "JPEG quality ranges from 0 to 100",
            );
        }
    }

    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.format,
            scale: self.scale,
            quality: self.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.export.to_options(), ExportOptions::default());
    }

    #[test]
    fn test_format_parsing() {
        let cases = [
            ("svg", ExportFormat::Svg),
            ("png", ExportFormat::Png),
            ("jpg", ExportFormat::Jpg),
            ("webp", ExportFormat::Webp),
        ];
        for (input, expected) in cases {
            let config = test_parse_config(&format!("[export]\nformat = \"{input}\""));
            assert_eq!(config.export.format, expected, "failed for {input}");
        }
    }

    #[test]
    fn test_invalid_values() {
        let config = test_parse_config("[export]\nscale = 0.0\nquality = 150");
        let mut diag = ConfigDiagnostics::new();
        config.export.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["export.scale", "export.quality"]);
    }
}
