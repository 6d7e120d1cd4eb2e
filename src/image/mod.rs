//! Artifact export.
//!
//! Writes an extracted SVG either as-is or rasterized.
//!
//! # Modules
//!
//! - [`convert`]: SVG → PNG/JPG/WebP (usvg + resvg + image)
//!
//! ```text
//! artifact ──► measure ──► convert ──► svg-<hash>.<ext>
//! ```

mod convert;

pub use convert::convert_svg;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output format for exported artifacts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Keep as SVG (no rasterization).
    #[default]
    Svg,
    /// PNG format.
    Png,
    /// JPEG format.
    Jpg,
    /// WebP format.
    Webp,
}

impl ExportFormat {
    /// Get file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// Format for a file extension (case-insensitive; `jpeg` accepted).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Check if this format requires rasterization.
    pub fn needs_rasterization(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

/// Options for [`export`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Pixel density multiplier applied to the measured size.
    pub scale: f64,
    /// Quality for lossy formats (0-100).
    pub quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            scale: 4.0,
            quality: 90,
        }
    }
}

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to parse SVG")]
    Parse(#[from] usvg::Error),

    #[error("invalid output size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("failed to encode image")]
    Encode(#[from] ::image::ImageError),

    #[error("failed to write `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Result of [`export_to_dir`].
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub path: PathBuf,
    /// False when a file with the same content hash already existed.
    pub created: bool,
}

/// Convert `svg` per `options`.
pub fn export(svg: &str, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    convert_svg(svg, options)
}

/// Convert and write into `dir` as `svg-<hash>.<ext>`; skips existing files.
pub fn export_to_dir(
    svg: &str,
    dir: &Path,
    options: &ExportOptions,
) -> Result<ExportResult, ExportError> {
    let data = export(svg, options)?;
    let path = dir.join(format!(
        "svg-{}.{}",
        filename_hash(&data),
        options.format.extension()
    ));

    if path.exists() {
        return Ok(ExportResult {
            path,
            created: false,
        });
    }

    fs::create_dir_all(dir).map_err(|err| ExportError::Io(dir.to_path_buf(), err))?;
    fs::write(&path, &data).map_err(|err| ExportError::Io(path.clone(), err))?;

    Ok(ExportResult {
        path,
        created: true,
    })
}

/// Compute blake3 hash for filename (12 hex chars).
///
/// Content changes → filename changes.
pub fn filename_hash(content: &[u8]) -> String {
    let hash = blake3::hash(content);
    hash.to_hex()[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2 2"><rect width="2" height="2"/></svg>"#;

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Svg.extension(), "svg");
        assert_eq!(ExportFormat::Webp.extension(), "webp");
        assert!(!ExportFormat::Svg.needs_rasterization());
        assert!(ExportFormat::Jpg.needs_rasterization());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("JPEG"), Some(ExportFormat::Jpg));
        assert_eq!(ExportFormat::from_extension("webp"), Some(ExportFormat::Webp));
        assert_eq!(ExportFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_filename_hash_stable() {
        let a = filename_hash(b"<svg/>");
        assert_eq!(a.len(), 12);
        assert_eq!(a, filename_hash(b"<svg/>"));
        assert_ne!(a, filename_hash(b"<svg></svg>"));
    }

    #[test]
    fn test_export_to_dir_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        let options = ExportOptions {
            format: ExportFormat::Svg,
            ..ExportOptions::default()
        };

        let first = export_to_dir(SVG, dir.path(), &options).unwrap();
        assert!(first.created);
        assert_eq!(fs::read_to_string(&first.path).unwrap(), SVG);
        assert!(
            first
                .path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("svg-")
        );

        let second = export_to_dir(SVG, dir.path(), &options).unwrap();
        assert!(!second.created);
        assert_eq!(first.path, second.path);
    }

    #[test]
    fn test_export_png_to_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out");
        let result = export_to_dir(SVG, &nested, &ExportOptions::default()).unwrap();
        assert_eq!(result.path.extension().unwrap(), "png");
        assert!(result.path.starts_with(&nested));
    }
}
