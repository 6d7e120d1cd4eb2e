//! Streaming SVG repair and extraction.
//!
//! # Modules
//!
//! - [`sanitize`]: partial buffer → renderable snapshot (live preview)
//! - [`extract`]: completed text → clean `<svg>...</svg>` artifact
//! - [`viewbox`]: `viewBox` normalization
//! - [`check`]: structural XML validity check behind a trait
//! - [`measure`]: intrinsic size for export
//!
//! # Flow
//!
//! ```text
//! chunk ──► buffer ──► sanitize_stream ──► snapshot (every chunk)
//!                │
//!                └── on completion ──► extract ──► artifact
//! ```
//!
//! Both entry points are total over `&str`: malformed input is repaired,
//! never reported as an error.

mod attr;
pub mod check;
mod escape;
pub mod extract;
pub mod measure;
pub mod sanitize;
pub mod viewbox;

pub use check::{QuickXmlCheck, XmlCheck};
pub use extract::{ExtractKind, Extraction, extract, extract_svg};
pub use measure::{Dimensions, FALLBACK_DIMENSIONS, measure};
pub use sanitize::{SanitizeOptions, StreamSanitizer, sanitize_stream};
pub use viewbox::{DEFAULT_VIEWBOX, ParseViewBoxError, ViewBox, normalize_viewbox};

/// Namespace written on synthesized or repaired root elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
