//! svgstream - repair and extract SVG documents from streaming model output.
//!
//! ```text
//! svg/      sanitizer, extractor, viewBox, structural check, measure
//! stream/   SSE decoding and generation sessions
//! image/    export to svg/png/jpg/webp
//! config/   svgstream.toml
//! logger    log!/debug! macros, progress line
//! ```

pub mod config;
pub mod image;
pub mod logger;
pub mod stream;
pub mod svg;

pub use self::image::{ExportFormat, ExportOptions, export};
pub use stream::{GenerationSession, SseDecoder, StreamError};
pub use svg::{
    ExtractKind, Extraction, QuickXmlCheck, StreamSanitizer, ViewBox, XmlCheck, extract,
    extract_svg, measure, normalize_viewbox, sanitize_stream,
};
