//! Configuration section definitions.
//!
//! Each module corresponds to a section in `svgstream.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `sanitize` | `[sanitize]`   | Snapshot repair (viewBox, check)     |
//! | `replay`   | `[replay]`     | Recorded stream playback             |
//! | `export`   | `[export]`     | Artifact format, scale, quality      |

mod export;
mod replay;
mod sanitize;

pub use export::ExportConfig;
pub use replay::ReplayConfig;
pub use sanitize::SanitizeConfig;
