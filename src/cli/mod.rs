//! Command-line interface module.
//!
//! | Command    | Handler                 |
//! |------------|-------------------------|
//! | `sanitize` | [`sanitize::run`]       |
//! | `extract`  | [`extract::run`]        |
//! | `replay`   | [`replay::run`]         |
//! | `export`   | [`export::run`]         |

mod args;
pub mod common;
pub mod export;
pub mod extract;
pub mod replay;
pub mod sanitize;

pub use args::{Cli, Commands, ExportArgs, ExtractArgs, ReplayArgs, SanitizeArgs};
