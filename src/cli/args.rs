//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;
use svgstream::image::ExportFormat;

/// Repair and extract SVG documents from streaming model output
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: svgstream.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print a renderable snapshot of a partial buffer
    #[command(visible_alias = "s")]
    Sanitize {
        #[command(flatten)]
        args: SanitizeArgs,
    },

    /// Extract the SVG document from completed model output
    #[command(visible_alias = "x")]
    Extract {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Feed a recorded stream through a generation session
    #[command(visible_alias = "r")]
    Replay {
        #[command(flatten)]
        args: ReplayArgs,
    },

    /// Export an extracted SVG as svg, png, jpg or webp
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        args: ExportArgs,
    },
}

/// Sanitize command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SanitizeArgs {
    /// Buffer to repair; `-` or omitted reads stdin
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// viewBox used when the document has none
    #[arg(long)]
    pub default_viewbox: Option<String>,

    /// Skip the structural check and always repair
    #[arg(long)]
    pub no_check: bool,
}

/// Extract command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Files to extract from; `-` or omitted reads stdin
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Write `<input-stem>.svg` files here instead of printing
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,
}

/// Replay command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Recorded transcript; `-` reads stdin
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Treat the input as an SSE transcript of `data:` lines
    #[arg(long)]
    pub sse: bool,

    /// Characters per chunk when replaying raw text
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Print every snapshot to stdout
    #[arg(long)]
    pub snapshots: bool,

    /// Write the final artifact here instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Export command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Extracted SVG or raw model output; `-` reads stdin
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Pixel density multiplier for raster formats
    #[arg(short, long)]
    pub scale: Option<f64>,

    /// JPEG quality (0-100)
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Output file
    #[arg(short, long, conflicts_with = "out_dir", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Write `svg-<hash>.<ext>` into this directory
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,
}
