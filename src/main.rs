//! svgstream - repair and extract SVG documents from streaming model output.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use svgstream::config::SvgStreamConfig;
use svgstream::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    svgstream::logger::set_verbose(cli.verbose);

    let cwd = std::env::current_dir().context("failed to get current working directory")?;
    let config = SvgStreamConfig::load(cli.config.as_deref(), &cwd)?;
    if !config.config_path.as_os_str().is_empty() {
        debug!("config"; "loaded {}", config.config_path.display());
    }

    match &cli.command {
        Commands::Sanitize { args } => cli::sanitize::run(args, &config),
        Commands::Extract { args } => cli::extract::run(args),
        Commands::Replay { args } => cli::replay::run(args, &config),
        Commands::Export { args } => cli::export::run(args, &config),
    }
}
