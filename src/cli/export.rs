//! `export` command: write an artifact as SVG or a raster image.

use std::path::Path;

use anyhow::{Result, bail};
use svgstream::config::{ConfigDiagnostics, ConfigError, ExportConfig, SvgStreamConfig};
use svgstream::image::{ExportFormat, ExportOptions, export, export_to_dir};
use svgstream::stream::StreamError;
use svgstream::svg::{extract_svg, measure};
use svgstream::{debug, debug_do, log};

use super::ExportArgs;
use super::common::{is_stdio, read_input, write_output};

pub fn run(args: &ExportArgs, config: &SvgStreamConfig) -> Result<()> {
    let options = options(args, &config.export)?;

    let text = read_input(Some(&args.input))?;
    let extraction = extract_svg(&text);
    if !extraction.is_found() {
        return Err(StreamError::NoSvgContent.into());
    }
    let svg = extraction.content;

    debug_do! {
        let size = measure(&svg);
        debug!("export"; "{}x{} at {}x → {:?}", size.width, size.height, options.scale, options.format);
    }

    if let Some(dir) = &args.out_dir {
        let result = export_to_dir(&svg, dir, &options)?;
        if result.created {
            log!("export"; "wrote {}", result.path.display());
        } else {
            log!("export"; "unchanged {}", result.path.display());
        }
        return Ok(());
    }

    let output = args.output.as_deref();
    if options.format.needs_rasterization() && is_stdio(output) {
        bail!("refusing to write {} data to stdout; use --output or --out-dir", options.format.extension());
    }

    let data = export(&svg, &options)?;
    write_output(output, &data)?;
    if let Some(path) = output.filter(|p| !is_stdio(Some(p))) {
        log!("export"; "wrote {}", path.display());
    }
    Ok(())
}

/// Config values overridden by flags; the format falls back to the
/// `--output` extension before the config.
fn options(args: &ExportArgs, config: &ExportConfig) -> Result<ExportOptions> {
    let mut merged = config.clone();

    let inferred = args
        .output
        .as_deref()
        .and_then(Path::extension)
        .and_then(|ext| ExportFormat::from_extension(&ext.to_string_lossy()));
    SvgStreamConfig::update_option(&mut merged.format, args.format.as_ref().or(inferred.as_ref()));
    SvgStreamConfig::update_option(&mut merged.scale, args.scale.as_ref());
    SvgStreamConfig::update_option(&mut merged.quality, args.quality.as_ref());

    let mut diag = ConfigDiagnostics::new();
    merged.validate(&mut diag);
    diag.into_result().map_err(ConfigError::Validation)?;

    Ok(merged.to_options())
}
