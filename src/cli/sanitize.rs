//! `sanitize` command: print a renderable snapshot of a partial buffer.

use anyhow::{Context, Result};
use svgstream::config::SvgStreamConfig;
use svgstream::svg::{SanitizeOptions, StreamSanitizer, ViewBox};
use svgstream::{debug, log};

use super::SanitizeArgs;
use super::common::{input_label, read_input, write_output};

pub fn run(args: &SanitizeArgs, config: &SvgStreamConfig) -> Result<()> {
    let options = options(args, config)?;
    let buffer = read_input(args.input.as_deref())?;

    debug!("sanitize"; "{} ({} bytes)", input_label(args.input.as_deref()), buffer.len());

    let snapshot = StreamSanitizer::new(options).sanitize(&buffer);
    if snapshot.is_empty() {
        log!("sanitize"; "nothing renderable yet");
        return Ok(());
    }

    write_output(None, snapshot.as_bytes())
}

/// Config options with CLI overrides applied.
fn options(args: &SanitizeArgs, config: &SvgStreamConfig) -> Result<SanitizeOptions> {
    let mut options = config.sanitize.to_options();

    if let Some(raw) = &args.default_viewbox {
        options.default_viewbox = raw
            .parse::<ViewBox>()
            .context("invalid --default-viewbox")?;
    }
    if args.no_check {
        options.check = false;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SanitizeArgs {
        SanitizeArgs {
            input: None,
            default_viewbox: None,
            no_check: false,
        }
    }

    #[test]
    fn test_options_from_config() {
        let options = options(&args(), &SvgStreamConfig::default()).unwrap();
        assert_eq!(options, SanitizeOptions::default());
    }

    #[test]
    fn test_cli_overrides() {
        let args = SanitizeArgs {
            default_viewbox: Some("0 0 24 24".into()),
            no_check: true,
            ..args()
        };
        let options = options(&args, &SvgStreamConfig::default()).unwrap();
        assert_eq!(options.default_viewbox, ViewBox::new(0.0, 0.0, 24.0, 24.0));
        assert!(!options.check);
    }

    #[test]
    fn test_invalid_viewbox_override() {
        let args = SanitizeArgs {
            default_viewbox: Some("huge".into()),
            ..args()
        };
        assert!(options(&args, &SvgStreamConfig::default()).is_err());
    }
}
