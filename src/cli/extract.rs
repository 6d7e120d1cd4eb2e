//! `extract` command: pull the `<svg>` document out of completed output.
//!
//! Several inputs are processed in parallel; every input is independent.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use svgstream::svg::{Extraction, extract_svg};
use svgstream::{debug, log};

use super::ExtractArgs;
use super::common::{artifact_path, input_label, read_input, write_output};

/// Outcome for one input.
struct Extracted {
    input: Option<PathBuf>,
    result: Result<Extraction>,
}

pub fn run(args: &ExtractArgs) -> Result<()> {
    let inputs: Vec<Option<PathBuf>> = if args.inputs.is_empty() {
        vec![None]
    } else {
        args.inputs.iter().cloned().map(Some).collect()
    };

    let results: Vec<Extracted> = inputs
        .into_par_iter()
        .map(|input| Extracted {
            result: read_input(input.as_deref()).map(|text| extract_svg(&text)),
            input,
        })
        .collect();

    let total = results.len();
    let mut missing = 0;

    for Extracted { input, result } in results {
        let label = input_label(input.as_deref());
        let extraction = match result {
            Ok(extraction) => extraction,
            Err(err) => {
                log!("error"; "{label}: {err:#}");
                missing += 1;
                continue;
            }
        };

        if !extraction.is_found() {
            log!("extract"; "{label}: no SVG content");
            missing += 1;
            continue;
        }

        debug!("extract"; "{label}: {:?}", extraction.kind);
        emit(args.out_dir.as_deref(), input.as_deref(), &extraction)?;
    }

    if missing > 0 {
        bail!("unable to extract valid SVG content from {missing} of {total} input(s)");
    }
    Ok(())
}

fn emit(out_dir: Option<&Path>, input: Option<&Path>, extraction: &Extraction) -> Result<()> {
    match out_dir {
        Some(dir) => {
            let path = artifact_path(dir, input.unwrap_or(Path::new("-")));
            write_output(Some(&path), extraction.content.as_bytes())?;
            log!("extract"; "wrote {}", path.display());
            Ok(())
        }
        None => write_output(None, extraction.content.as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_batch_to_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.md");
        fs::write(&a, "Here: <svg><rect/></svg> done").unwrap();
        fs::write(&b, "```svg\n<svg><circle/></svg>\n```").unwrap();

        let out = dir.path().join("out");
        let args = ExtractArgs {
            inputs: vec![a, b],
            out_dir: Some(out.clone()),
        };
        run(&args).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("a.svg")).unwrap(),
            "<svg><rect/></svg>"
        );
        assert_eq!(
            fs::read_to_string(out.join("b.svg")).unwrap(),
            "<svg><circle/></svg>"
        );
    }

    #[test]
    fn test_missing_svg_fails() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "<svg></svg>").unwrap();
        fs::write(&bad, "sorry, no drawing").unwrap();

        let args = ExtractArgs {
            inputs: vec![good, bad],
            out_dir: Some(dir.path().join("out")),
        };
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
        assert!(dir.path().join("out/good.svg").exists());
    }
}
