//! `replay` command: drive a generation session from a recorded stream.
//!
//! Raw transcripts are cut into fixed-size chunks; SSE transcripts are cut
//! the same way before decoding, so `data:` lines arrive split like they
//! would over the network.

use anyhow::{Context, Result, bail};
use svgstream::config::SvgStreamConfig;
use svgstream::logger::ProgressLine;
use svgstream::stream::{
    GenerationEvent, GenerationSession, SessionState, SseDecoder, StreamError, replay,
};
use svgstream::svg::StreamSanitizer;
use svgstream::{debug, log};

use super::ReplayArgs;
use super::common::{input_label, read_input, write_output};

pub fn run(args: &ReplayArgs, config: &SvgStreamConfig) -> Result<()> {
    let chunk_size = args.chunk_size.unwrap_or(config.replay.chunk_size);
    if chunk_size == 0 {
        bail!("--chunk-size must be at least 1");
    }

    let transcript = read_input(Some(&args.input))?;
    let chunks = split_chunks(&transcript, chunk_size);
    debug!("replay"; "{}: {} chunk(s) of {chunk_size}", input_label(Some(&args.input)), chunks.len());

    let sanitizer = StreamSanitizer::new(config.sanitize.to_options());
    let mut session = GenerationSession::with_sanitizer(sanitizer);
    let progress = ProgressLine::new(&[("chunks", chunks.len())]);

    let print = |snapshot: &str| {
        if args.snapshots && !snapshot.is_empty() {
            println!("{snapshot}");
        }
    };

    if args.sse {
        replay_sse(&mut session, &chunks, &progress, print);
    } else {
        replay(&mut session, &chunks, |_, snapshot| {
            progress.inc("chunks");
            print(snapshot);
        });
    }
    progress.finish();

    if !session.status_message().is_empty() {
        debug!("replay"; "status: {}", session.status_message());
    }
    if session.state() != SessionState::Completed {
        log!("replay"; "stream ended without completion ({:?})", session.state());
    }

    let artifact = session.finish().context("replay produced no artifact")?;
    debug!("replay"; "artifact {:?} ({} bytes)", artifact.kind, artifact.svg.len());

    write_output(args.output.as_deref(), artifact.svg.as_bytes())?;
    if let Some(path) = &args.output {
        log!("replay"; "wrote {}", path.display());
    }
    Ok(())
}

fn replay_sse(
    session: &mut GenerationSession,
    chunks: &[&str],
    progress: &ProgressLine,
    mut print: impl FnMut(&str),
) {
    let mut decoder = SseDecoder::new();

    let mut apply = |session: &mut GenerationSession,
                 results: Vec<Result<GenerationEvent, StreamError>>| {
        for result in results {
            match result {
                Ok(event) => {
                    let is_chunk = matches!(event, GenerationEvent::Chunk(_));
                    session.apply(event);
                    if is_chunk {
                        print(&session.snapshot());
                    }
                }
                Err(err) => log!("replay"; "skipping event: {err}"),
            }
        }
    };

    for chunk in chunks {
        let results = decoder.feed(chunk);
        apply(session, results);
        progress.inc("chunks");
    }
    let results = decoder.finish();
    apply(session, results);
}

/// Cut `text` into pieces of at most `size` characters.
fn split_chunks(text: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(size)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn args(input: PathBuf, output: PathBuf, sse: bool) -> ReplayArgs {
        ReplayArgs {
            input,
            sse,
            chunk_size: Some(5),
            snapshots: false,
            output: Some(output),
        }
    }

    #[test]
    fn test_split_chunks_respects_chars() {
        assert_eq!(split_chunks("abcdefg", 3), ["abc", "def", "g"]);
        assert_eq!(split_chunks("héllo", 2), ["hé", "ll", "o"]);
        assert!(split_chunks("", 4).is_empty());
    }

    #[test]
    fn test_replay_raw_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.txt");
        let output = dir.path().join("art.svg");
        fs::write(&input, "Sure!\n<svg viewBox=\"0 0 4 4\"><rect/></svg>\nEnjoy.").unwrap();

        run(&args(input, output.clone(), false), &SvgStreamConfig::default()).unwrap();
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "<svg viewBox=\"0 0 4 4\"><rect/></svg>"
        );
    }

    #[test]
    fn test_replay_sse_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.sse");
        let output = dir.path().join("art.svg");
        fs::write(
            &input,
            concat!(
                "data: {\"status\":\"started\",\"id\":1}\n\n",
                "data: {\"status\":\"streaming\",\"chunk\":\"<svg><g>\"}\n\n",
                "data: garbage\n\n",
                "data: {\"status\":\"streaming\",\"chunk\":\"</g></svg>\"}\n\n",
                "data: {\"status\":\"completed\"}\n\n",
                "data: [DONE]\n",
            ),
        )
        .unwrap();

        run(&args(input, output.clone(), true), &SvgStreamConfig::default()).unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), "<svg><g></g></svg>");
    }

    #[test]
    fn test_replay_failed_generation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.sse");
        fs::write(
            &input,
            "data: {\"status\":\"error\",\"id\":2,\"message\":\"500 {\\\"error\\\":{\\\"message\\\":\\\"overloaded\\\"}}\"}\n",
        )
        .unwrap();

        let err = run(
            &args(input, dir.path().join("art.svg"), true),
            &SvgStreamConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("generation 2 failed: overloaded"));
    }
}
