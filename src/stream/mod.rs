//! Generation stream plumbing around the SVG core.
//!
//! - [`event`]: SSE `data:` lines → [`GenerationEvent`]
//! - [`session`]: buffer + lifecycle, snapshots via the sanitizer, final
//!   artifact via the extractor
//!
//! No networking happens here. The caller owns the connection and its
//! cancellation; a session only records what it was told.

pub mod event;
pub mod session;

pub use event::{GenerationEvent, SseDecoder, decode_line, error_detail};
pub use session::{Artifact, GenerationSession, SessionState, replay};

use thiserror::Error;

/// Errors surfaced by the stream layer.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid event payload `{line}`")]
    InvalidPayload {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("generation {} failed: {message}", display_id(.id))]
    Generation { id: Option<i64>, message: String },

    #[error("unable to extract valid SVG content")]
    NoSvgContent,
}

fn display_id(id: &Option<i64>) -> String {
    id.map_or_else(|| "?".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_error_display() {
        let err = StreamError::Generation {
            id: Some(9),
            message: "quota".into(),
        };
        assert_eq!(err.to_string(), "generation 9 failed: quota");

        let err = StreamError::Generation {
            id: None,
            message: "quota".into(),
        };
        assert_eq!(err.to_string(), "generation ? failed: quota");

        assert_eq!(
            StreamError::NoSvgContent.to_string(),
            "unable to extract valid SVG content"
        );
    }
}
