//! Server-sent event decoding for the generation endpoint.
//!
//! The backend sends one JSON object per `data:` line:
//!
//! ```text
//! data: {"status":"started","id":42,"message":"generating"}
//! data: {"status":"streaming","chunk":"<svg viewBox=\"0 0 24 24\">"}
//! data: {"status":"completed"}
//! data: [DONE]
//! ```
//!
//! Network chunks do not respect line boundaries, so the decoder keeps the
//! trailing partial line until the rest of it arrives.

use serde::Deserialize;
use serde_json::Value;

use super::StreamError;

/// Marker line sent after the last event.
const DONE_MARKER: &str = "[DONE]";

/// A decoded generation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// Generation accepted by the backend.
    Started { id: Option<i64>, message: String },
    /// Next piece of generated text.
    Chunk(String),
    /// Backend finished generating.
    Completed,
    /// Backend reported an error.
    Failed { id: Option<i64>, message: String },
    /// `[DONE]` marker.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Started,
    Streaming,
    Completed,
    Error,
}

#[derive(Debug, Deserialize)]
struct Payload {
    status: Status,
    #[serde(default)]
    chunk: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<i64>,
}

impl Payload {
    fn into_event(self) -> Option<GenerationEvent> {
        match self.status {
            Status::Started => Some(GenerationEvent::Started {
                id: self.id,
                message: self.message.unwrap_or_default(),
            }),
            Status::Streaming => self
                .chunk
                .filter(|chunk| !chunk.is_empty())
                .map(GenerationEvent::Chunk),
            Status::Completed => Some(GenerationEvent::Completed),
            Status::Error => Some(GenerationEvent::Failed {
                id: self.id,
                message: self.message.unwrap_or_default(),
            }),
        }
    }
}

/// Incremental `data:` line decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk; returns the events completed by it.
    ///
    /// A line that fails to decode yields an `Err` in place and does not
    /// stop the lines after it.
    pub fn feed(&mut self, chunk: &str) -> Vec<Result<GenerationEvent, StreamError>> {
        self.pending.push_str(chunk);

        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete.lines().filter_map(decode_line).collect()
    }

    /// Decode whatever is left once the stream ends without a final newline.
    pub fn finish(&mut self) -> Vec<Result<GenerationEvent, StreamError>> {
        let rest = std::mem::take(&mut self.pending);
        rest.lines().filter_map(decode_line).collect()
    }
}

/// Decode a single line. Blank and non-`data:` lines produce nothing.
pub fn decode_line(line: &str) -> Option<Result<GenerationEvent, StreamError>> {
    let line = line.trim_end_matches('\r');
    let data = line.strip_prefix("data:")?;
    let data = data.strip_prefix(' ').unwrap_or(data);

    if data.trim().is_empty() {
        return None;
    }
    if data == DONE_MARKER {
        return Some(Ok(GenerationEvent::Done));
    }

    match serde_json::from_str::<Payload>(data) {
        Ok(payload) => payload.into_event().map(Ok),
        Err(source) => Some(Err(StreamError::InvalidPayload {
            line: data.to_string(),
            source,
        })),
    }
}

/// Pull the human-readable message out of a backend error string.
///
/// Upstream errors often arrive as `"<status> {json}"` with the message at
/// `error.message`; anything else is returned unchanged.
pub fn error_detail(message: &str) -> String {
    let (Some(start), Some(end)) = (message.find('{'), message.rfind('}')) else {
        return message.to_string();
    };
    if end < start {
        return message.to_string();
    }

    serde_json::from_str::<Value>(&message[start..=end])
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| message.to_string())
}
