//! One generation attempt: buffer, state, snapshots and the final artifact.

use crate::svg::{ExtractKind, StreamSanitizer, extract_svg};

use super::StreamError;
use super::event::{GenerationEvent, error_detail};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl SessionState {
    /// No more events are accepted.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// The extracted result of a finished generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: Option<i64>,
    pub svg: String,
    pub kind: ExtractKind,
}

/// Owns the buffer of a single generation and turns it into snapshots.
#[derive(Debug, Default)]
pub struct GenerationSession {
    id: Option<i64>,
    state: SessionState,
    buffer: String,
    status_message: String,
    failure: Option<String>,
    sanitizer: StreamSanitizer,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a configured sanitizer for snapshots.
    pub fn with_sanitizer(sanitizer: StreamSanitizer) -> Self {
        Self {
            sanitizer,
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Everything received so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Last message attached to a `started` event.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Apply a decoded event. Ignored once the session is terminal.
    pub fn apply(&mut self, event: GenerationEvent) {
        if self.state.is_terminal() {
            return;
        }

        match event {
            GenerationEvent::Started { id, message } => {
                self.id = id.or(self.id);
                self.status_message = message;
                self.buffer.clear();
                self.state = SessionState::Streaming;
            }
            GenerationEvent::Chunk(chunk) => self.push_chunk(&chunk),
            GenerationEvent::Completed | GenerationEvent::Done => {
                self.state = SessionState::Completed;
            }
            GenerationEvent::Failed { id, message } => {
                self.id = id.or(self.id);
                self.failure = Some(error_detail(&message));
                self.buffer.clear();
                self.state = SessionState::Failed;
            }
        }
    }

    /// Append raw generated text.
    pub fn push_chunk(&mut self, chunk: &str) {
        if self.state.is_terminal() {
            return;
        }
        self.buffer.push_str(chunk);
        self.state = SessionState::Streaming;
    }

    /// Record a transport-side cancellation. The buffer is kept.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Cancelled;
        }
    }

    /// Renderable snapshot of the buffer; empty while nothing can be shown.
    pub fn snapshot(&self) -> String {
        self.sanitizer.sanitize(&self.buffer)
    }

    /// Extract the final artifact from the buffer.
    pub fn finish(&self) -> Result<Artifact, StreamError> {
        if let Some(message) = &self.failure {
            return Err(StreamError::Generation {
                id: self.id,
                message: message.clone(),
            });
        }

        let extraction = extract_svg(&self.buffer);
        if self.buffer.trim().is_empty() || !extraction.is_found() {
            return Err(StreamError::NoSvgContent);
        }

        Ok(Artifact {
            id: self.id,
            svg: extraction.content,
            kind: extraction.kind,
        })
    }
}

/// Drive a fresh session with raw text chunks, reporting each snapshot.
///
/// The callback receives the chunk index and the snapshot after it.
pub fn replay<I, S, F>(session: &mut GenerationSession, chunks: I, mut on_snapshot: F)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(usize, &str),
{
    for (index, chunk) in chunks.into_iter().enumerate() {
        session.push_chunk(chunk.as_ref());
        on_snapshot(index, &session.snapshot());
    }
    session.apply(GenerationEvent::Completed);
}
