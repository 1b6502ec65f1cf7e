//! Streaming events for model communication.
//!
//! [`StreamEvent`] represents individual events in a streaming model response,
//! enabling real-time display of the answer as it is generated.

use super::response::LlmResponse;

/// An event in a streaming model response.
///
/// A well-formed stream is any number of `Delta` / `ToolCallDelta` events
/// followed by exactly one terminal event (`Completed` or `Error`).
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),

    /// Incremental tool call data.
    ///
    /// Tool calls arrive in pieces: first `id` and `name`, then fragments of
    /// the JSON arguments that must be concatenated. `index` identifies the
    /// tool call when the model requests several in one response.
    ToolCallDelta {
        index: usize,
        id: Option<String>,
        name: Option<String>,
        arguments_delta: Option<String>,
    },

    /// The assembled response of this model round (signals stream end).
    Completed(LlmResponse),

    /// An error that occurred during streaming (signals stream end).
    Error(String),
}

impl StreamEvent {
    /// Returns the text fragment if this is a `Delta` event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
