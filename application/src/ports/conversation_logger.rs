//! Port for structured conversation logging.
//!
//! Records the chat transcript (user turns, model rounds, tool calls) as
//! machine-readable events. This is separate from `tracing` diagnostics and
//! is only fed when runtime tracing is enabled in the run configuration.

use serde_json::Value;

/// A structured conversation event.
pub struct ConversationEvent {
    /// Event type identifier (e.g. "user_message", "tool_call").
    pub event_type: &'static str,
    /// Event-specific fields.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for writing conversation events.
///
/// `log` is synchronous and infallible; a broken sink must never interrupt
/// a chat turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Logger that drops every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
