//! Chat output port
//!
//! The outbound half of the chat UI protocol: whole messages, and streamed
//! messages built up token by token.

/// Port for rendering assistant output.
///
/// A streamed message is `begin_message`, any number of `stream_token`
/// calls, then `end_message`. Implementations live in the presentation
/// layer (console) or in tests (recorders).
pub trait ChatOutput: Send + Sync {
    /// Send a complete message (e.g. the welcome text).
    fn send_message(&self, content: &str);

    /// Open a new, empty outgoing message.
    fn begin_message(&self);

    /// Append a text fragment to the open message.
    fn stream_token(&self, token: &str);

    /// Close the open message.
    fn end_message(&self);

    /// A tool call was dispatched.
    fn tool_started(&self, _tool_name: &str, _args_preview: &str) {}

    /// A tool call finished.
    fn tool_finished(&self, _tool_name: &str, _success: bool, _output_preview: &str) {}
}

/// Output that discards everything.
pub struct NoChatOutput;

impl ChatOutput for NoChatOutput {
    fn send_message(&self, _content: &str) {}
    fn begin_message(&self) {}
    fn stream_token(&self, _token: &str) {}
    fn end_message(&self) {}
}
