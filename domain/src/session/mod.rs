//! Conversation session domain.
//!
//! - [`entities::Message`]: a single turn within a conversation
//! - [`history::ConversationHistory`]: the append-only turn list of one session
//! - [`response::LlmResponse`]: a structured model response (text + tool use)
//! - [`stream::StreamEvent`]: incremental events of a streamed model response

pub mod entities;
pub mod history;
pub mod response;
pub mod stream;
