//! OpenAI-compatible chat completions adapter
//!
//! Speaks the streaming `chat/completions` dialect that Gemini (and most
//! hosted models) expose:
//!
//! - [`protocol`]: request/response wire types
//! - [`sse`]: line buffering for `text/event-stream` bodies
//! - [`accumulator`]: merges streamed deltas into an `LlmResponse`
//! - [`gateway`]: the [`LlmGateway`](wiz_application::LlmGateway) implementation

pub mod accumulator;
pub mod gateway;
pub mod protocol;
pub mod sse;

pub use gateway::OpenAiCompatGateway;
