//! Domain layer for wiz-weather
//!
//! This crate contains the core entities and value objects of the weather
//! assistant. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A chat session owns a [`ConversationHistory`]: an append-only list of
//! user and assistant [`Message`]s in arrival order.
//!
//! ## Tools
//!
//! The hosted model can call two tools, each described by a [`ToolDefinition`]:
//!
//! - `weather_patterns`: canned explanations ([`explain_weather_pattern`])
//! - `get_weather`: live conditions formatted as a [`WeatherReport`]
//!
//! ## Agent
//!
//! [`AgentDefinition`] is the static description (name, instructions, tools,
//! model settings) the agent runtime works from.

pub mod agent;
pub mod core;
pub mod session;
pub mod tool;
pub mod util;
pub mod weather;

// Re-export commonly used types
pub use agent::{
    definition::{AgentDefinition, ModelSettings},
    prompt::{AGENT_NAME, WELCOME_MESSAGE, agent_instructions},
};
pub use core::error::DomainError;
pub use session::{
    entities::{Message, Role},
    history::ConversationHistory,
    response::{ContentBlock, LlmResponse, StopReason},
    stream::StreamEvent,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
pub use weather::{
    patterns::explain_weather_pattern,
    report::WeatherReport,
    unit::TemperatureUnit,
};
