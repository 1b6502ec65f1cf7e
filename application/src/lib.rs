//! Application layer for wiz-weather
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RunConfig;
pub use ports::{
    chat_output::{ChatOutput, NoChatOutput},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatMessage, ChatRequest, GatewayError, LlmGateway, StreamHandle},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::chat_session::{ChatSession, SessionError, SessionState};
pub use use_cases::run_agent::{RunAgentError, RunAgentUseCase, RunEvent, RunHandle};
pub use use_cases::session_worker::{SessionHandle, SessionWorker};
