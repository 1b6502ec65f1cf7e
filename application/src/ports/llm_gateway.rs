//! LLM Gateway port
//!
//! Defines the interface for streaming chat completions from a hosted model.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use wiz_domain::{Message, Role, StreamEvent, ToolCall};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One message in the provider-neutral wire conversation.
///
/// Unlike [`Message`], this carries the system prompt and the tool-call
/// bookkeeping that only exists for the duration of one agent run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage::Assistant {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Assistant turn that requested tools. Empty text is sent as `null`.
    pub fn assistant_tool_calls(content: &str, tool_calls: Vec<ToolCall>) -> Self {
        ChatMessage::Assistant {
            content: (!content.is_empty()).then(|| content.to_string()),
            tool_calls,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    /// Wire role name.
    pub fn role(&self) -> &'static str {
        match self {
            ChatMessage::System { .. } => "system",
            ChatMessage::User { .. } => "user",
            ChatMessage::Assistant { .. } => "assistant",
            ChatMessage::Tool { .. } => "tool",
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        match message.role {
            Role::User => ChatMessage::user(message.content.clone()),
            Role::Assistant => ChatMessage::assistant(message.content.clone()),
        }
    }
}

/// A streaming chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation so far, system prompt first
    pub messages: Vec<ChatMessage>,
    /// Tool schemas in the provider's function format
    pub tools: Vec<serde_json::Value>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        self.tools = tools;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the hosted model.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Start one streaming completion round.
    ///
    /// Errors that happen before the first byte (connection, HTTP status) are
    /// returned directly; errors mid-stream arrive as [`StreamEvent::Error`].
    async fn stream_chat(&self, request: ChatRequest) -> Result<StreamHandle, GatewayError>;
}

/// Handle for receiving streaming events from one completion round.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`; the producer runs in its own task.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Next event, or `None` once the producer has gone away.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}
