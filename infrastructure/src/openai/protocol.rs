//! OpenAI chat-completions wire types.
//!
//! Only the subset needed for streaming text and function calls is modelled.
//! Unknown fields in responses are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use wiz_application::ChatMessage;
use wiz_domain::ToolCall;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "no_tools")]
    pub tools: &'a [Value],
    pub stream: bool,
}

fn no_tools(tools: &&[Value]) -> bool {
    tools.is_empty()
}

/// A message as the API expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    /// `null` is sent for assistant turns that only call tools
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        let role = message.role();
        match message {
            ChatMessage::System { content } | ChatMessage::User { content } => Self {
                role,
                content: Some(content.clone()),
                tool_calls: Vec::new(),
                tool_call_id: None,
            },
            ChatMessage::Assistant {
                content,
                tool_calls,
            } => Self {
                role,
                content: content.clone(),
                tool_calls: tool_calls
                    .iter()
                    .enumerate()
                    .map(|(i, call)| WireToolCall::from_call(i as u32, call))
                    .collect(),
                tool_call_id: None,
            },
            ChatMessage::Tool {
                tool_call_id,
                content,
            } => Self {
                role,
                content: Some(content.clone()),
                tool_calls: Vec::new(),
                tool_call_id: Some(tool_call_id.clone()),
            },
        }
    }
}

/// A tool call, either complete (request side) or a streamed fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Position of the call in the response (streaming only). Some
    /// compatible servers leave it out.
    #[serde(default, skip_serializing)]
    pub index: Option<u32>,
    #[serde(default, rename = "type")]
    pub call_type: String,
    #[serde(default)]
    pub function: WireFunctionCall,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: String,
}

impl WireToolCall {
    fn from_call(index: u32, call: &ToolCall) -> Self {
        Self {
            id: call
                .native_id
                .clone()
                .unwrap_or_else(|| format!("call_{}", index)),
            index: Some(index),
            call_type: "function".to_string(),
            function: WireFunctionCall {
                name: call.tool_name.clone(),
                arguments: serde_json::to_string(&call.arguments)
                    .unwrap_or_else(|_| "{}".to_string()),
            },
        }
    }

    /// Fold a streamed fragment into this call.
    pub fn merge(&mut self, fragment: &Self) {
        if !fragment.id.is_empty() {
            self.id = fragment.id.clone();
        }
        if !fragment.call_type.is_empty() {
            self.call_type = fragment.call_type.clone();
        }
        if !fragment.function.name.is_empty() {
            self.function.name = fragment.function.name.clone();
        }
        self.function.arguments.push_str(&fragment.function.arguments);
    }

    /// Decode the accumulated argument JSON. Empty or malformed input yields
    /// `None`.
    pub fn parsed_arguments(&self) -> Option<HashMap<String, Value>> {
        let raw = self.function.arguments.trim();
        if raw.is_empty() {
            return Some(HashMap::new());
        }
        serde_json::from_str(raw).ok()
    }
}

/// One `data:` payload of a streamed completion.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: Delta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Error body returned with non-2xx statuses.
///
/// OpenAI-style APIs wrap it as `{"error": {...}}`; some gateways (Gemini's
/// compatibility layer among them) return a list of such objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorEnvelope {
    One { error: ErrorDetail },
    Many(Vec<ErrorEnvelope>),
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Best-effort human-readable message from an error response body.
    pub fn message_from(body: &str) -> Option<String> {
        match serde_json::from_str::<ErrorEnvelope>(body).ok()? {
            ErrorEnvelope::One { error } => error.message,
            ErrorEnvelope::Many(list) => list.into_iter().find_map(|e| match e {
                ErrorEnvelope::One { error } => error.message,
                ErrorEnvelope::Many(_) => None,
            }),
        }
    }
}
