//! Agent definition value objects.
//!
//! [`AgentDefinition`] is declarative: it never changes after startup and
//! carries no runtime state. Deciding when to call a tool is left to the
//! hosted model.

use super::prompt::{AGENT_NAME, agent_instructions};
use crate::core::error::DomainError;
use crate::tool::entities::ToolSpec;
use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint of the hosted model.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for the hosted chat-completions model.
///
/// The API key is deliberately not part of this type; it is resolved by the
/// gateway adapter so that definitions can be logged and printed freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier sent with every request (e.g. `gemini-2.0-flash`)
    pub model: String,
    /// Base URL of the OpenAI-compatible API, without `/chat/completions`
    pub base_url: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ModelSettings {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Full URL of the streaming chat endpoint.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.model.trim().is_empty() {
            return Err(DomainError::InvalidModelSettings(
                "model identifier is empty".to_string(),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DomainError::InvalidModelSettings(format!(
                "base URL must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Declarative description of the conversational agent.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub instructions: String,
    pub tools: ToolSpec,
    pub model: ModelSettings,
}

impl AgentDefinition {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        tools: ToolSpec,
        model: ModelSettings,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools,
            model,
        }
    }

    /// The Wiz WEATHER assistant with its fixed instructions.
    pub fn wiz_weather(tools: ToolSpec, model: ModelSettings) -> Self {
        Self::new(AGENT_NAME, agent_instructions(), tools, model)
    }

    pub fn with_model(mut self, model: ModelSettings) -> Self {
        self.model = model;
        self
    }
}
