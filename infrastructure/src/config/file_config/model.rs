//! Model configuration from TOML (`[model]` section)

use super::resolve_secret;
use serde::{Deserialize, Serialize};
use wiz_domain::ModelSettings;
use wiz_domain::agent::definition::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Hosted chat-completions model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier (default: "gemini-2.0-flash")
    pub model: String,
    /// OpenAI-compatible base URL
    pub base_url: String,
    /// Environment variable name for the API key (default: "GEMINI_API_KEY")
    pub api_key_env: String,
    /// Direct API key (not recommended, prefer the env var)
    pub api_key: Option<String>,
    /// Skip the conversation transcript (default: true)
    pub tracing_disabled: bool,
    /// Maximum tool round-trips per user message
    pub max_tool_turns: usize,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            tracing_disabled: true,
            max_tool_turns: 10,
        }
    }
}

impl FileModelConfig {
    pub fn settings(&self) -> ModelSettings {
        ModelSettings::new(&self.model, &self.base_url)
    }

    /// API key from the named environment variable, else the inline value.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        resolve_secret(&self.api_key_env, self.api_key.as_deref(), lookup)
    }
}
