//! Run configuration: agent runtime loop control.

use serde::{Deserialize, Serialize};
use wiz_domain::ModelSettings;

/// Settings for one invocation of the agent runtime.
///
/// Built once at startup from the loaded configuration and passed with every
/// user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Model and provider endpoint
    pub model: ModelSettings,
    /// When true the conversation transcript is not recorded
    pub tracing_disabled: bool,
    /// Maximum tool round-trips inside a single turn
    pub max_tool_turns: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: ModelSettings::default(),
            tracing_disabled: true,
            max_tool_turns: 10,
        }
    }
}

impl RunConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: ModelSettings) -> Self {
        self.model = model;
        self
    }

    pub fn with_tracing_disabled(mut self, disabled: bool) -> Self {
        self.tracing_disabled = disabled;
        self
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }
}
