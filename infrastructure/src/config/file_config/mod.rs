//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field has a default, so an empty file is a valid configuration.

mod logging;
mod model;
mod repl;
mod weather;

pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use repl::FileReplConfig;
pub use weather::{DEFAULT_WEATHER_ENDPOINT, FileWeatherConfig};

use serde::{Deserialize, Serialize};
use wiz_application::RunConfig;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work.
    Error,
    /// The configuration works but probably not as intended.
    Warning,
}

/// A problem detected by [`FileConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key (e.g. `model.base_url`)
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Hosted model settings
    pub model: FileModelConfig,
    /// Weather API settings
    pub weather: FileWeatherConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.model.trim().is_empty() {
            issues.push(ConfigIssue::error("model.model", "model name cannot be empty"));
        }
        if !is_http_url(&self.model.base_url) {
            issues.push(ConfigIssue::error(
                "model.base_url",
                format!("'{}' is not an http(s) URL", self.model.base_url),
            ));
        }
        if self.model.max_tool_turns == 0 {
            issues.push(ConfigIssue::error(
                "model.max_tool_turns",
                "must be at least 1 or tools can never be used",
            ));
        }
        if self.model.api_key_env.trim().is_empty() && self.model.api_key.is_none() {
            issues.push(ConfigIssue::error(
                "model.api_key_env",
                "no environment variable or inline key configured",
            ));
        }
        if !is_http_url(&self.weather.endpoint) {
            issues.push(ConfigIssue::error(
                "weather.endpoint",
                format!("'{}' is not an http(s) URL", self.weather.endpoint),
            ));
        }
        if self.weather.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "weather.timeout_secs",
                "0 disables the request timeout",
            ));
        }
        if self.model.api_key.is_some() || self.weather.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                "api_key",
                "inline API keys are stored in plain text; prefer api_key_env",
            ));
        }
        if !self.model.tracing_disabled && self.logging.conversation_log.is_none() {
            issues.push(ConfigIssue::warning(
                "logging.conversation_log",
                "tracing is enabled but no transcript path is set; using the default location",
            ));
        }

        issues
    }

    /// Per-run settings for the agent runtime.
    pub fn run_config(&self) -> RunConfig {
        RunConfig::default()
            .with_model(self.model.settings())
            .with_tracing_disabled(self.model.tracing_disabled)
            .with_max_tool_turns(self.model.max_tool_turns)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Environment variable first, inline value second; empty strings count as unset.
fn resolve_secret(
    env_name: &str,
    inline: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let from_env = if env_name.is_empty() {
        None
    } else {
        lookup(env_name)
    };
    from_env
        .filter(|v| !v.trim().is_empty())
        .or_else(|| inline.filter(|v| !v.trim().is_empty()).map(str::to_string))
}
