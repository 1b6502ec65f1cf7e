//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path, used when `model.tracing_disabled = false`
    pub conversation_log: Option<String>,
    /// Write diagnostics to this file instead of stderr
    pub log_file: Option<String>,
}
