//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to the line history file (default: data dir)
    pub history_file: Option<String>,
    /// Print a line for every tool the model calls
    pub show_tool_activity: bool,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            show_tool_activity: true,
        }
    }
}
