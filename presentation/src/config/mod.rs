//! Presentation-level configuration
//!
//! Settings for the interactive chat, built by the binary from the `[repl]`
//! section of the config file and the CLI flags.

use std::path::{Path, PathBuf};

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show a spinner while waiting for the first token
    pub show_progress: bool,
    /// Print a line for each tool call
    pub show_tool_activity: bool,
    /// Path to history file (None = platform default)
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            show_tool_activity: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// Quiet mode: no spinner, no tool lines.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self.show_tool_activity = false;
        self
    }

    pub fn with_history_file(mut self, path: Option<&str>) -> Self {
        self.history_file = path.map(expand_home);
        self
    }

    /// Line-history file to use, falling back to
    /// `$XDG_DATA_HOME/wiz-weather/history.txt`.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("wiz-weather").join("history.txt")))
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    Path::new(path).to_path_buf()
}
