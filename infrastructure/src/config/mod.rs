//! Configuration file loading for wiz-weather
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `WIZ_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./wiz-weather.toml` or `./.wiz-weather.toml`
//! 4. Global: `~/.config/wiz-weather/config.toml`
//! 5. Default values
//!
//! CLI flags (`--model`, `--base-url`) are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_WEATHER_ENDPOINT, FileConfig, FileLoggingConfig, FileModelConfig,
    FileReplConfig, FileWeatherConfig, Severity,
};
pub use loader::{APP_DIR, ConfigError, ConfigLoader};
