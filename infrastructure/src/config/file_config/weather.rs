//! Weather API configuration from TOML (`[weather]` section)

use super::resolve_secret;
use serde::{Deserialize, Serialize};

/// Default current-conditions endpoint.
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.weatherapi.com/v1/current.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeatherConfig {
    /// Current-conditions endpoint (called with `key` and `q`)
    pub endpoint: String,
    /// Environment variable name for the API key (default: "WEATHER_API_KEY")
    pub api_key_env: String,
    /// Direct API key (not recommended, prefer the env var)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileWeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            api_key_env: "WEATHER_API_KEY".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl FileWeatherConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        resolve_secret(&self.api_key_env, self.api_key.as_deref(), lookup)
    }
}
