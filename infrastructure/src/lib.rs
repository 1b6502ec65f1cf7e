//! Infrastructure layer for wiz-weather
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileLoggingConfig, FileModelConfig,
    FileReplConfig, FileWeatherConfig, Severity,
};
pub use logging::JsonlConversationLogger;
pub use openai::OpenAiCompatGateway;
pub use tools::{
    JsonSchemaToolConverter, LiveWeatherLookup, LocalToolExecutor, WeatherLookup,
    weather_tool_spec,
};
