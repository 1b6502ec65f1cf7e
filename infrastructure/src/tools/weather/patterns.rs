//! weather_patterns tool: canned explanations of weather and climate drivers

use wiz_domain::explain_weather_pattern;
use wiz_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

/// Tool name constant
pub const WEATHER_PATTERNS: &str = "weather_patterns";

/// Get the tool definition for weather_patterns
pub fn weather_patterns_definition() -> ToolDefinition {
    ToolDefinition::new(
        WEATHER_PATTERNS,
        "Explain how weather patterns form and how climate change relates to extreme weather.",
    )
    .with_parameter(ToolParameter::new(
        "question",
        "The user's weather or climate question",
        true,
    ))
}

/// Execute the weather_patterns tool
pub fn execute_weather_patterns(call: &ToolCall) -> ToolResult {
    match call.require_string("question") {
        Ok(question) => ToolResult::success(WEATHER_PATTERNS, explain_weather_pattern(question)),
        Err(e) => ToolResult::failure(WEATHER_PATTERNS, ToolError::invalid_argument(e)),
    }
}
