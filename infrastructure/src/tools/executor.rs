//! Local tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! # Execution Path
//!
//! ```text
//! ToolExecutorPort::execute()
//!   ├─ resolve name (aliases included)   → NOT_FOUND on miss
//!   ├─ DefaultToolValidator               → INVALID_ARGUMENT on failure
//!   └─ dispatch
//!        ├─ weather_patterns → explain_weather_pattern (sync)
//!        └─ get_weather      → WeatherLookup (HTTP)
//! ```

use super::weather::{GET_WEATHER, WEATHER_PATTERNS, WeatherLookup, patterns};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use wiz_application::ports::tool_executor::ToolExecutorPort;
use wiz_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

/// Executor for the weather tools.
#[derive(Clone)]
pub struct LocalToolExecutor {
    /// Available tools
    tool_spec: ToolSpec,
    /// Backend of `get_weather`
    weather: Arc<dyn WeatherLookup>,
}

impl LocalToolExecutor {
    /// Create an executor with both weather tools.
    pub fn new(weather: Arc<dyn WeatherLookup>) -> Self {
        Self::with_tools(super::weather_tool_spec(), weather)
    }

    /// Create an executor with a custom tool spec
    pub fn with_tools(tool_spec: ToolSpec, weather: Arc<dyn WeatherLookup>) -> Self {
        Self { tool_spec, weather }
    }

    async fn dispatch(&self, canonical: &str, call: &ToolCall) -> ToolResult {
        match canonical {
            WEATHER_PATTERNS => patterns::execute_weather_patterns(call),
            GET_WEATHER => {
                let location = match call.require_string("location") {
                    Ok(l) => l,
                    Err(e) => {
                        return ToolResult::failure(GET_WEATHER, ToolError::invalid_argument(e));
                    }
                };
                let unit = call
                    .get_string("unit")
                    .or_else(|| {
                        self.tool_spec
                            .get(GET_WEATHER)
                            .and_then(|d| d.parameter("unit"))
                            .and_then(|p| p.default_value.as_deref())
                    })
                    .unwrap_or("C");
                ToolResult::success(GET_WEATHER, self.weather.lookup(location, unit).await)
            }
            other => ToolResult::failure(
                other,
                ToolError::execution_failed(format!("Tool '{}' is not implemented", other)),
            ),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(definition) = self.tool_spec.get_resolved(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Unknown tool: {}", call.tool_name)),
            );
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&definition.name, ToolError::invalid_argument(e));
        }

        let start = Instant::now();
        let result = self.dispatch(&definition.name, call).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        debug!("Tool {} finished in {}ms", definition.name, duration_ms);
        result.with_duration(duration_ms)
    }
}
