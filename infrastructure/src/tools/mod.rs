//! Tool implementations for the weather agent
//!
//! - `weather_patterns`: canned explanations, no I/O
//! - `get_weather`: live conditions through a [`WeatherLookup`]
//!
//! [`LocalToolExecutor`] dispatches calls by name and
//! [`JsonSchemaToolConverter`] describes the tools to the model.

pub mod weather;

mod executor;
mod schema;

pub use executor::LocalToolExecutor;
pub use schema::JsonSchemaToolConverter;
pub use weather::{LiveWeatherLookup, WeatherLookup};

use wiz_domain::tool::entities::ToolSpec;

/// Create the tool specification with both weather tools
pub fn weather_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(weather::weather_patterns_definition())
        .register(weather::get_weather_definition())
        .register_alias("current_weather", weather::GET_WEATHER)
        .register_alias("weather", weather::GET_WEATHER)
}
