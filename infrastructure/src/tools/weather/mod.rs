//! The two weather tools exposed to the model

pub mod current;
pub mod patterns;

pub use current::{GET_WEATHER, LiveWeatherLookup, WeatherLookup, get_weather_definition};
pub use patterns::{WEATHER_PATTERNS, weather_patterns_definition};
