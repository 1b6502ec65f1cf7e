//! Weather domain.
//!
//! - [`unit::TemperatureUnit`]: display unit requested by the model
//! - [`report::WeatherReport`]: current conditions for one location
//! - [`patterns::explain_weather_pattern`]: canned explanations of weather drivers

pub mod patterns;
pub mod report;
pub mod unit;
