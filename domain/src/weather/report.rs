//! Current-conditions report

use super::unit::TemperatureUnit;
use std::fmt::Write;

/// Kilometres per hour → metres per second.
pub const KPH_PER_MPS: f64 = 3.6;

/// Current weather for one location (Value Object).
///
/// Temperatures are stored in Celsius, wind in m/s, pressure in hPa and
/// visibility in metres. Built fresh for every lookup and discarded once
/// rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity: u8,
    pub description: String,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    pub precipitation_mm: Option<f64>,
    pub visibility_m: Option<f64>,
}

impl WeatherReport {
    /// Convert a wind speed reported in km/h to m/s.
    pub fn wind_kph_to_mps(kph: f64) -> f64 {
        kph / KPH_PER_MPS
    }

    /// Render the fixed multi-line report.
    ///
    /// Rain and visibility lines only appear when the value is present and
    /// non-zero.
    pub fn render(&self, unit: TemperatureUnit) -> String {
        let symbol = unit.symbol();
        let mut report = String::new();

        let _ = writeln!(report, "📍 **Weather in {}**", self.location_name);
        let _ = writeln!(
            report,
            "🌡️ Temperature: {:.1}°{} (Feels like {:.1}°{})",
            unit.from_celsius(self.temperature_c),
            symbol,
            unit.from_celsius(self.feels_like_c),
            symbol
        );
        let _ = writeln!(report, "☁️ Conditions: {}", self.description);
        let _ = writeln!(report, "💧 Humidity: {}%", self.humidity);
        let _ = writeln!(report, "🌬️ Wind Speed: {:.1} m/s", self.wind_speed_mps);
        let _ = writeln!(report, "🔽 Pressure: {:.0} hPa", self.pressure_hpa);

        if let Some(rain) = self.precipitation_mm.filter(|v| *v > 0.0) {
            let _ = writeln!(report, "🌧️ Rain (last 1h): {} mm", rain);
        }
        if let Some(visibility) = self.visibility_m.filter(|v| *v > 0.0) {
            let _ = writeln!(report, "👁️ Visibility: {:.1} km", visibility / 1000.0);
        }

        report
    }
}
