//! get_weather tool: live current conditions from WeatherAPI
//!
//! The lookup never fails: configuration problems, upstream errors and
//! malformed bodies all come back as a marked string (`❌` or `⚠️`) that the
//! model can relay to the user.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use wiz_domain::tool::entities::{ToolDefinition, ToolParameter};
use wiz_domain::{TemperatureUnit, WeatherReport};

/// Tool name constant
pub const GET_WEATHER: &str = "get_weather";

/// Returned without any network call when no key is configured.
pub const MISSING_KEY_MESSAGE: &str = "❌ Weather API key is missing.";

/// Get the tool definition for get_weather
pub fn get_weather_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_WEATHER,
        "Get the current weather for a city or location.",
    )
    .with_parameter(ToolParameter::new(
        "location",
        "City or place name, e.g. \"Lahore\"",
        true,
    ))
    .with_parameter(
        ToolParameter::new("unit", "Temperature unit: \"C\" or \"F\" (default: C)", false)
            .with_allowed_values(["C", "F"])
            .with_default("C"),
    )
}

/// Source of current-conditions reports.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Formatted report for `location`, or a marked error string.
    async fn lookup(&self, location: &str, unit: &str) -> String;
}

/// [`WeatherLookup`] backed by the WeatherAPI `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct LiveWeatherLookup {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LiveWeatherLookup {
    /// A zero `timeout` leaves requests unbounded.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, endpoint, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait]
impl WeatherLookup for LiveWeatherLookup {
    async fn lookup(&self, location: &str, unit: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        let unit: TemperatureUnit = match unit.parse() {
            Ok(unit) => unit,
            Err(e) => return format!("❌ {}", e),
        };

        debug!("Fetching current weather for {}", location);
        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("key", api_key), ("q", location)])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Weather request failed: {}", e);
                return format!("⚠️ Error fetching weather data: {}", e);
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => render_response(status, &body, unit),
            Err(e) => format!("⚠️ Error fetching weather data: {}", e),
        }
    }
}

/// Turn an HTTP status and body into the text handed to the model.
pub fn render_response(status: u16, body: &str, unit: TemperatureUnit) -> String {
    if status != 200 {
        let message = error_message(body).unwrap_or_else(|| "Unknown error".to_string());
        return format!("❌ Failed to get weather data: {} - {}", status, message);
    }

    match serde_json::from_str::<CurrentResponse>(body) {
        Ok(parsed) => parsed.into_report().render(unit),
        Err(e) => format!("⚠️ An unexpected error occurred: {}", e),
    }
}

/// `message` at the top level, or WeatherAPI's `error.message`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: ApiLocation,
    current: ApiCurrent,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    condition: ApiCondition,
    wind_kph: f64,
    pressure_mb: f64,
    #[serde(default)]
    precip_mm: Option<f64>,
    #[serde(default)]
    vis_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
}

impl CurrentResponse {
    fn into_report(self) -> WeatherReport {
        let current = self.current;
        WeatherReport {
            location_name: self.location.name,
            temperature_c: current.temp_c,
            feels_like_c: current.feelslike_c,
            humidity: current.humidity,
            description: current.condition.text,
            wind_speed_mps: WeatherReport::wind_kph_to_mps(current.wind_kph),
            pressure_hpa: current.pressure_mb,
            precipitation_mm: current.precip_mm,
            visibility_m: current.vis_km.map(|km| km * 1000.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAHORE: &str = r#"{
        "location": {"name": "Lahore", "region": "Punjab", "country": "Pakistan"},
        "current": {
            "temp_c": 30.0,
            "feelslike_c": 31.2,
            "humidity": 40,
            "condition": {"text": "Sunny", "code": 1000},
            "wind_kph": 18.0,
            "pressure_mb": 1012.0
        }
    }"#;

    #[test]
    fn test_lahore_report() {
        let report = render_response(200, LAHORE, TemperatureUnit::Celsius);
        assert!(report.contains("Lahore"));
        assert!(report.contains("30"));
        assert!(report.contains("40%"));
        assert!(report.contains("Sunny"));
        assert!(report.contains("5.0"));
        assert!(report.contains("1012"));
    }

    #[test]
    fn test_missing_optional_fields_have_no_lines() {
        let report = render_response(200, LAHORE, TemperatureUnit::Celsius);
        assert!(!report.contains("Rain"));
        assert!(!report.contains("Visibility"));
    }

    #[test]
    fn test_optional_fields_rendered() {
        let body = LAHORE.replace(
            "\"pressure_mb\": 1012.0",
            "\"pressure_mb\": 1012.0, \"precip_mm\": 1.2, \"vis_km\": 6.0",
        );
        let report = render_response(200, &body, TemperatureUnit::Celsius);
        assert!(report.contains("🌧️ Rain (last 1h): 1.2 mm"));
        assert!(report.contains("👁️ Visibility: 6.0 km"));
    }

    #[test]
    fn test_fahrenheit_converts() {
        let report = render_response(200, LAHORE, TemperatureUnit::Fahrenheit);
        assert!(report.contains("86.0°F"));
    }

    #[test]
    fn test_non_200_top_level_message() {
        let text = render_response(400, r#"{"message": "Invalid location"}"#, TemperatureUnit::Celsius);
        assert!(text.starts_with('❌'));
        assert!(text.contains("400"));
        assert!(text.contains("Invalid location"));
    }

    #[test]
    fn test_non_200_nested_message() {
        let text = render_response(
            400,
            r#"{"error": {"code": 1006, "message": "No matching location found."}}"#,
            TemperatureUnit::Celsius,
        );
        assert_eq!(
            text,
            "❌ Failed to get weather data: 400 - No matching location found."
        );
    }

    #[test]
    fn test_non_200_unknown_error() {
        let text = render_response(502, "<html>bad gateway</html>", TemperatureUnit::Celsius);
        assert_eq!(text, "❌ Failed to get weather data: 502 - Unknown error");
    }

    #[test]
    fn test_malformed_body() {
        let text = render_response(200, r#"{"location": {"name": "X"}}"#, TemperatureUnit::Celsius);
        assert!(text.starts_with("⚠️ An unexpected error occurred"));
    }

    #[tokio::test]
    async fn test_missing_key_skips_request() {
        // Unroutable endpoint: any request would fail differently.
        let lookup = LiveWeatherLookup::new("http://127.0.0.1:9/current.json", None, Duration::ZERO).unwrap();
        assert_eq!(lookup.lookup("Lahore", "C").await, MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_unit() {
        let lookup = LiveWeatherLookup::new(
            "http://127.0.0.1:9/current.json",
            Some("key".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        let text = lookup.lookup("Lahore", "K").await;
        assert!(text.starts_with('❌'));
        assert!(text.contains("Invalid temperature unit: K"));
    }

    /// Serve one canned HTTP response on a local port.
    ///
    /// Returns the endpoint URL and a task yielding the request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/current.json", listener.local_addr().unwrap());
        let task = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });
        (url, task)
    }

    #[tokio::test]
    async fn test_lookup_sends_key_and_location() {
        let (url, server) = serve_once("200 OK", LAHORE).await;
        let lookup =
            LiveWeatherLookup::new(url, Some("secret".to_string()), Duration::from_secs(5)).unwrap();

        let report = lookup.lookup("Lahore", "F").await;

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /v1/current.json?"));
        assert!(request_line.contains("key=secret"));
        assert!(request_line.contains("q=Lahore"));
        assert!(report.contains("Lahore"));
        assert!(report.contains("86.0°F"));
    }

    #[tokio::test]
    async fn test_lookup_upstream_error_status() {
        let (url, server) = serve_once(
            "400 Bad Request",
            r#"{"error": {"code": 1006, "message": "No matching location found."}}"#,
        )
        .await;
        let lookup =
            LiveWeatherLookup::new(url, Some("secret".to_string()), Duration::from_secs(5)).unwrap();

        let text = lookup.lookup("Atlantis", "C").await;

        server.await.unwrap();
        assert_eq!(
            text,
            "❌ Failed to get weather data: 400 - No matching location found."
        );
    }

    #[tokio::test]
    async fn test_lookup_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/current.json", listener.local_addr().unwrap());
        drop(listener);
        let lookup =
            LiveWeatherLookup::new(url, Some("secret".to_string()), Duration::from_secs(5)).unwrap();

        let text = lookup.lookup("Lahore", "C").await;

        assert!(text.starts_with("⚠️ Error fetching weather data: "));
    }

    #[test]
    fn test_definition() {
        let def = get_weather_definition();
        assert!(def.parameter("location").unwrap().required);
        let unit = def.parameter("unit").unwrap();
        assert!(!unit.required);
        assert_eq!(unit.default_value.as_deref(), Some("C"));
    }
}
