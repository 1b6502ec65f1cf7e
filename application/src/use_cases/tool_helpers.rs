//! Shared helpers for tool use cases.

use wiz_domain::tool::entities::ToolCall;
use wiz_domain::util::preview;

const PREVIEW_CHARS: usize = 50;

/// Extract a short preview string from tool call arguments.
///
/// Looks for the well-known keys of the weather tools (`location`,
/// `question`) first, then falls back to the first string value found.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    for key in ["location", "question"] {
        if let Some(s) = call.get_string(key) {
            return preview(s, PREVIEW_CHARS);
        }
    }
    let mut keys: Vec<_> = call.arguments.keys().collect();
    keys.sort();
    for key in keys {
        if let Some(s) = call.get_string(key) {
            return preview(s, PREVIEW_CHARS);
        }
    }
    String::new()
}

/// One-line preview of a tool's output for activity displays.
pub(crate) fn tool_output_preview(output: &str) -> String {
    preview(output, 2 * PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_key_preferred() {
        let call = ToolCall::new("get_weather")
            .with_arg("unit", "C")
            .with_arg("location", "Lahore");
        assert_eq!(tool_args_preview(&call), "Lahore");
    }

    #[test]
    fn test_question_key() {
        let call = ToolCall::new("weather_patterns").with_arg("question", "What is a monsoon?");
        assert_eq!(tool_args_preview(&call), "What is a monsoon?");
    }

    #[test]
    fn test_fallback_to_first_string() {
        let call = ToolCall::new("other")
            .with_arg("count", 3)
            .with_arg("city", "Oslo");
        assert_eq!(tool_args_preview(&call), "Oslo");
    }

    #[test]
    fn test_no_string_args() {
        let call = ToolCall::new("other").with_arg("count", 3);
        assert_eq!(tool_args_preview(&call), "");
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "x".repeat(80);
        let call = ToolCall::new("get_weather").with_arg("location", long.as_str());
        let preview = tool_args_preview(&call);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_output_preview_is_single_line() {
        let preview = tool_output_preview("📍 **Weather in Lahore**\n🌡️ Temperature: 30.0°C");
        assert!(!preview.contains('\n'));
    }
}
