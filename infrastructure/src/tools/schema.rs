//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the OpenAI
//! function-calling format used by the chat completions endpoint.

use serde_json::{Map, Value, json};
use wiz_application::ports::tool_schema::ToolSchemaPort;
use wiz_domain::tool::entities::ToolDefinition;

/// Converts tool definitions to `{"type": "function", "function": {...}}`.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
///
/// Allowed values become an `enum`, defaults become `default`.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type));
            prop.insert("description".to_string(), json!(param.description));
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), json!(param.allowed_values));
            }
            if let Some(default) = &param.default_value {
                prop.insert("default".to_string(), json!(default));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::weather_tool_spec;

    #[test]
    fn test_get_weather_schema() {
        let spec = weather_tool_spec();
        let schema = JsonSchemaToolConverter.tool_to_schema(spec.get("get_weather").unwrap());

        assert_eq!(schema["type"], "function");
        let function = &schema["function"];
        assert_eq!(function["name"], "get_weather");
        assert_eq!(function["parameters"]["type"], "object");

        let location = &function["parameters"]["properties"]["location"];
        assert_eq!(location["type"], "string");
        assert!(location.get("enum").is_none());

        let unit = &function["parameters"]["properties"]["unit"];
        assert_eq!(unit["enum"], json!(["C", "F"]));
        assert_eq!(unit["default"], "C");

        // Only location is required
        assert_eq!(function["parameters"]["required"], json!(["location"]));
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let tools = JsonSchemaToolConverter.all_tools_schema(&weather_tool_spec());
        let names: Vec<&str> = tools
            .iter()
            .map(|t| t["function"]["name"].as_str().unwrap())
            .collect();
        // Aliases are not separate tools
        assert_eq!(names, vec!["get_weather", "weather_patterns"]);
    }
}
