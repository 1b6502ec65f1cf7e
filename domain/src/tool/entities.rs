//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Definition of a tool the model can call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_weather")
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Parameter type hint ("string", "number", "integer", "boolean")
    pub param_type: String,
    /// Allowed values, if the parameter is an enumeration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Value assumed when the model omits the parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            allowed_values: Vec::new(),
            default_value: None,
        }
    }

    pub fn with_allowed_values(
        mut self,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Registry of tools available to the agent
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
    /// Alias → canonical name mapping (e.g. "weather" → "get_weather")
    aliases: HashMap<String, String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn register_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Resolve a name: canonical names win over aliases, unknown names give `None`.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.tools.contains_key(name) {
            Some(name)
        } else {
            self.aliases.get(name).map(|s| s.as_str())
        }
    }

    /// Get tool definition by canonical name or alias
    pub fn get_resolved(&self, name: &str) -> Option<&ToolDefinition> {
        self.resolve(name).and_then(|canonical| self.tools.get(canonical))
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    /// Tool names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// API-assigned call ID, echoed back with the tool result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    /// Build a call from a model's tool use block.
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: name.into(),
            arguments,
            native_id: Some(id.into()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_tool() -> ToolDefinition {
        ToolDefinition::new("get_weather", "Current conditions")
            .with_parameter(ToolParameter::new("location", "City name", true))
            .with_parameter(
                ToolParameter::new("unit", "Temperature unit", false)
                    .with_allowed_values(["C", "F"])
                    .with_default("C"),
            )
    }

    #[test]
    fn test_tool_definition() {
        let tool = weather_tool();
        assert_eq!(tool.name, "get_weather");
        assert_eq!(tool.parameters.len(), 2);
        let unit = tool.parameter("unit").unwrap();
        assert!(!unit.required);
        assert_eq!(unit.default_value.as_deref(), Some("C"));
        assert_eq!(unit.allowed_values, vec!["C", "F"]);
    }

    #[test]
    fn test_tool_spec_aliases() {
        let spec = ToolSpec::new()
            .register(weather_tool())
            .register(ToolDefinition::new("weather_patterns", "Explain"))
            .register_alias("weather", "get_weather")
            .register_alias("current_weather", "get_weather");

        assert_eq!(spec.resolve("get_weather"), Some("get_weather"));
        assert_eq!(spec.resolve("weather"), Some("get_weather"));
        assert_eq!(spec.resolve("current_weather"), Some("get_weather"));
        assert_eq!(spec.resolve("forecast"), None);
        assert_eq!(spec.get_resolved("weather").unwrap().name, "get_weather");

        // get() is exact match only
        assert!(spec.get("weather").is_none());
        assert_eq!(spec.names(), vec!["get_weather", "weather_patterns"]);
    }

    #[test]
    fn test_canonical_name_takes_priority_over_alias() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("get_weather", "Live"))
            .register(ToolDefinition::new("weather", "Other"))
            .register_alias("weather", "get_weather");

        assert_eq!(spec.get_resolved("weather").unwrap().name, "weather");
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("get_weather").with_arg("location", "Lahore");

        assert_eq!(call.get_string("location"), Some("Lahore"));
        assert_eq!(call.require_string("location").unwrap(), "Lahore");
        assert!(call.require_string("unit").is_err());
        assert!(call.native_id.is_none());
    }
}
