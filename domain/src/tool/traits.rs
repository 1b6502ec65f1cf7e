//! Tool domain traits
//!
//! Pure validation of tool calls against their definitions. Execution is
//! defined by the async `ToolExecutorPort` in the application layer.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks required parameters, rejects unknown parameters, and checks
/// enumerated string values case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };

            if param.param_type == "string" && !value.is_string() {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be a string",
                    arg_name, definition.name
                ));
            }

            if !param.allowed_values.is_empty()
                && let Some(s) = value.as_str()
                && !param
                    .allowed_values
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(s))
            {
                return Err(format!(
                    "Invalid value '{}' for parameter '{}' (expected one of: {})",
                    s,
                    arg_name,
                    param.allowed_values.join(", ")
                ));
            }
        }

        Ok(())
    }
}
