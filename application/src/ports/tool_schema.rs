//! Tool schema conversion port.
//!
//! The domain decides which tools exist ([`ToolSpec`]); this port turns them
//! into the JSON the model API expects.

use wiz_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to LLM API format (JSON Schema).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<_> = spec.all().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
