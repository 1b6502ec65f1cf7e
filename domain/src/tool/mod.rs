//! Tool domain module
//!
//! Tools are the named capabilities the hosted model may invoke during a
//! turn. Every tool is described by a [`ToolDefinition`] (name, description,
//! parameters), invoked via a [`ToolCall`], and answers with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "weather" → "get_weather"
//!        └─ tools:   "get_weather" → ToolDefinition
//! ```
//!
//! The domain only holds definitions and validation. Execution lives behind
//! the application layer's `ToolExecutorPort`.

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
