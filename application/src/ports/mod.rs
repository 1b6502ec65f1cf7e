//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod chat_output;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod tool_executor;
pub mod tool_schema;
