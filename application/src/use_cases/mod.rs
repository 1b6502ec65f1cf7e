//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_session;
pub mod run_agent;
pub mod session_worker;
pub(crate) mod tool_helpers;

#[cfg(test)]
pub(crate) mod test_support;
