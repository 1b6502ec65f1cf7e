//! Agent domain module
//!
//! The static description of the weather assistant: who it is, what it may
//! talk about, which tools it can call and which hosted model backs it.

pub mod definition;
pub mod prompt;

pub use definition::{AgentDefinition, ModelSettings};
