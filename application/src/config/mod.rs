//! Application-level configuration.
//!
//! - [`RunConfig`]: per-run settings handed to the agent runtime

pub mod run_config;

pub use run_config::RunConfig;
