//! Presentation layer for wiz-weather
//!
//! This crate contains the CLI definition, console chat output and the
//! interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleChatOutput;
