//! Interactive chat module
//!
//! Provides a line-editor based chat interface on top of a session worker.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
