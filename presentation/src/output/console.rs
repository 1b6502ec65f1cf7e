//! Console rendering of the chat
//!
//! [`ConsoleChatOutput`] implements the [`ChatOutput`] port on stdout: a
//! spinner until the first token arrives, then tokens printed as they
//! stream in. Tool activity is shown as dimmed side lines.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use wiz_application::{ChatOutput, SessionError};
use wiz_domain::{Message, Role};

use crate::config::ReplConfig;

#[derive(Default)]
struct ConsoleState {
    spinner: Option<ProgressBar>,
    /// Tokens have been printed since the last newline.
    mid_line: bool,
}

/// Chat output on the terminal
pub struct ConsoleChatOutput {
    state: Mutex<ConsoleState>,
    show_progress: bool,
    show_tool_activity: bool,
}

impl ConsoleChatOutput {
    pub fn new(config: &ReplConfig) -> Self {
        Self {
            state: Mutex::new(ConsoleState::default()),
            show_progress: config.show_progress,
            show_tool_activity: config.show_tool_activity,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(state: &mut ConsoleState, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        state.spinner = Some(pb);
    }

    fn clear_spinner(state: &mut ConsoleState) {
        if let Some(pb) = state.spinner.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a full line without tearing the spinner or a half-printed answer.
    fn print_side_line(state: &mut ConsoleState, line: &str) {
        if state.mid_line {
            println!();
            state.mid_line = false;
        }
        match &state.spinner {
            Some(pb) => pb.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }
}

impl ChatOutput for ConsoleChatOutput {
    fn send_message(&self, content: &str) {
        println!("{}\n", content);
    }

    fn begin_message(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.mid_line = false;
        if self.show_progress {
            Self::start_spinner(&mut state, "Thinking...".to_string());
        }
    }

    fn stream_token(&self, token: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        Self::clear_spinner(&mut state);
        print!("{}", token);
        let _ = std::io::stdout().flush();
        state.mid_line = !token.ends_with('\n');
    }

    fn end_message(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        Self::clear_spinner(&mut state);
        if state.mid_line {
            println!();
        }
        println!();
        state.mid_line = false;
    }

    fn tool_started(&self, tool_name: &str, args_preview: &str) {
        if !self.show_tool_activity {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        Self::print_side_line(&mut state, &format_tool_started(tool_name, args_preview));
        if let Some(pb) = &state.spinner {
            pb.set_message(format!("Running {}...", tool_name));
        }
    }

    fn tool_finished(&self, tool_name: &str, success: bool, output_preview: &str) {
        if !self.show_tool_activity {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        Self::print_side_line(
            &mut state,
            &format_tool_finished(tool_name, success, output_preview),
        );
        if let Some(pb) = &state.spinner {
            pb.set_message("Thinking...".to_string());
        }
    }
}

impl Drop for ConsoleChatOutput {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            Self::clear_spinner(&mut state);
        }
    }
}

pub fn format_tool_started(tool_name: &str, args_preview: &str) -> String {
    if args_preview.is_empty() {
        format!("  {} {}", "→".cyan(), tool_name.bold())
    } else {
        format!(
            "  {} {} {}",
            "→".cyan(),
            tool_name.bold(),
            format!("({})", args_preview).dimmed()
        )
    }
}

pub fn format_tool_finished(tool_name: &str, success: bool, output_preview: &str) -> String {
    let mark = if success { "✓".green() } else { "✗".red() };
    format!("  {} {} {}", mark, tool_name, output_preview.dimmed())
}

/// One line per error, shown in place of the answer.
pub fn format_error(error: &SessionError) -> String {
    format!("{} {}", "Error:".red().bold(), error)
}

/// Transcript view for `/history`.
pub fn format_history(turns: &[Message]) -> String {
    if turns.is_empty() {
        return "No messages yet.".dimmed().to_string();
    }

    let mut output = String::new();
    for turn in turns {
        let label = match turn.role {
            Role::User => "You".cyan().bold(),
            Role::Assistant => "Wiz".green().bold(),
        };
        output.push_str(&format!("{}: {}\n", label, turn.content.trim_end()));
    }
    output
}
