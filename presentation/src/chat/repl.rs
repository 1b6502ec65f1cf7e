//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::{format_error, format_history};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use tracing::{debug, warn};
use wiz_application::SessionHandle;

/// Number of lines kept in the history file.
const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    New,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`.
    pub fn parse(line: &str) -> Self {
        match line.split_whitespace().next().unwrap_or(line) {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/new" | "/clear" => ReplCommand::New,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: SessionHandle,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a REPL for a running session (the welcome has already been sent).
    pub fn new(session: SessionHandle, config: ReplConfig) -> Self {
        Self { session, config }
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.config.history_path() else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("wiz".to_string()),
            DefaultPromptSegment::Empty,
        );

        println!("{}", "Type /help for commands, Ctrl+D to exit.".dimmed());
        println!();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)).await {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                }
            }
        }

        Ok(())
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?     - Show this help");
                println!("  /history          - Show this conversation");
                println!("  /new              - Start a new conversation");
                println!("  /quit, /exit, /q  - Exit chat");
                println!();
                false
            }
            ReplCommand::History => {
                match self.session.history().await {
                    Ok(turns) => println!("\n{}", format_history(&turns)),
                    Err(e) => eprintln!("{}", format_error(&e)),
                }
                false
            }
            ReplCommand::New => {
                debug!("Restarting session");
                println!();
                if let Err(e) = self.session.restart().await {
                    eprintln!("{}", format_error(&e));
                    return true;
                }
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, message: &str) {
        println!();
        // The reply streams through the console output; only errors land here.
        if let Err(e) = self.session.send_message(message).await {
            eprintln!("{}", format_error(&e));
            println!();
        }
    }
}
