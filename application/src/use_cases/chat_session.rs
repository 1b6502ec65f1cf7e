//! Chat session controller.
//!
//! A [`ChatSession`] owns the conversation history of one chat and reacts to
//! the two UI events: session start and incoming message.
//!
//! # State machine
//!
//! ```text
//! Idle ──on_message──► AwaitingModelStream ──completed/failed──► Idle
//! ```
//!
//! `on_message` takes `&mut self`, so a session never handles two messages
//! at once. Callers that receive messages concurrently go through
//! [`SessionWorker`](super::session_worker::SessionWorker).

use crate::config::RunConfig;
use crate::ports::chat_output::ChatOutput;
use crate::use_cases::run_agent::{RunAgentError, RunAgentUseCase, RunEvent, RunHandle};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use wiz_domain::{ConversationHistory, DomainError, WELCOME_MESSAGE};

/// Errors surfaced to the UI for a single message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Run(#[from] RunAgentError),

    #[error("Session has been closed")]
    Closed,
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingModelStream,
}

/// One chat session: history plus the collaborators needed to answer.
pub struct ChatSession {
    runner: RunAgentUseCase,
    config: RunConfig,
    output: Arc<dyn ChatOutput>,
    history: ConversationHistory,
    state: SessionState,
}

impl ChatSession {
    pub fn new(runner: RunAgentUseCase, config: RunConfig, output: Arc<dyn ChatOutput>) -> Self {
        Self {
            runner,
            config,
            output,
            history: ConversationHistory::new(),
            state: SessionState::Idle,
        }
    }

    /// Reset the history and greet the user.
    pub fn on_session_start(&mut self) {
        self.history = ConversationHistory::new();
        self.state = SessionState::Idle;
        info!("Chat session started");
        self.output.send_message(WELCOME_MESSAGE);
    }

    /// Answer one user message, streaming the reply to the output.
    ///
    /// On success the user and assistant turns are both in the history. On
    /// failure only the user turn is kept and the error is returned.
    pub async fn on_message(&mut self, content: &str) -> Result<String, SessionError> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        self.output.begin_message();
        self.history.push_user(content);
        self.state = SessionState::AwaitingModelStream;
        debug!("Session history has {} turns", self.history.len());

        let mut handle = self.runner.run_streamed(&self.history, &self.config);
        let outcome = self.forward(&mut handle).await;

        self.output.end_message();
        self.state = SessionState::Idle;

        let final_output = outcome?;
        self.history.push_assistant(final_output.clone());
        Ok(final_output)
    }

    async fn forward(&self, handle: &mut RunHandle) -> Result<String, SessionError> {
        while let Some(event) = handle.next_event().await {
            match event {
                RunEvent::TextDelta(token) => self.output.stream_token(&token),
                RunEvent::ToolCallStarted {
                    tool_name,
                    args_preview,
                } => self.output.tool_started(&tool_name, &args_preview),
                RunEvent::ToolCallFinished {
                    tool_name,
                    success,
                    output_preview,
                } => self
                    .output
                    .tool_finished(&tool_name, success, &output_preview),
                RunEvent::Completed { final_output } => return Ok(final_output),
                RunEvent::Failed(e) => return Err(e.into()),
            }
        }
        Err(RunAgentError::StreamClosed.into())
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}
