//! Per-session message queue.
//!
//! [`SessionWorker`] owns a [`ChatSession`] inside a spawned task and
//! processes commands one at a time. Messages submitted while a reply is
//! still streaming wait in the queue, so turns are appended strictly in
//! arrival order.

use crate::use_cases::chat_session::{ChatSession, SessionError};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use wiz_domain::Message;

/// Number of commands that may wait behind the one being processed.
const QUEUE_DEPTH: usize = 16;

enum SessionCommand {
    Message {
        content: String,
        reply: oneshot::Sender<Result<String, SessionError>>,
    },
    History {
        reply: oneshot::Sender<Vec<Message>>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
}

/// Task that serializes all work on one chat session.
pub struct SessionWorker {
    session: ChatSession,
    commands: mpsc::Receiver<SessionCommand>,
}

impl SessionWorker {
    /// Start the session (welcome message included) and return its handle.
    pub fn spawn(mut session: ChatSession) -> SessionHandle {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        session.on_session_start();

        let worker = SessionWorker {
            session,
            commands: rx,
        };
        tokio::spawn(worker.run());

        SessionHandle { commands: tx }
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                SessionCommand::Message { content, reply } => {
                    let result = self.session.on_message(&content).await;
                    let _ = reply.send(result);
                }
                SessionCommand::History { reply } => {
                    let _ = reply.send(self.session.history().turns().to_vec());
                }
                SessionCommand::Restart { reply } => {
                    self.session.on_session_start();
                    let _ = reply.send(());
                }
            }
        }
        debug!("Session worker stopped");
    }
}

/// Cloneable handle for submitting work to a [`SessionWorker`].
///
/// The worker stops once every handle has been dropped.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Queue a user message and wait for the complete reply.
    pub async fn send_message(&self, content: impl Into<String>) -> Result<String, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(SessionCommand::Message {
                content: content.into(),
                reply,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)?
    }

    /// Snapshot of the conversation so far.
    pub async fn history(&self) -> Result<Vec<Message>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(SessionCommand::History { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// End the current conversation and start a fresh one.
    pub async fn restart(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(SessionCommand::Restart { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::use_cases::test_support::{RecordingOutput, ScriptedGateway, runner};
    use std::sync::Arc;
    use wiz_domain::{Role, WELCOME_MESSAGE};

    fn spawn_with(gateway: Arc<ScriptedGateway>, output: Arc<RecordingOutput>) -> SessionHandle {
        SessionWorker::spawn(ChatSession::new(
            runner(gateway),
            RunConfig::default(),
            output,
        ))
    }

    #[tokio::test]
    async fn test_spawn_sends_welcome() {
        let output = Arc::new(RecordingOutput::default());
        let handle = spawn_with(Arc::new(ScriptedGateway::new(vec![])), output.clone());

        assert!(handle.history().await.unwrap().is_empty());
        assert_eq!(*output.sent.lock().unwrap(), vec![WELCOME_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_messages_are_serialized() {
        let output = Arc::new(RecordingOutput::default());
        let gateway = Arc::new(ScriptedGateway::replying(&[&["first"], &["second"]]));
        let handle = spawn_with(gateway.clone(), output);

        let a = handle.clone();
        let b = handle.clone();
        let first = tokio::spawn(async move { a.send_message("one").await });
        // Give the first command a head start so queue order is deterministic.
        tokio::task::yield_now().await;
        let second = tokio::spawn(async move { b.send_message("two").await });

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert_eq!(first, "first");
        assert_eq!(second, "second");

        let history = handle.history().await.unwrap();
        assert_eq!(history.len(), 4);
        let roles: Vec<_> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );

        // The second run saw the completed first exchange.
        assert_eq!(gateway.requests()[1].messages.len(), 1 + 3);
    }

    #[tokio::test]
    async fn test_restart_starts_fresh_conversation() {
        let output = Arc::new(RecordingOutput::default());
        let gateway = Arc::new(ScriptedGateway::replying(&[&["hi"]]));
        let handle = spawn_with(gateway, output.clone());

        handle.send_message("hello").await.unwrap();
        assert_eq!(handle.history().await.unwrap().len(), 2);

        handle.restart().await.unwrap();
        assert!(handle.history().await.unwrap().is_empty());
        let welcomes = output
            .sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == WELCOME_MESSAGE)
            .count();
        assert_eq!(welcomes, 2);
    }

    #[tokio::test]
    async fn test_errors_are_returned_to_caller() {
        let output = Arc::new(RecordingOutput::default());
        let handle = spawn_with(Arc::new(ScriptedGateway::new(vec![])), output);

        let err = handle.send_message("hello").await.unwrap_err();
        assert!(matches!(err, SessionError::Run(_)));
        assert_eq!(handle.history().await.unwrap().len(), 1);
    }
}
