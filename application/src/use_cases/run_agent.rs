//! Run Agent use case.
//!
//! Drives one user turn through the hosted model. Each round streams a chat
//! completion; when the model asks for tools they are executed, their results
//! are appended to the conversation and the model is asked again. The run
//! ends when a round finishes without tool calls.
//!
//! ```text
//! history ─► [system, user, assistant, …, user]
//!               │
//!               ▼
//!        stream_chat() ──► TextDelta* ──► tool calls? ──no──► Completed
//!               ▲                              │yes
//!               └──── tool results ◄── execute ┘
//! ```

use crate::config::RunConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatMessage, ChatRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::tool_helpers::{tool_args_preview, tool_output_preview};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wiz_domain::{AgentDefinition, ConversationHistory, LlmResponse, StreamEvent, ToolCall};

/// Capacity of the run event channel.
const RUN_EVENT_BUFFER: usize = 64;

/// Errors that end an agent run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunAgentError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Model stream failed: {0}")]
    StreamFailed(String),

    #[error("Model stream ended without a response")]
    StreamClosed,

    #[error("No answer after {0} tool turns")]
    ToolTurnLimit(usize),

    #[error("Run cancelled")]
    Cancelled,
}

/// Events produced by a streamed run.
///
/// A run yields any number of `TextDelta` and tool events followed by exactly
/// one `Completed` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Incremental answer text.
    TextDelta(String),
    ToolCallStarted {
        tool_name: String,
        args_preview: String,
    },
    ToolCallFinished {
        tool_name: String,
        success: bool,
        output_preview: String,
    },
    /// The run finished; `final_output` is the text of the last model round.
    Completed { final_output: String },
    Failed(RunAgentError),
}

/// Single-pass stream of [`RunEvent`]s for one run.
pub struct RunHandle {
    receiver: mpsc::Receiver<RunEvent>,
}

impl RunHandle {
    pub fn new(receiver: mpsc::Receiver<RunEvent>) -> Self {
        Self { receiver }
    }

    /// Next event, or `None` once the run has ended.
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        self.receiver.recv().await
    }
}

/// Use case for running the conversational agent.
///
/// Cheap to clone: every collaborator is behind an `Arc`.
#[derive(Clone)]
pub struct RunAgentUseCase {
    agent: Arc<AgentDefinition>,
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunAgentUseCase {
    pub fn new(
        agent: AgentDefinition,
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            agent: Arc::new(agent),
            gateway,
            tool_executor,
            tool_schema,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn agent(&self) -> &AgentDefinition {
        &self.agent
    }

    /// Start a run over the full conversation history.
    ///
    /// The run executes in a spawned task; dropping the returned handle
    /// cancels it at the next event.
    pub fn run_streamed(&self, history: &ConversationHistory, config: &RunConfig) -> RunHandle {
        let (tx, rx) = mpsc::channel(RUN_EVENT_BUFFER);
        let runner = self.clone();
        let messages = self.initial_messages(history);
        let config = config.clone();

        tokio::spawn(async move {
            let event = match runner.drive(messages, &config, &tx).await {
                Ok(final_output) => RunEvent::Completed { final_output },
                Err(RunAgentError::Cancelled) => {
                    debug!("Agent run cancelled by consumer");
                    return;
                }
                Err(e) => {
                    warn!("Agent run failed: {}", e);
                    RunEvent::Failed(e)
                }
            };
            let _ = tx.send(event).await;
        });

        RunHandle::new(rx)
    }

    /// System instructions followed by every history turn.
    fn initial_messages(&self, history: &ConversationHistory) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::system(self.agent.instructions.clone()))
            .chain(history.iter().map(ChatMessage::from))
            .collect()
    }

    async fn drive(
        &self,
        mut messages: Vec<ChatMessage>,
        config: &RunConfig,
        tx: &mpsc::Sender<RunEvent>,
    ) -> Result<String, RunAgentError> {
        let tools = self.tool_schema.all_tools_schema(&self.agent.tools);
        let max_turns = config.max_tool_turns;
        let mut turn_count = 0;
        let mut last_text = String::new();

        info!(
            "Running {} with model {} ({} messages, {} tools)",
            self.agent.name,
            config.model.model,
            messages.len(),
            tools.len()
        );

        loop {
            let request =
                ChatRequest::new(&config.model.model, messages.clone()).with_tools(tools.clone());
            self.log(
                config,
                "model_request",
                serde_json::json!({
                    "model": config.model.model,
                    "messages": request.messages.len(),
                    "turn": turn_count,
                }),
            );

            let response = self.stream_round(request, tx).await?;
            let text = response.text_content();
            let tool_calls = response.tool_calls();

            let requested: Vec<&str> = tool_calls.iter().map(|c| c.tool_name.as_str()).collect();
            self.log(
                config,
                "model_response",
                serde_json::json!({
                    "text": text,
                    "tool_calls": requested,
                }),
            );

            if tool_calls.is_empty() {
                info!("Agent run completed after {} tool turns", turn_count);
                return Ok(text);
            }
            if !text.is_empty() {
                last_text = text.clone();
            }

            turn_count += 1;
            if turn_count > max_turns {
                warn!("Tool loop exceeded max_tool_turns ({})", max_turns);
                if last_text.is_empty() {
                    return Err(RunAgentError::ToolTurnLimit(max_turns));
                }
                return Ok(last_text);
            }

            debug!(
                "Tool turn {}/{}: {} calls",
                turn_count,
                max_turns,
                tool_calls.len()
            );
            messages.push(ChatMessage::assistant_tool_calls(&text, tool_calls.clone()));
            let results = self.run_tools(&tool_calls, config, tx).await?;
            messages.extend(results);
        }
    }

    /// Forward one completion round's text and return the assembled response.
    async fn stream_round(
        &self,
        request: ChatRequest,
        tx: &mpsc::Sender<RunEvent>,
    ) -> Result<LlmResponse, RunAgentError> {
        let mut stream = self.gateway.stream_chat(request).await?;

        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    tx.send(RunEvent::TextDelta(chunk))
                        .await
                        .map_err(|_| RunAgentError::Cancelled)?;
                }
                StreamEvent::ToolCallDelta { .. } => {}
                StreamEvent::Completed(response) => return Ok(response),
                StreamEvent::Error(e) => return Err(RunAgentError::StreamFailed(e)),
            }
        }

        Err(RunAgentError::StreamClosed)
    }

    /// Execute the requested tools concurrently and build the result messages.
    ///
    /// Tool failures are reported to the model, not raised.
    async fn run_tools(
        &self,
        tool_calls: &[ToolCall],
        config: &RunConfig,
        tx: &mpsc::Sender<RunEvent>,
    ) -> Result<Vec<ChatMessage>, RunAgentError> {
        for call in tool_calls {
            tx.send(RunEvent::ToolCallStarted {
                tool_name: call.tool_name.clone(),
                args_preview: tool_args_preview(call),
            })
            .await
            .map_err(|_| RunAgentError::Cancelled)?;
            self.log(
                config,
                "tool_call",
                serde_json::json!({
                    "tool": call.tool_name,
                    "arguments": call.arguments,
                }),
            );
        }

        let futures = tool_calls.iter().map(|call| self.tool_executor.execute(call));
        let results = futures::future::join_all(futures).await;

        let mut messages = Vec::with_capacity(tool_calls.len());
        for (index, (call, result)) in tool_calls.iter().zip(results).enumerate() {
            let output = result.model_output();
            if !result.is_success() {
                warn!("Tool '{}' failed: {}", call.tool_name, output);
            }

            tx.send(RunEvent::ToolCallFinished {
                tool_name: call.tool_name.clone(),
                success: result.is_success(),
                output_preview: tool_output_preview(&output),
            })
            .await
            .map_err(|_| RunAgentError::Cancelled)?;
            self.log(
                config,
                "tool_result",
                serde_json::json!({
                    "tool": call.tool_name,
                    "success": result.is_success(),
                    "duration_ms": result.metadata.duration_ms,
                    "output": output,
                }),
            );

            let call_id = match &call.native_id {
                Some(id) => id.clone(),
                None => {
                    warn!("Missing native_id for tool call '{}'", call.tool_name);
                    format!("call_{}", index)
                }
            };
            messages.push(ChatMessage::tool_result(call_id, output));
        }

        Ok(messages)
    }

    fn log(&self, config: &RunConfig, event_type: &'static str, payload: serde_json::Value) {
        if !config.tracing_disabled {
            self.conversation_logger
                .log(ConversationEvent::new(event_type, payload));
        }
    }
}
