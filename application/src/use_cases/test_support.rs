//! Hand-written port mocks shared by the use case tests.

use crate::ports::chat_output::ChatOutput;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway, StreamHandle};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::run_agent::RunAgentUseCase;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use wiz_domain::{
    AgentDefinition, ContentBlock, LlmResponse, ModelSettings, StopReason, StreamEvent, ToolCall,
    ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec,
};

pub(crate) const LAHORE_REPORT: &str = "📍 **Weather in Lahore**\n🌡️ Temperature: 30.0°C";

/// One scripted model round: either an immediate gateway error or a list of
/// stream events.
pub(crate) enum Round {
    Events(Vec<StreamEvent>),
    Fail(GatewayError),
}

/// Gateway that replays scripted rounds and records every request.
pub(crate) struct ScriptedGateway {
    rounds: Mutex<VecDeque<Round>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedGateway {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self {
            rounds: Mutex::new(VecDeque::from(rounds)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Rounds that each stream `fragments` and complete with their concatenation.
    pub fn replying(replies: &[&[&str]]) -> Self {
        Self::new(replies.iter().map(|f| streamed_text(f)).collect())
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn stream_chat(&self, request: ChatRequest) -> Result<StreamHandle, GatewayError> {
        self.requests.lock().unwrap().push(request);
        let round = self
            .rounds
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::Other("No more rounds".to_string()))?;

        match round {
            Round::Fail(e) => Err(e),
            Round::Events(events) => {
                let (tx, rx) = mpsc::channel(events.len().max(1));
                for event in events {
                    tx.try_send(event)
                        .map_err(|e| GatewayError::Other(e.to_string()))?;
                }
                Ok(StreamHandle::new(rx))
            }
        }
    }
}

pub(crate) fn streamed_text(fragments: &[&str]) -> Round {
    let mut events: Vec<_> = fragments
        .iter()
        .map(|f| StreamEvent::Delta(f.to_string()))
        .collect();
    events.push(StreamEvent::Completed(LlmResponse::from_text(
        fragments.concat(),
    )));
    Round::Events(events)
}

pub(crate) fn tool_round(id: &str, name: &str, args: &[(&str, &str)]) -> Round {
    let input: HashMap<String, serde_json::Value> = args
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    Round::Events(vec![StreamEvent::Completed(LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }],
        stop_reason: Some(StopReason::ToolUse),
        model: Some("test-model".to_string()),
    })])
}

/// Executor with the two weather tools and canned outputs.
pub(crate) struct MockToolExecutor {
    spec: ToolSpec,
    pub calls: Mutex<Vec<ToolCall>>,
}

impl MockToolExecutor {
    pub fn new() -> Self {
        Self {
            spec: weather_tool_spec(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for MockToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.calls.lock().unwrap().push(call.clone());
        match call.tool_name.as_str() {
            "get_weather" => ToolResult::success("get_weather", LAHORE_REPORT),
            "weather_patterns" => ToolResult::success("weather_patterns", "Jet streams..."),
            other => ToolResult::failure(
                other,
                ToolError::not_found(format!("Unknown tool: {}", other)),
            ),
        }
    }
}

pub(crate) struct MockToolSchema;

impl ToolSchemaPort for MockToolSchema {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        serde_json::json!({ "type": "function", "function": { "name": tool.name } })
    }
}

/// Records every output call; `snapshots` holds the open message after each token.
#[derive(Default)]
pub(crate) struct RecordingOutput {
    pub sent: Mutex<Vec<String>>,
    pub snapshots: Mutex<Vec<String>>,
    pub tools: Mutex<Vec<(String, bool)>>,
    open: Mutex<Option<String>>,
    pub closed: Mutex<usize>,
}

impl ChatOutput for RecordingOutput {
    fn send_message(&self, content: &str) {
        self.sent.lock().unwrap().push(content.to_string());
    }

    fn begin_message(&self) {
        *self.open.lock().unwrap() = Some(String::new());
    }

    fn stream_token(&self, token: &str) {
        let mut open = self.open.lock().unwrap();
        let message = open.get_or_insert_with(String::new);
        message.push_str(token);
        self.snapshots.lock().unwrap().push(message.clone());
    }

    fn end_message(&self) {
        if let Some(message) = self.open.lock().unwrap().take() {
            self.sent.lock().unwrap().push(message);
        }
        *self.closed.lock().unwrap() += 1;
    }

    fn tool_finished(&self, tool_name: &str, success: bool, _output_preview: &str) {
        self.tools
            .lock()
            .unwrap()
            .push((tool_name.to_string(), success));
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub events: Mutex<Vec<&'static str>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

pub(crate) fn weather_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new("weather_patterns", "Explain weather patterns")
                .with_parameter(ToolParameter::new("question", "The question", true)),
        )
        .register(
            ToolDefinition::new("get_weather", "Current weather")
                .with_parameter(ToolParameter::new("location", "City", true))
                .with_parameter(ToolParameter::new("unit", "C or F", false)),
        )
}

pub(crate) fn runner(gateway: Arc<ScriptedGateway>) -> RunAgentUseCase {
    runner_with(gateway, Arc::new(MockToolExecutor::new()))
}

pub(crate) fn runner_with(
    gateway: Arc<ScriptedGateway>,
    executor: Arc<MockToolExecutor>,
) -> RunAgentUseCase {
    RunAgentUseCase::new(
        AgentDefinition::wiz_weather(weather_tool_spec(), ModelSettings::default()),
        gateway,
        executor,
        Arc::new(MockToolSchema),
    )
}
