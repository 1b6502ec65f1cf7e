//! Assembles streamed chunks into domain stream events and a final response.

use super::protocol::{StreamChunk, WireToolCall};
use std::collections::BTreeMap;
use tracing::warn;
use wiz_domain::{ContentBlock, LlmResponse, StopReason, StreamEvent};

/// State of one completion round while its chunks arrive.
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    text: String,
    tool_calls: BTreeMap<u32, WireToolCall>,
    finish_reason: Option<String>,
    model: Option<String>,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chunk in and return the events to forward.
    pub fn apply(&mut self, chunk: StreamChunk) -> Vec<StreamEvent> {
        if self.model.is_none() {
            self.model = chunk.model;
        }

        let mut events = Vec::new();
        // Only one choice is ever requested.
        let Some(choice) = chunk.choices.into_iter().next() else {
            return events;
        };

        if let Some(content) = choice.delta.content
            && !content.is_empty()
        {
            self.text.push_str(&content);
            events.push(StreamEvent::Delta(content));
        }

        for fragment in choice.delta.tool_calls.unwrap_or_default() {
            let slot = fragment
                .index
                .unwrap_or_else(|| self.slot_without_index(&fragment));
            events.push(StreamEvent::ToolCallDelta {
                index: slot as usize,
                id: (!fragment.id.is_empty()).then(|| fragment.id.clone()),
                name: (!fragment.function.name.is_empty()).then(|| fragment.function.name.clone()),
                arguments_delta: (!fragment.function.arguments.is_empty())
                    .then(|| fragment.function.arguments.clone()),
            });
            self.tool_calls.entry(slot).or_default().merge(&fragment);
        }

        if let Some(reason) = choice.finish_reason {
            self.finish_reason = Some(reason);
        }

        events
    }

    /// Slot for a fragment that carries no `index`.
    ///
    /// A fragment with a new id opens the next slot; anything else continues
    /// the most recent call.
    fn slot_without_index(&self, fragment: &WireToolCall) -> u32 {
        match self.tool_calls.last_key_value() {
            None => 0,
            Some((&last, current)) => {
                if !fragment.id.is_empty() && !current.id.is_empty() && fragment.id != current.id {
                    last + 1
                } else {
                    last
                }
            }
        }
    }

    /// Build the assembled response.
    ///
    /// Tool calls without an id get a positional one; calls whose arguments
    /// are not valid JSON are passed on with no arguments so the tool reports
    /// what is missing.
    pub fn finish(self) -> LlmResponse {
        let mut content = Vec::new();
        if !self.text.is_empty() {
            content.push(ContentBlock::Text(self.text));
        }

        for (index, call) in self.tool_calls {
            if call.function.name.is_empty() {
                warn!("Dropping tool call {} without a function name", index);
                continue;
            }
            let input = call.parsed_arguments().unwrap_or_else(|| {
                warn!(
                    "Malformed arguments for tool '{}': {}",
                    call.function.name, call.function.arguments
                );
                Default::default()
            });
            let id = if call.id.is_empty() {
                format!("call_{}", index)
            } else {
                call.id
            };
            content.push(ContentBlock::ToolUse {
                id,
                name: call.function.name,
                input,
            });
        }

        let stop_reason = match self.finish_reason.as_deref() {
            Some(reason) => Some(StopReason::from_finish_reason(reason)),
            None if content.iter().any(|b| b.as_tool_use().is_some()) => Some(StopReason::ToolUse),
            None => None,
        };

        LlmResponse {
            content,
            stop_reason,
            model: self.model,
        }
    }
}
