//! OpenAI-compatible LLM Gateway implementation
//!
//! Streams `POST {base_url}/chat/completions` with `stream: true`. The HTTP
//! body is read in a spawned task that turns SSE lines into
//! [`StreamEvent`]s and finishes with the assembled [`LlmResponse`].
//!
//! [`LlmResponse`]: wiz_domain::LlmResponse

use super::accumulator::ResponseAccumulator;
use super::protocol::{ChatCompletionRequest, ErrorEnvelope, StreamChunk, WireMessage};
use super::sse::{SseEvent, SseLineBuffer};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode, header};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};
use wiz_application::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway, StreamHandle};
use wiz_domain::util::preview;
use wiz_domain::{ModelSettings, StreamEvent};

/// Capacity of the per-round event channel.
const STREAM_BUFFER: usize = 64;

/// Connection establishment limit; the stream itself has no timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// LLM Gateway for any chat-completions API that speaks the OpenAI dialect
/// (Gemini's compatibility endpoint by default).
#[derive(Clone)]
pub struct OpenAiCompatGateway {
    client: Client,
    chat_url: String,
    api_key: String,
}

impl OpenAiCompatGateway {
    pub fn new(settings: &ModelSettings, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self::with_client(client, settings, api_key))
    }

    /// Create a gateway with an existing HTTP client
    pub fn with_client(client: Client, settings: &ModelSettings, api_key: impl Into<String>) -> Self {
        Self {
            client,
            chat_url: settings.chat_completions_url(),
            api_key: api_key.into(),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn stream_chat(&self, request: ChatRequest) -> Result<StreamHandle, GatewayError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            tools: &request.tools,
            stream: true,
        };
        if let Ok(json) = serde_json::to_string(&body) {
            trace!("request: {}", json);
        }

        debug!(
            "POST {} (model {}, {} messages)",
            self.chat_url,
            request.model,
            body.messages.len()
        );
        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump_sse(response.bytes_stream(), tx));
        Ok(StreamHandle::new(rx))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Map a non-2xx response to a gateway error carrying the API's message.
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = ErrorEnvelope::message_from(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            preview(body, 200)
        }
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(format!("{} - {}", status.as_u16(), message))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("{} - {}", status.as_u16(), message)),
    }
}

enum Flow {
    Continue,
    Done,
    Stop,
}

/// Read SSE bytes until `[DONE]` or end of body, forwarding events.
///
/// Always ends with `Completed` or `Error` unless the consumer hung up.
async fn pump_sse<S, B, E>(mut bytes: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut lines = SseLineBuffer::new();
    let mut acc = ResponseAccumulator::new();

    'read: while let Some(next) = bytes.next().await {
        let chunk = match next {
            Ok(chunk) => chunk,
            Err(e) => {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };
        for event in lines.push(chunk.as_ref()) {
            match forward(event, &mut acc, &tx).await {
                Flow::Continue => {}
                Flow::Done => break 'read,
                Flow::Stop => return,
            }
        }
    }

    if let Some(event) = lines.finish()
        && let Flow::Stop = forward(event, &mut acc, &tx).await
    {
        return;
    }

    let _ = tx.send(StreamEvent::Completed(acc.finish())).await;
}

async fn forward(
    event: SseEvent,
    acc: &mut ResponseAccumulator,
    tx: &mpsc::Sender<StreamEvent>,
) -> Flow {
    let data = match event {
        SseEvent::Done => return Flow::Done,
        SseEvent::Data(data) => data,
    };

    // Some providers report failures mid-stream as an error object.
    if let Some(message) = ErrorEnvelope::message_from(&data) {
        let _ = tx.send(StreamEvent::Error(message)).await;
        return Flow::Stop;
    }

    match serde_json::from_str::<StreamChunk>(&data) {
        Ok(chunk) => {
            for event in acc.apply(chunk) {
                if tx.send(event).await.is_err() {
                    debug!("Stream consumer dropped");
                    return Flow::Stop;
                }
            }
            Flow::Continue
        }
        Err(e) => {
            warn!("failed to parse chunk: {e}, data: {data}");
            Flow::Continue
        }
    }
}
