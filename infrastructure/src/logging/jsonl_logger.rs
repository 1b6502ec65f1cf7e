//! JSONL transcript of chat sessions.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying `type`,
//! `timestamp` and the `session` it belongs to. The file is opened in append
//! mode so successive runs share one transcript.

use chrono::{Local, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use wiz_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};

use crate::config::APP_DIR;

/// File name used when no transcript path is configured.
const DEFAULT_FILE_NAME: &str = "conversations.jsonl";

/// Conversation logger that appends one JSON object per line.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session: String,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`.
    ///
    /// Missing parent directories are created. Returns `None` when the file
    /// cannot be opened; the chat then runs without a transcript.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session: Local::now().format("%Y%m%d-%H%M%S").to_string(),
        })
    }

    /// `$XDG_DATA_HOME/wiz-weather/conversations.jsonl` (or platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier stamped on every line written by this logger.
    pub fn session(&self) -> &str {
        &self.session
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("session".to_string(), Value::from(self.session.as_str()));
        map.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "model_request",
            json!({"model": "gemini-2.0-flash", "messages": 3}),
        ));
        logger.log(ConversationEvent::new(
            "tool_call",
            json!({"tool": "get_weather", "args": {"location": "Lahore"}}),
        ));
        let session = logger.session().to_string();
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line["timestamp"].is_string());
            assert_eq!(line["session"], session.as_str());
        }
        assert_eq!(lines[0]["type"], "model_request");
        assert_eq!(lines[0]["messages"], 3);
        assert_eq!(lines[1]["type"], "tool_call");
        assert_eq!(lines[1]["args"]["location"], "Lahore");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("note", json!("just a string")));
        logger.log(ConversationEvent::new("empty", Value::Null));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["data"], "just a string");
        assert_eq!(lines[1]["type"], "empty");
        assert!(lines[1].get("data").is_none());
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("transcript.jsonl");

        for turn in ["first", "second"] {
            let logger = JsonlConversationLogger::open(&path).unwrap();
            logger.log(ConversationEvent::new("user_message", json!({"text": turn})));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["text"], "first");
        assert_eq!(lines[1]["text"], "second");
    }

    #[test]
    fn test_unopenable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the transcript file.
        assert!(JsonlConversationLogger::open(dir.path()).is_none());
    }

    #[test]
    fn test_default_path() {
        if let Some(path) = JsonlConversationLogger::default_path() {
            assert!(path.ends_with("wiz-weather/conversations.jsonl"));
        }
    }
}
