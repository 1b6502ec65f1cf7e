//! Server-sent events line buffering.
//!
//! Network chunks do not respect line boundaries, so bytes are buffered until
//! a full line is available. Only `data:` fields are meaningful for chat
//! completions; comments, `event:` and `id:` lines are ignored.

/// One meaningful SSE payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// JSON payload of a `data:` line
    Data(String),
    /// The `[DONE]` sentinel
    Done,
}

/// Incremental SSE parser.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk and return every complete event it finished.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<SseEvent> {
        if self.pending.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.pending);
        parse_line(&line)
    }
}

fn parse_line(raw: &[u8]) -> Option<SseEvent> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches(['\r', '\n']);
    let data = line.strip_prefix("data:")?;
    let data = data.strip_prefix(' ').unwrap_or(data);

    if data.trim() == "[DONE]" {
        return Some(SseEvent::Done);
    }
    if data.trim().is_empty() {
        return None;
    }
    Some(SseEvent::Data(data.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines() {
        let mut buffer = SseLineBuffer::new();
        let events = buffer.push(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\ndata: [DONE]\n\n");
        assert_eq!(
            events,
            vec![
                SseEvent::Data("{\"a\":1}".into()),
                SseEvent::Data("{\"b\":2}".into()),
                SseEvent::Done,
            ]
        );
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut buffer = SseLineBuffer::new();
        assert!(buffer.push(b"data: {\"conte").is_empty());
        assert!(buffer.push(b"nt\":\"Hel").is_empty());
        let events = buffer.push(b"lo\"}\r\n\r\n");
        assert_eq!(events, vec![SseEvent::Data("{\"content\":\"Hello\"}".into())]);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let line = "data: 🌦️\n".as_bytes();
        let mut buffer = SseLineBuffer::new();
        assert!(buffer.push(&line[..8]).is_empty());
        let events = buffer.push(&line[8..]);
        assert_eq!(events, vec![SseEvent::Data("🌦️".into())]);
    }

    #[test]
    fn test_non_data_lines_ignored() {
        let mut buffer = SseLineBuffer::new();
        let events = buffer.push(b": keep-alive\nevent: message\nid: 7\ndata:{\"x\":1}\n");
        assert_eq!(events, vec![SseEvent::Data("{\"x\":1}".into())]);
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut buffer = SseLineBuffer::new();
        assert!(buffer.push(b"data: [DONE]").is_empty());
        assert_eq!(buffer.finish(), Some(SseEvent::Done));
        assert_eq!(buffer.finish(), None);
    }
}
