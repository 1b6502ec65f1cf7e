//! Per-session conversation history.

use super::entities::{Message, Role};

/// Append-only list of turns owned by one chat session.
///
/// Turns are kept exactly in the order they were received or produced.
/// There is no way to remove, reorder or edit a turn; a new session starts
/// with a new, empty history.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Message::assistant(content));
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.turns.last()
    }

    /// Number of completed user/assistant exchanges.
    pub fn exchanges(&self) -> usize {
        self.turns
            .windows(2)
            .filter(|w| w[0].role == Role::User && w[1].role == Role::Assistant)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
