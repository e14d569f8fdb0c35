//! Conversation messages.
//!
//! A [`Conversation`] is append-only: messages are pushed in send order and are
//! never edited or removed. Each [`Message`] is immutable once created.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the chat.
    User,
    /// The agent.
    Assistant,
}

impl Role {
    /// Stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    #[serde(default = "Utc::now")]
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current instant.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::with_timestamp(role, content, Utc::now())
    }

    /// Create a message with an explicit timestamp.
    #[must_use]
    pub fn with_timestamp(
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// Shorthand for a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Author of the message.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Raw message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation instant.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether the user wrote this message.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Ordered, append-only message history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in send order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages written by the user, in order.
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_user())
    }

    /// The most recent user message, if any.
    #[must_use]
    pub fn latest_user(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_user())
    }

    /// Whether the agent has already replied at least once.
    #[must_use]
    pub fn has_assistant_turn(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::Assistant)
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl FromIterator<Message> for Conversation {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn test_message_deserialize_without_timestamp() {
        let message: Message =
            serde_json::from_str(r#"{"role":"user","content":"hello"}"#).unwrap();
        assert_eq!(message.role(), Role::User);
        assert_eq!(message.content(), "hello");
    }

    #[test]
    fn test_message_rejects_unknown_role() {
        let message: Result<Message, _> =
            serde_json::from_str(r#"{"role":"system","content":"hello"}"#);
        assert!(message.is_err());
    }

    #[test]
    fn test_latest_user_skips_assistant() {
        let conversation: Conversation = vec![
            Message::user("first"),
            Message::assistant("reply"),
            Message::user("second"),
            Message::assistant("another reply"),
        ]
        .into();

        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.latest_user().map(Message::content), Some("second"));
        assert_eq!(conversation.user_messages().count(), 2);
        assert!(conversation.has_assistant_turn());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());
        conversation.push(Message::user("a"));
        conversation.push(Message::user("b"));

        let contents: Vec<&str> = conversation.messages().iter().map(Message::content).collect();
        assert_eq!(contents, vec!["a", "b"]);
        assert!(!conversation.has_assistant_turn());
    }
}
