//! Message and Conversation domain types.
//!
//! These are the value objects that flow through a chat turn:
//! the user's utterance, the system context, the assistant's replies
//! (possibly carrying tool calls), and the tool results fed back in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System instructions (operating rules, guide, today's log)
    System,
    /// Tool execution result
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::System,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a tool result message, correlated to the originating call.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
            timestamp: Utc::now(),
        }
    }
}

/// A tool call embedded in an assistant message.
///
/// The `id` is the correlation token: the provider expects to see it
/// echoed back as the `tool_call_id` of the matching tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Unique ID for this tool call
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a JSON string
    pub arguments: String,
}

/// An ordered, append-only sequence of messages for one orchestration run.
///
/// The caller supplies prior history plus the new user utterance; the run
/// appends to it and hands it back. Persistence across sessions is the
/// caller's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Ordered messages
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation seeded with prior history.
    pub fn with_history(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("She woke up at 7 AM");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "She woke up at 7 AM");
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn tool_result_carries_correlation_id() {
        let msg = Message::tool_result("call_42", "WakeUp = '7:00 AM'");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_42"));
    }

    #[test]
    fn conversation_appends_in_order() {
        let mut conv = Conversation::new();
        conv.push(Message::user("first"));
        conv.push(Message::assistant("second"));
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[0].content, "first");
        assert_eq!(conv.messages[1].content, "second");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
