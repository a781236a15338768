use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message within a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single immutable entry in a thread's log.
///
/// Messages are created once and never edited; the fields are private so the
/// only way to change a transcript is to append a new message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Create user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text, None)
    }

    /// Create user message that references an attached file
    pub fn user_with_attachment(text: impl Into<String>, attachment_name: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text, Some(attachment_name.into()))
    }

    /// Create assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text, None)
    }

    pub fn new(role: MessageRole, text: impl Into<String>, attachment_name: Option<String>) -> Self {
        Self {
            role,
            text: text.into(),
            attachment_name,
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachment_name(&self) -> Option<&str> {
        self.attachment_name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
