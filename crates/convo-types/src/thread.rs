use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Title a thread carries until its generated title arrives
pub const PLACEHOLDER_TITLE: &str = "...";

/// Opaque thread identifier.
///
/// Allocated from a per-store sequence, so two ids handed out by the same store
/// never compare equal no matter how quickly they are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(u64);

impl ThreadId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Correlates the log lines and request state of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(uuid::Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One independent conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Thread {
    /// New thread seeded with the message that triggered its creation
    pub fn new(id: ThreadId, first_message: Message) -> Self {
        Self {
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            messages: vec![first_message],
            created_at: Utc::now(),
        }
    }

    pub fn has_placeholder_title(&self) -> bool {
        self.title == PLACEHOLDER_TITLE
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_thread_has_placeholder_and_first_message() {
        let thread = Thread::new(ThreadId::from_raw(7), Message::user("hello"));
        assert!(thread.has_placeholder_title());
        assert_eq!(thread.messages.len(), 1);
        assert_eq!(thread.last_message().map(|m| m.text()), Some("hello"));
    }

    #[test]
    fn test_thread_id_display() {
        assert_eq!(ThreadId::from_raw(42).to_string(), "t42");
    }

    #[test]
    fn test_submission_ids_differ() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }
}
