use serde::{Deserialize, Serialize};

use crate::message::MessageRole;
use crate::thread::{SubmissionId, ThreadId};

/// Describes the most recent change made to a session.
///
/// Attached to every published snapshot so subscribers can react to what
/// changed without diffing the whole state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    ThreadCreated {
        thread_id: ThreadId,
    },

    MessageAppended {
        thread_id: ThreadId,
        role: MessageRole,
    },

    TitleChanged {
        thread_id: ThreadId,
        title: String,
    },

    ThreadDeleted {
        thread_id: ThreadId,
    },

    SelectionChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        thread_id: Option<ThreadId>,
    },

    /// Contextual thread menu opened or closed
    MenuChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        thread_id: Option<ThreadId>,
    },

    AttachmentStaged {
        name: String,
    },

    AttachmentCleared,

    RequestStarted {
        thread_id: ThreadId,
        submission_id: SubmissionId,
    },

    RequestSettled {
        thread_id: ThreadId,
        submission_id: SubmissionId,
    },
}

impl SessionEvent {
    /// Thread the event refers to, if any
    pub fn thread_id(&self) -> Option<ThreadId> {
        match self {
            SessionEvent::ThreadCreated { thread_id }
            | SessionEvent::MessageAppended { thread_id, .. }
            | SessionEvent::TitleChanged { thread_id, .. }
            | SessionEvent::ThreadDeleted { thread_id }
            | SessionEvent::RequestStarted { thread_id, .. }
            | SessionEvent::RequestSettled { thread_id, .. } => Some(*thread_id),
            SessionEvent::SelectionChanged { thread_id } | SessionEvent::MenuChanged { thread_id } => {
                *thread_id
            }
            SessionEvent::AttachmentStaged { .. } | SessionEvent::AttachmentCleared => None,
        }
    }
}
