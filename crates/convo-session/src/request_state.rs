use std::collections::HashMap;

use chrono::{DateTime, Utc};
use convo_types::{SubmissionId, ThreadId};

/// Whether a thread is waiting on a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending {
        submission_id: SubmissionId,
        started_at: DateTime<Utc>,
    },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }
}

/// Per-thread in-flight tracking.
///
/// At most one submission per thread is pending; different threads are
/// tracked independently so background threads can keep working while
/// another one is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    pending: HashMap<ThreadId, (SubmissionId, DateTime<Utc>)>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, thread_id: ThreadId) -> RequestState {
        match self.pending.get(&thread_id) {
            Some(&(submission_id, started_at)) => RequestState::Pending {
                submission_id,
                started_at,
            },
            None => RequestState::Idle,
        }
    }

    pub fn is_pending(&self, thread_id: ThreadId) -> bool {
        self.pending.contains_key(&thread_id)
    }

    /// Mark a thread pending. Returns false if it already was.
    pub fn begin(&mut self, thread_id: ThreadId, submission_id: SubmissionId) -> bool {
        if self.pending.contains_key(&thread_id) {
            return false;
        }
        self.pending.insert(thread_id, (submission_id, Utc::now()));
        true
    }

    /// Return a thread to idle, but only if `submission_id` is the one pending
    pub fn settle(&mut self, thread_id: ThreadId, submission_id: SubmissionId) -> bool {
        match self.pending.get(&thread_id) {
            Some((pending, _)) if *pending == submission_id => {
                self.pending.remove(&thread_id);
                true
            }
            _ => false,
        }
    }

    /// Drop any tracking for a thread (used on deletion)
    pub fn forget(&mut self, thread_id: ThreadId) -> bool {
        self.pending.remove(&thread_id).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_threads(&self) -> impl Iterator<Item = ThreadId> + '_ {
        self.pending.keys().copied()
    }
}
