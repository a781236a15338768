use std::sync::Arc;

use convo_types::{Thread, ThreadId};

use crate::request_state::{RequestState, RequestTracker};
use crate::selection::ActiveSelection;
use crate::staging::{AttachmentStaging, StagedFile};
use crate::store::ThreadStore;

/// Snapshot of everything the presentation layer renders.
///
/// Cheap to clone: threads are shared behind `Arc`. Only `Session` mutates
/// it, and `revision` goes up by one for every published change.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) store: ThreadStore,
    pub(crate) selection: ActiveSelection,
    pub(crate) staging: AttachmentStaging,
    pub(crate) requests: RequestTracker,
    pub(crate) revision: u64,
}

impl SessionState {
    pub fn store(&self) -> &ThreadStore {
        &self.store
    }

    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    pub fn staging(&self) -> &AttachmentStaging {
        &self.staging
    }

    pub fn requests(&self) -> &RequestTracker {
        &self.requests
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn threads(&self) -> &[Arc<Thread>] {
        self.store.threads()
    }

    pub fn thread(&self, thread_id: ThreadId) -> Option<&Arc<Thread>> {
        self.store.get(thread_id)
    }

    pub fn active_thread_id(&self) -> Option<ThreadId> {
        self.selection.active()
    }

    pub fn active_thread(&self) -> Option<&Arc<Thread>> {
        self.selection.active().and_then(|id| self.store.get(id))
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staging.staged()
    }

    pub fn request_state(&self, thread_id: ThreadId) -> RequestState {
        self.requests.state(thread_id)
    }

    /// Whether the loading indicator should show for this thread
    pub fn is_loading(&self, thread_id: ThreadId) -> bool {
        self.requests.is_pending(thread_id)
    }
}
