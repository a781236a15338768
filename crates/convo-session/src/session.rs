//! Session state container.
//!
//! `Session` owns the single mutable copy of `SessionState` inside a
//! `tokio::sync::watch` channel. Every write goes through `send_if_modified`,
//! which serializes mutations and wakes subscribers only when something
//! actually changed. Alongside the snapshot channel, each change is also
//! published as a `SessionEvent` on a broadcast channel for consumers that
//! care about what changed rather than the latest value.

use std::sync::Arc;

use convo_types::{Message, MessageRole, SessionEvent, SubmissionId, ThreadId};
use tokio::sync::{broadcast, watch};

use crate::error::SubmitRejected;
use crate::staging::StagedFile;
use crate::state::SessionState;

const EVENT_CAPACITY: usize = 256;

/// Handle to a session; clones share the same state
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<watch::Sender<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
}

/// Result of the synchronous half of a submission
#[derive(Debug)]
pub(crate) struct Accepted {
    pub thread_id: ThreadId,
    pub created_thread: bool,
    pub attachment: Option<StagedFile>,
}

impl Session {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(state),
            events,
        }
    }

    /// Receiver that is notified after every published change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Stream of individual changes, in the order they were applied
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    ///
    /// `f` runs while the state's read lock is held: calling any mutating
    /// `Session` method from inside it deadlocks. Use `snapshot()` when the
    /// caller needs to write afterwards.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.borrow())
    }

    // ------------------------------------------------------------------
    // Thread store
    // ------------------------------------------------------------------

    pub fn create_thread(&self, first_message: Message) -> ThreadId {
        self.mutate(|state, events| {
            let thread_id = state.store.create_thread(first_message);
            events.push(SessionEvent::ThreadCreated { thread_id });
            thread_id
        })
    }

    /// Append to a thread; silently ignored if the thread was deleted
    pub fn append_message(&self, thread_id: ThreadId, message: Message) -> bool {
        self.mutate(|state, events| {
            let role = message.role();
            let appended = state.store.append_message(thread_id, message);
            if appended {
                events.push(SessionEvent::MessageAppended { thread_id, role });
            }
            appended
        })
    }

    /// Overwrite a title; silently ignored if the thread was deleted
    pub fn set_title(&self, thread_id: ThreadId, title: impl Into<String>) -> bool {
        let title = title.into();
        self.mutate(|state, events| {
            let applied = state.store.set_title(thread_id, title.clone());
            if applied {
                events.push(SessionEvent::TitleChanged { thread_id, title });
            }
            applied
        })
    }

    /// Remove a thread along with any selection, menu or request state tied to it
    pub fn delete_thread(&self, thread_id: ThreadId) -> bool {
        self.mutate(|state, events| {
            if !state.store.delete_thread(thread_id) {
                return false;
            }
            events.push(SessionEvent::ThreadDeleted { thread_id });

            let was_active = state.selection.is_active(thread_id);
            let had_menu = state.selection.menu_open() == Some(thread_id);
            if state.selection.on_thread_deleted(thread_id) {
                if was_active {
                    events.push(SessionEvent::SelectionChanged { thread_id: None });
                }
                if had_menu {
                    events.push(SessionEvent::MenuChanged { thread_id: None });
                }
            }
            state.requests.forget(thread_id);
            true
        })
    }

    // ------------------------------------------------------------------
    // Active selection
    // ------------------------------------------------------------------

    pub fn select(&self, thread_id: ThreadId) -> bool {
        self.mutate(|state, events| {
            let had_menu = state.selection.menu_open().is_some();
            let was_active = state.selection.is_active(thread_id);
            let changed = state.selection.select(thread_id, &state.store);
            if changed {
                if !was_active {
                    events.push(SessionEvent::SelectionChanged {
                        thread_id: Some(thread_id),
                    });
                }
                if had_menu {
                    events.push(SessionEvent::MenuChanged { thread_id: None });
                }
            }
            changed
        })
    }

    pub fn clear_selection(&self) -> bool {
        self.mutate(|state, events| {
            let cleared = state.selection.clear();
            if cleared {
                events.push(SessionEvent::SelectionChanged { thread_id: None });
            }
            cleared
        })
    }

    pub fn toggle_menu(&self, thread_id: ThreadId) -> bool {
        self.mutate(|state, events| {
            let changed = state.selection.toggle_menu(thread_id, &state.store);
            if changed {
                events.push(SessionEvent::MenuChanged {
                    thread_id: state.selection.menu_open(),
                });
            }
            changed
        })
    }

    /// Back to the empty state: no thread shown, no menu, nothing staged
    pub fn go_to_landing(&self) {
        self.mutate(|state, events| {
            if state.selection.clear() {
                events.push(SessionEvent::SelectionChanged { thread_id: None });
            }
            if state.selection.close_menu() {
                events.push(SessionEvent::MenuChanged { thread_id: None });
            }
            if state.staging.clear() {
                events.push(SessionEvent::AttachmentCleared);
            }
        })
    }

    // ------------------------------------------------------------------
    // Attachment staging
    // ------------------------------------------------------------------

    pub fn stage(&self, file: StagedFile) {
        self.mutate(|state, events| {
            events.push(SessionEvent::AttachmentStaged {
                name: file.name().to_string(),
            });
            state.staging.stage(file);
        })
    }

    pub fn clear_staged(&self) -> bool {
        self.mutate(|state, events| {
            let cleared = state.staging.clear();
            if cleared {
                events.push(SessionEvent::AttachmentCleared);
            }
            cleared
        })
    }

    // ------------------------------------------------------------------
    // Submission bookkeeping (driven by the orchestrator)
    // ------------------------------------------------------------------

    /// Validate a submission and record its user message in one transition.
    ///
    /// Creates and selects a thread when none is active, consumes the staged
    /// attachment and marks the target thread pending, all before any
    /// network call is made.
    pub(crate) fn begin_submission(
        &self,
        text: &str,
        submission_id: SubmissionId,
    ) -> Result<Accepted, SubmitRejected> {
        self.mutate(|state, events| {
            if text.is_empty() && !state.staging.is_staged() {
                return Err(SubmitRejected::Empty);
            }

            let active = state
                .selection
                .active()
                .filter(|id| state.store.contains(*id));
            if let Some(thread_id) = active {
                if state.requests.is_pending(thread_id) {
                    return Err(SubmitRejected::ThreadBusy(thread_id));
                }
            }

            let attachment = state.staging.take();
            if attachment.is_some() {
                events.push(SessionEvent::AttachmentCleared);
            }
            let message = match &attachment {
                Some(file) => Message::user_with_attachment(text, file.name()),
                None => Message::user(text),
            };

            let (thread_id, created_thread) = match active {
                Some(thread_id) => {
                    state.store.append_message(thread_id, message);
                    events.push(SessionEvent::MessageAppended {
                        thread_id,
                        role: MessageRole::User,
                    });
                    (thread_id, false)
                }
                None => {
                    let thread_id = state.store.create_thread(message);
                    events.push(SessionEvent::ThreadCreated { thread_id });
                    state.selection.select(thread_id, &state.store);
                    events.push(SessionEvent::SelectionChanged {
                        thread_id: Some(thread_id),
                    });
                    (thread_id, true)
                }
            };

            state.requests.begin(thread_id, submission_id);
            events.push(SessionEvent::RequestStarted {
                thread_id,
                submission_id,
            });

            Ok(Accepted {
                thread_id,
                created_thread,
                attachment,
            })
        })
    }

    /// Record the end of a reply in one transition: optional assistant
    /// message, then back to idle. Returns whether the message was appended.
    pub(crate) fn complete_reply(
        &self,
        thread_id: ThreadId,
        submission_id: SubmissionId,
        reply: Option<Message>,
    ) -> bool {
        self.mutate(|state, events| {
            let appended = match reply {
                Some(message) => {
                    let role = message.role();
                    let appended = state.store.append_message(thread_id, message);
                    if appended {
                        events.push(SessionEvent::MessageAppended { thread_id, role });
                    }
                    appended
                }
                None => false,
            };

            if state.requests.settle(thread_id, submission_id) {
                events.push(SessionEvent::RequestSettled {
                    thread_id,
                    submission_id,
                });
            }
            appended
        })
    }

    /// Apply `f` under the sender's lock and, if it recorded any event,
    /// bump the revision and broadcast the events before releasing the lock
    fn mutate<R>(&self, f: impl FnOnce(&mut SessionState, &mut Vec<SessionEvent>) -> R) -> R {
        let mut events = Vec::new();
        let mut output = None;

        self.state.send_if_modified(|state| {
            output = Some(f(state, &mut events));
            if events.is_empty() {
                return false;
            }
            state.revision += 1;
            tracing::debug!(revision = state.revision, changes = events.len(), "Session updated");
            // Published under the lock so concurrent writers cannot reorder events.
            // No subscribers is fine.
            for event in events.drain(..) {
                let _ = self.events.send(event);
            }
            true
        });

        match output {
            Some(output) => output,
            None => unreachable!("send_if_modified always runs its closure"),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
