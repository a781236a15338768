use std::sync::Arc;

use convo_types::{Message, Thread, ThreadId};

/// Ordered collection of threads, newest first.
///
/// Every mutation replaces the `Arc` of the thread it touches instead of
/// editing it in place, so holders of an older snapshot keep seeing the old
/// value and `Arc::ptr_eq` tells them whether a thread changed.
///
/// Writes addressed to an id that is no longer present are silent no-ops:
/// late asynchronous results for deleted threads are simply dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadStore {
    threads: Vec<Arc<Thread>>,
    next_id: u64,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new thread at the front and return its id.
    ///
    /// Ids come from a counter that only moves forward, so they are never
    /// reused even after the thread holding them is deleted.
    pub fn create_thread(&mut self, first_message: Message) -> ThreadId {
        self.next_id += 1;
        let id = ThreadId::from_raw(self.next_id);
        self.threads.insert(0, Arc::new(Thread::new(id, first_message)));
        tracing::debug!(thread_id = %id, "Thread created");
        id
    }

    /// Append to a thread's log. Returns false if the thread no longer exists.
    pub fn append_message(&mut self, thread_id: ThreadId, message: Message) -> bool {
        self.replace_with(thread_id, |thread| thread.messages.push(message))
    }

    /// Overwrite a thread's title. Returns false if the thread no longer exists.
    pub fn set_title(&mut self, thread_id: ThreadId, title: impl Into<String>) -> bool {
        let title = title.into();
        self.replace_with(thread_id, |thread| thread.title = title)
    }

    /// Remove a thread. Deleting a missing id is a no-op.
    pub fn delete_thread(&mut self, thread_id: ThreadId) -> bool {
        let before = self.threads.len();
        self.threads.retain(|t| t.id != thread_id);
        let removed = self.threads.len() != before;
        if removed {
            tracing::debug!(thread_id = %thread_id, "Thread deleted");
        }
        removed
    }

    pub fn get(&self, thread_id: ThreadId) -> Option<&Arc<Thread>> {
        self.threads.iter().find(|t| t.id == thread_id)
    }

    pub fn contains(&self, thread_id: ThreadId) -> bool {
        self.get(thread_id).is_some()
    }

    /// Threads in display order (most recently created first)
    pub fn threads(&self) -> &[Arc<Thread>] {
        &self.threads
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Thread>> {
        self.threads.iter()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    fn replace_with(&mut self, thread_id: ThreadId, update: impl FnOnce(&mut Thread)) -> bool {
        let Some(slot) = self.threads.iter_mut().find(|t| t.id == thread_id) else {
            tracing::debug!(thread_id = %thread_id, "Discarding write to missing thread");
            return false;
        };

        let mut thread = Thread::clone(slot);
        update(&mut thread);
        *slot = Arc::new(thread);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_inserts_at_front() {
        let mut store = ThreadStore::new();
        let first = store.create_thread(Message::user("one"));
        let second = store.create_thread(Message::user("two"));

        let order: Vec<ThreadId> = store.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn test_append_replaces_only_target_thread() {
        let mut store = ThreadStore::new();
        let a = store.create_thread(Message::user("a"));
        let b = store.create_thread(Message::user("b"));

        let a_before = Arc::clone(store.get(a).unwrap());
        let b_before = Arc::clone(store.get(b).unwrap());

        assert!(store.append_message(a, Message::assistant("reply")));

        assert!(!Arc::ptr_eq(&a_before, store.get(a).unwrap()));
        assert!(Arc::ptr_eq(&b_before, store.get(b).unwrap()));
        // The old snapshot is untouched
        assert_eq!(a_before.messages.len(), 1);
        assert_eq!(store.get(a).unwrap().messages.len(), 2);
    }

    #[test]
    fn test_writes_to_missing_thread_are_noops() {
        let mut store = ThreadStore::new();
        let a = store.create_thread(Message::user("a"));
        assert!(store.delete_thread(a));

        let before = store.clone();
        assert!(!store.append_message(a, Message::assistant("late")));
        assert!(!store.set_title(a, "late title"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = ThreadStore::new();
        let a = store.create_thread(Message::user("a"));

        assert!(store.delete_thread(a));
        assert!(!store.delete_thread(a));
        assert!(!store.delete_thread(ThreadId::from_raw(999)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = ThreadStore::new();
        let a = store.create_thread(Message::user("a"));
        store.delete_thread(a);
        let b = store.create_thread(Message::user("b"));

        assert_ne!(a, b);
    }
}
