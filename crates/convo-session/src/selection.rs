use convo_types::ThreadId;

use crate::store::ThreadStore;

/// Which thread is displayed, plus the contextual thread menu if one is open.
///
/// Holds ids only; whether an id is valid is checked against the store at the
/// moment of selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    active: Option<ThreadId>,
    menu_open: Option<ThreadId>,
}

impl ActiveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ThreadId> {
        self.active
    }

    pub fn menu_open(&self) -> Option<ThreadId> {
        self.menu_open
    }

    pub fn is_active(&self, thread_id: ThreadId) -> bool {
        self.active == Some(thread_id)
    }

    /// Select a thread present in `store` and close any open menu.
    ///
    /// Unknown ids leave the selection untouched. Returns true if anything changed.
    pub fn select(&mut self, thread_id: ThreadId, store: &ThreadStore) -> bool {
        if !store.contains(thread_id) {
            return false;
        }
        let changed = self.active != Some(thread_id) || self.menu_open.is_some();
        self.active = Some(thread_id);
        self.menu_open = None;
        changed
    }

    pub fn clear(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Open the menu for `thread_id`, or close it if it is already the open one
    pub fn toggle_menu(&mut self, thread_id: ThreadId, store: &ThreadStore) -> bool {
        if self.menu_open == Some(thread_id) {
            self.menu_open = None;
            return true;
        }
        if !store.contains(thread_id) {
            return false;
        }
        self.menu_open = Some(thread_id);
        true
    }

    pub fn close_menu(&mut self) -> bool {
        self.menu_open.take().is_some()
    }

    /// Drop every reference to a deleted thread
    pub fn on_thread_deleted(&mut self, thread_id: ThreadId) -> bool {
        let mut changed = false;
        if self.active == Some(thread_id) {
            self.active = None;
            changed = true;
        }
        if self.menu_open == Some(thread_id) {
            self.menu_open = None;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convo_types::Message;

    fn store_with_thread() -> (ThreadStore, ThreadId) {
        let mut store = ThreadStore::new();
        let id = store.create_thread(Message::user("hi"));
        (store, id)
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let (store, _) = store_with_thread();
        let mut selection = ActiveSelection::new();

        assert!(!selection.select(ThreadId::from_raw(999), &store));
        assert_eq!(selection.active(), None);
    }

    #[test]
    fn test_select_closes_menu() {
        let (store, id) = store_with_thread();
        let mut selection = ActiveSelection::new();
        selection.toggle_menu(id, &store);
        assert_eq!(selection.menu_open(), Some(id));

        assert!(selection.select(id, &store));
        assert_eq!(selection.active(), Some(id));
        assert_eq!(selection.menu_open(), None);
    }

    #[test]
    fn test_toggle_menu_twice_closes() {
        let (store, id) = store_with_thread();
        let mut selection = ActiveSelection::new();

        assert!(selection.toggle_menu(id, &store));
        assert!(selection.toggle_menu(id, &store));
        assert_eq!(selection.menu_open(), None);
    }

    #[test]
    fn test_deleting_active_thread_clears_selection() {
        let (store, id) = store_with_thread();
        let mut selection = ActiveSelection::new();
        selection.select(id, &store);
        selection.toggle_menu(id, &store);

        assert!(selection.on_thread_deleted(id));
        assert_eq!(selection.active(), None);
        assert_eq!(selection.menu_open(), None);
    }

    #[test]
    fn test_deleting_other_thread_keeps_selection() {
        let (mut store, id) = store_with_thread();
        let other = store.create_thread(Message::user("other"));
        let mut selection = ActiveSelection::new();
        selection.select(id, &store);

        assert!(!selection.on_thread_deleted(other));
        assert_eq!(selection.active(), Some(id));
    }
}
