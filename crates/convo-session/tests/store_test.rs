use std::collections::HashSet;

use convo_session::{Session, ThreadStore};
use convo_types::{Message, ThreadId};

/// Small deterministic generator so the operation mix is reproducible
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

#[test]
fn test_ids_unique_across_lifetime() {
    let mut store = ThreadStore::new();
    let mut seen = HashSet::new();

    for i in 0..1000 {
        let id = store.create_thread(Message::user(format!("message {}", i)));
        assert!(seen.insert(id), "duplicate id {}", id);
        // Deleting must not free the id for reuse
        if i % 3 == 0 {
            store.delete_thread(id);
        }
    }
    assert_eq!(seen.len(), 1000);
}

#[test]
fn test_newest_thread_first() {
    let mut store = ThreadStore::new();
    let a = store.create_thread(Message::user("a"));
    let b = store.create_thread(Message::user("b"));
    let c = store.create_thread(Message::user("c"));

    let order: Vec<ThreadId> = store.iter().map(|t| t.id).collect();
    assert_eq!(order, vec![c, b, a]);
}

#[test]
fn test_writes_to_deleted_threads_never_change_store() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut store = ThreadStore::new();
    let mut live: Vec<ThreadId> = Vec::new();
    let mut deleted: Vec<ThreadId> = Vec::new();

    for step in 0..2000 {
        match rng.below(5) {
            0 => live.push(store.create_thread(Message::user(format!("open {}", step)))),
            1 if !live.is_empty() => {
                let idx = rng.below(live.len() as u64) as usize;
                let id = live.swap_remove(idx);
                assert!(store.delete_thread(id));
                deleted.push(id);
            }
            2 if !live.is_empty() => {
                let id = live[rng.below(live.len() as u64) as usize];
                assert!(store.append_message(id, Message::assistant("reply")));
            }
            _ if !deleted.is_empty() => {
                let id = deleted[rng.below(deleted.len() as u64) as usize];
                let before = store.clone();
                assert!(!store.append_message(id, Message::assistant("late reply")));
                assert!(!store.set_title(id, "Late title"));
                assert_eq!(store, before);
            }
            _ => {}
        }
    }

    assert_eq!(store.len(), live.len());
    for id in deleted {
        assert!(!store.contains(id));
    }
}

#[test]
fn test_delete_is_idempotent() {
    let mut store = ThreadStore::new();
    let a = store.create_thread(Message::user("a"));
    let b = store.create_thread(Message::user("b"));

    assert!(store.delete_thread(a));
    assert!(!store.delete_thread(a));
    assert_eq!(store.len(), 1);
    assert!(store.contains(b));
}

#[test]
fn test_unchanged_threads_keep_identity() {
    let session = Session::new();
    let a = session.create_thread(Message::user("a"));
    let b = session.create_thread(Message::user("b"));
    let before = session.snapshot();

    session.append_message(b, Message::assistant("hi"));
    let after = session.snapshot();

    let a_before = before.thread(a).unwrap();
    let a_after = after.thread(a).unwrap();
    assert!(std::sync::Arc::ptr_eq(a_before, a_after));
    assert!(!std::sync::Arc::ptr_eq(
        before.thread(b).unwrap(),
        after.thread(b).unwrap()
    ));
}

#[test]
fn test_deleting_active_thread_leaves_no_selection() {
    let session = Session::new();
    let a = session.create_thread(Message::user("a"));
    let b = session.create_thread(Message::user("b"));

    session.select(a);
    session.toggle_menu(a);
    session.delete_thread(a);

    let state = session.snapshot();
    assert_eq!(state.active_thread_id(), None);
    assert_eq!(state.selection().menu_open(), None);

    // Deleting an inactive thread leaves the selection alone
    session.select(b);
    let c = session.create_thread(Message::user("c"));
    session.delete_thread(c);
    assert_eq!(session.snapshot().active_thread_id(), Some(b));
}
