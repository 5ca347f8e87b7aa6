use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::session::{FileStore, MemoryStore, SessionStore};

use super::support::user_session;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("lostfound-session-{name}-{}", std::process::id()))
}

/// Test: the file store round-trips a session and clears by removing the
/// file.
#[test]
fn file_store_round_trip() {
    let path = temp_path("round-trip");
    let store = FileStore::new(&path);

    assert!(store.get().is_none());

    store.set(user_session());
    let read_back = store.get().unwrap();
    assert_eq!(read_back, user_session());

    store.clear();
    assert!(store.get().is_none());
    assert!(!path.exists());

    // Clearing an already-clear store is not an error.
    store.clear();
}

/// Test: a malformed session file reads as logged-out instead of failing.
#[test]
fn malformed_session_file_reads_as_none() {
    let path = temp_path("malformed");
    std::fs::write(&path, "not = [valid").unwrap();

    let store = FileStore::new(&path);
    assert!(store.get().is_none());

    let _ = std::fs::remove_file(&path);
}

/// Test: listeners fire on every set and clear in this process.
#[test]
fn listeners_fire_on_set_and_clear() {
    let store = MemoryStore::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    store.subscribe(Box::new(move |_session| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    store.set(user_session());
    store.clear();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}
