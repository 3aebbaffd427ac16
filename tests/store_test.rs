//! Content store integration tests against a real temp directory.

use mimic::persona::store::{content_id, ContentStore};
use tempfile::TempDir;

fn store() -> (TempDir, ContentStore) {
    let dir = TempDir::new().unwrap();
    let store = ContentStore::new(dir.path());
    (dir, store)
}

#[test]
fn personas_are_isolated() {
    let (_dir, store) = store();
    store
        .save("Ada Lovelace", "https://example.com/a", "ada content")
        .unwrap();
    store
        .save("Grace Hopper", "https://example.com/a", "grace content")
        .unwrap();

    assert_eq!(
        store.load_all("Ada Lovelace").unwrap(),
        vec!["ada content".to_string()]
    );
    assert_eq!(
        store.load_all("Grace Hopper").unwrap(),
        vec!["grace content".to_string()]
    );
}

#[test]
fn metadata_and_bodies_stay_one_to_one() {
    let (dir, store) = store();
    store
        .save("Ada Lovelace", "https://example.com/a", "first")
        .unwrap();
    store
        .save("Ada Lovelace", "https://example.com/b", "second")
        .unwrap();
    // Overwrite of /a must not add a third body file
    store
        .save("Ada Lovelace", "https://example.com/a", "first again")
        .unwrap();

    let stats = store.stats("Ada Lovelace").unwrap();
    let body_files = std::fs::read_dir(dir.path().join("ada_lovelace").join("content"))
        .unwrap()
        .count();

    assert_eq!(stats.documents, 2);
    assert_eq!(body_files, 2);
}

#[test]
fn layout_matches_convention() {
    let (dir, store) = store();
    store
        .save("Ada Lovelace", "https://example.com/a", "body text")
        .unwrap();

    let persona_dir = dir.path().join("ada_lovelace");
    let id = content_id("https://example.com/a");

    assert!(persona_dir.join("metadata.json").is_file());
    assert!(persona_dir.join("content").join(format!("{id}.txt")).is_file());
}

#[test]
fn metadata_survives_reopen() {
    let (dir, store) = store();
    store
        .save("Ada Lovelace", "https://example.com/a", "persisted body")
        .unwrap();
    drop(store);

    // A fresh store over the same directory sees the same persona
    let reopened = ContentStore::new(dir.path());
    assert!(reopened.exists("Ada Lovelace"));
    let stats = reopened.stats("Ada Lovelace").unwrap();
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.urls, vec!["https://example.com/a".to_string()]);
}

#[test]
fn concurrent_saves_do_not_lose_updates() {
    let (_dir, store) = store();
    let store = std::sync::Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .save(
                        "Ada Lovelace",
                        &format!("https://example.com/page-{i}"),
                        &format!("content for page {i}"),
                    )
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Per-persona locking: every save lands in metadata
    assert_eq!(store.stats("Ada Lovelace").unwrap().documents, 8);
}
