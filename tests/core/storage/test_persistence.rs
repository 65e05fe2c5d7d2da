// Store persistence across handles

use crate::common::{index_tree, TestTree};
use everyfind::core::indexer::FilterSet;
use everyfind::core::storage::IndexStore;
use everyfind::EveryfindError;
use tempfile::TempDir;

#[test]
fn test_entries_survive_reopen() {
    let tree = TestTree::basic();
    let dir = TempDir::new().unwrap();
    let location = dir.path().join("index.db");

    let store = IndexStore::open(&location).unwrap();
    index_tree(&store, &[tree.root()], FilterSet::default());
    let before = store.all_paths().unwrap();
    store.close().unwrap();

    let reopened = IndexStore::open(&location).unwrap();
    assert_eq!(reopened.all_paths().unwrap(), before);
}

#[test]
fn test_uncommitted_entries_are_lost_on_close() {
    let dir = TempDir::new().unwrap();
    let location = dir.path().join("index.db");

    let store = IndexStore::open(&location).unwrap();
    let tree = TestTree::with_files(&["kept.txt"]);
    index_tree(&store, &[tree.root()], FilterSet::default());

    let entries = store.all_entries().unwrap();
    let mut extra = entries[0].clone();
    extra.path = format!("{}.bak", extra.path);
    store.upsert(&extra).unwrap();
    store.close().unwrap();

    let reopened = IndexStore::open(&location).unwrap();
    assert_eq!(reopened.len().unwrap(), 1);
}

#[test]
fn test_open_twice_sequentially_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let location = dir.path().join("index.db");

    IndexStore::open(&location).unwrap().close().unwrap();
    let store = IndexStore::open(&location).unwrap();
    assert!(store.is_empty().unwrap());
}

#[test]
fn test_open_unusable_location() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();

    let result = IndexStore::open(blocker.join("index.db"));
    assert!(matches!(result, Err(EveryfindError::StorageError(_))));
}

#[test]
fn test_stats_reflect_contents() {
    let tree = TestTree::flat(4);
    let dir = TempDir::new().unwrap();
    let store = IndexStore::open(dir.path().join("index.db")).unwrap();

    let empty = store.stats().unwrap();
    assert_eq!(empty.entry_count, 0);
    assert!(empty.last_indexed_at.is_none());

    index_tree(&store, &[tree.root()], FilterSet::default());
    let stats = store.stats().unwrap();
    assert_eq!(stats.entry_count, 4);
    assert!(stats.size_bytes > 0);
    assert!(stats.last_indexed_at.unwrap() > 0.0);
    assert!(stats.location.ends_with("index.db"));
}
