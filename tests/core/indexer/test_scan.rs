// Directory scanner integration tests

use crate::common::TestTree;
use everyfind::core::indexer::{CancelToken, FileWalker, FilterSet};
use std::path::Path;
use std::sync::Mutex;

#[test]
fn test_scan_is_lazy_and_complete() {
    let tree = TestTree::flat(25);
    let walker = FileWalker::default();

    let mut scan = walker.scan(tree.path());
    let first: Vec<_> = scan.by_ref().take(5).collect();
    assert_eq!(first.len(), 5);
    assert_eq!(scan.accepted(), 5);

    let rest = scan.count();
    assert_eq!(rest, 20);
}

#[test]
fn test_entries_carry_metadata() {
    let tree = TestTree::with_files(&["docs/readme.md"]);
    let entries = FileWalker::default().collect_files(tree.path());

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.filename, "readme.md");
    assert_eq!(entry.size, "docs/readme.md".len() as u64);
    assert!(entry.modified_time > 0.0);
    assert!(entry.path.starts_with('/'));
}

#[test]
fn test_progress_counts_strictly_increase() {
    let tree = TestTree::flat(12);
    let walker = FileWalker::default();
    let seen = Mutex::new(Vec::new());
    let sink = |count: usize, path: &str| {
        assert!(!path.is_empty());
        seen.lock().unwrap().push(count);
    };

    let total = walker.scan(tree.path()).with_progress(&sink).count();

    let seen = seen.into_inner().unwrap();
    assert_eq!(total, 12);
    assert_eq!(seen, (1..=12).collect::<Vec<_>>());
}

#[test]
fn test_cancellation_is_monotonic() {
    let tree = TestTree::flat(50);
    let walker = FileWalker::default();
    let token = CancelToken::new();
    let trigger = token.clone();
    let sink = move |count: usize, _path: &str| {
        if count == 10 {
            trigger.cancel();
        }
    };

    let mut scan = walker
        .scan(tree.path())
        .with_progress(&sink)
        .with_cancel(token.clone());

    let yielded = scan.by_ref().count();

    assert_eq!(yielded, 10);
    assert!(token.is_cancelled());
    // Once ended, the scan stays ended
    assert!(scan.next().is_none());
}

#[test]
fn test_missing_root_yields_nothing() {
    let walker = FileWalker::new(FilterSet::default());
    assert_eq!(walker.scan(Path::new("/definitely/not/here")).count(), 0);
}

#[test]
fn test_panicking_progress_sink_does_not_stop_scan() {
    let tree = TestTree::flat(3);
    let sink = |_count: usize, _path: &str| panic!("sink failure");

    let total = FileWalker::default()
        .scan(tree.path())
        .with_progress(&sink)
        .count();

    assert_eq!(total, 3);
}
