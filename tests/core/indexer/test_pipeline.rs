// Indexing pipeline integration tests

use crate::common::{create_test_store, index_tree, TestTree};
use everyfind::core::indexer::{index_paths, CancelToken, FilterSet, IndexJob, IndexingPipeline};
use std::sync::{Arc, Mutex};

#[test]
fn test_two_roots_in_one_call() {
    let first = TestTree::with_files(&["1.txt", "2.txt", "3.txt"]);
    let second = TestTree::with_files(&["4.txt", "5.txt", "6.txt"]);
    let (store, _dir) = create_test_store();

    let total = index_paths(
        &store,
        &[first.root(), second.root()],
        FilterSet::default(),
        None,
        None,
    )
    .unwrap();

    assert_eq!(total, 6);
    assert_eq!(store.len().unwrap(), 6);
}

#[test]
fn test_reindexing_is_idempotent() {
    let tree = TestTree::basic();
    let (store, _dir) = create_test_store();

    index_tree(&store, &[tree.root()], FilterSet::default());
    let before = store.all_paths().unwrap();
    index_tree(&store, &[tree.root()], FilterSet::default());
    let after = store.all_paths().unwrap();

    assert_eq!(before, after);
    assert_eq!(after.len(), 3);
}

#[test]
fn test_reindex_updates_metadata_in_place() {
    let tree = TestTree::with_files(&["grow.txt"]);
    let (store, _dir) = create_test_store();

    index_tree(&store, &[tree.root()], FilterSet::default());
    let first = store.all_entries().unwrap();

    std::fs::write(&tree.files[0], "much longer content than before").unwrap();
    index_tree(&store, &[tree.root()], FilterSet::default());
    let second = store.all_entries().unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].size, "much longer content than before".len() as u64);
    assert!(second[0].indexed_at >= first[0].indexed_at);
}

#[test]
fn test_batches_commit_across_boundaries() {
    let tree = TestTree::flat(23);
    let (store, _dir) = create_test_store();

    let stats = IndexingPipeline::new(FilterSet::default())
        .with_batch_size(5)
        .index_paths(&store, &[tree.root()], None, None)
        .unwrap();

    assert_eq!(stats.files_indexed, 23);
    assert_eq!(store.pending().unwrap(), 0);
    assert_eq!(store.len().unwrap(), 23);
}

#[test]
fn test_cancel_keeps_committed_entries() {
    let tree = TestTree::flat(40);
    let (store, _dir) = create_test_store();
    let token = CancelToken::new();
    let trigger = token.clone();
    let sink = move |count: usize, _path: &str| {
        if count == 12 {
            trigger.cancel();
        }
    };

    let stats = IndexingPipeline::new(FilterSet::default())
        .with_batch_size(5)
        .index_paths(&store, &[tree.root()], Some(&sink), Some(&token))
        .unwrap();

    assert!(stats.cancelled);
    assert_eq!(stats.files_indexed, 12);
    assert_eq!(store.len().unwrap(), 12);
}

#[test]
fn test_progress_counts_continue_across_roots() {
    let first = TestTree::flat(4);
    let second = TestTree::flat(3);
    let (store, _dir) = create_test_store();
    let seen = Mutex::new(Vec::new());
    let sink = |count: usize, _path: &str| seen.lock().unwrap().push(count);

    IndexingPipeline::new(FilterSet::default())
        .index_paths(&store, &[first.root(), second.root()], Some(&sink), None)
        .unwrap();

    assert_eq!(seen.into_inner().unwrap(), (1..=7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_background_job_shares_store_with_queries() {
    let tree = TestTree::flat(30);
    let (store, _dir) = create_test_store();
    let store = Arc::new(store);
    let pipeline = Arc::new(IndexingPipeline::new(FilterSet::default()).with_batch_size(10));

    let mut job = IndexJob::spawn(Arc::clone(&store), pipeline, vec![tree.root()]);

    let mut last = 0;
    while let Some(progress) = job.next_progress().await {
        assert!(progress.count > last);
        last = progress.count;
        // Queries stay usable while indexing runs
        assert!(store.len().unwrap() <= 30);
    }

    let stats = job.wait().await.unwrap();
    assert_eq!(stats.files_indexed, 30);
    assert_eq!(last, 30);
    assert_eq!(store.search_substring("file_0029").unwrap().len(), 1);
}
