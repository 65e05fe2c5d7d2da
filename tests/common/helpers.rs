// Test helper functions

use everyfind::core::config::Config;
use everyfind::core::indexer::{FilterSet, IndexingPipeline};
use everyfind::core::search::FinderKind;
use everyfind::core::services::Services;
use everyfind::core::storage::IndexStore;
use everyfind::core::types::IndexStats;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Open a store in a fresh temporary directory
///
/// Keep the `TempDir` alive for the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_store() -> (IndexStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = IndexStore::open(temp_dir.path().join("index.db")).expect("Failed to open store");
    (store, temp_dir)
}

/// Services over a temporary index, substring finder, no configured roots
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.index_path = temp_dir.path().join("index.db");
    config.search.finder = FinderKind::Substring;

    let services = Services::new(config).expect("Failed to create services");
    (Arc::new(services), temp_dir)
}

/// Index `roots` with `filters` and return the run statistics
#[allow(dead_code)] // Used in integration tests
pub fn index_tree(store: &IndexStore, roots: &[PathBuf], filters: FilterSet) -> IndexStats {
    IndexingPipeline::new(filters)
        .index_paths(store, roots, None, None)
        .expect("Indexing failed")
}

/// File names of `paths`, in order
#[allow(dead_code)] // Used in integration tests
pub fn names_of(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            Path::new(p)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}
