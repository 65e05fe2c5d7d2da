//! Unified service container for everyfind
//!
//! Provides shared access to the index store, configuration and finder.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::{CancelToken, FilterSet, IndexingPipeline, ProgressFn};
use crate::core::search::{detect_finder, Finder, SearchOutcome};
use crate::core::storage::IndexStore;
use crate::core::types::IndexStats;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Index store shared by indexing and queries
    pub store: Arc<IndexStore>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Finder resolved on first search
    finder: Arc<OnceLock<Box<dyn Finder>>>,
}

impl Services {
    /// Open the configured index and build the container
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(IndexStore::open(&config.storage.index_path)?);

        Ok(Self {
            store,
            config: Arc::new(config),
            finder: Arc::new(OnceLock::new()),
        })
    }

    /// Finder for interactive searches, detected once per process
    pub fn finder(&self) -> &dyn Finder {
        &**self
            .finder
            .get_or_init(|| detect_finder(self.config.search.finder))
    }

    /// Pipeline with the configured filters and batch size
    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        let filters = self.config.indexing.filter_set()?;
        Ok(self.pipeline_with(filters))
    }

    /// Pipeline with request-specific filters
    pub fn pipeline_with(&self, filters: FilterSet) -> IndexingPipeline {
        IndexingPipeline::new(filters).with_batch_size(self.config.indexing.commit_batch_size)
    }

    /// Index the configured roots (home directory if none)
    pub fn index_configured(
        &self,
        progress: Option<&ProgressFn<'_>>,
        cancel: Option<&CancelToken>,
    ) -> Result<IndexStats> {
        let roots: Vec<PathBuf> = self.config.indexing.effective_roots();
        self.create_pipeline()?
            .index_paths(&*self.store, &roots, progress, cancel)
    }

    /// Run `finder` over every indexed path
    ///
    /// An empty index is reported as [`SearchOutcome::IndexEmpty`] without
    /// invoking the finder.
    pub fn search(&self, finder: &dyn Finder, query: &str, multi: bool) -> Result<SearchOutcome> {
        let corpus = self.store.all_paths()?;
        if corpus.is_empty() {
            return Ok(SearchOutcome::IndexEmpty);
        }

        tracing::debug!(
            "Searching {} paths with {} finder",
            corpus.len(),
            finder.name()
        );
        Ok(finder.search(&corpus, query, multi).into())
    }

    /// Close the store; later store operations fail
    pub fn shutdown(&self) -> Result<()> {
        self.store.close()
    }
}
