//! Indexing pipeline orchestration.
//!
//! Drives the scanner into the store, one root at a time:
//! 1. Walk the root with the shared filter set
//! 2. Upsert each accepted entry
//! 3. Commit every `batch_size` upserts and at the end of the root
//!
//! The store's write lock is held for the whole run and released at the
//! end, so other processes can index between runs.
//!
//! Progress counts run across roots, so a sink sees one increasing
//! sequence for the whole call.

use std::path::PathBuf;
use std::time::Instant;

use crate::core::error::Result;
use crate::core::indexer::filter::FilterSet;
use crate::core::indexer::progress::{CancelToken, ProgressFn};
use crate::core::indexer::walker::FileWalker;
use crate::core::storage::{EntrySink, IndexStore};
use crate::core::types::IndexStats;

/// Upserts between commits
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Orchestrates the indexing pipeline
#[derive(Debug, Clone)]
pub struct IndexingPipeline {
    walker: FileWalker,
    batch_size: usize,
}

impl IndexingPipeline {
    /// Create a pipeline that commits every [`DEFAULT_BATCH_SIZE`] upserts
    pub fn new(filters: FilterSet) -> Self {
        Self {
            walker: FileWalker::new(filters),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the commit batch size (minimum 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn walker(&self) -> &FileWalker {
        &self.walker
    }

    /// Index every root in order
    ///
    /// Entries the store rejects are logged and skipped. A batch whose
    /// commit fails is counted as failed and the run goes on. Cancellation
    /// ends the current root (its pending batch is still committed) and
    /// skips the remaining ones.
    ///
    /// # Returns
    ///
    /// Run statistics, or an error if the store is closed or its write
    /// lock is held elsewhere
    pub fn index_paths<S: EntrySink + ?Sized>(
        &self,
        store: &S,
        roots: &[PathBuf],
        progress: Option<&ProgressFn<'_>>,
        cancel: Option<&CancelToken>,
    ) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::default();
        let mut seen = 0usize;

        tracing::info!("Indexing {} root(s)", roots.len());
        store.acquire_writer()?;

        for root in roots {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                stats.cancelled = true;
                break;
            }

            let base = seen;
            let running = move |count: usize, path: &str| {
                if let Some(sink) = progress {
                    sink(base + count, path);
                }
            };

            let mut scan = self.walker.scan(root);
            if progress.is_some() {
                scan = scan.with_progress(&running);
            }
            if let Some(token) = cancel {
                scan = scan.with_cancel(token.clone());
            }

            let mut batch = 0usize;
            for entry in scan.by_ref() {
                match store.upsert(&entry) {
                    Ok(()) => {
                        stats.files_indexed += 1;
                        batch += 1;
                    }
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        tracing::warn!("Failed to index {}: {}", entry.path, e);
                        stats.files_failed += 1;
                    }
                }

                if batch >= self.batch_size {
                    commit_batch(store, batch, &mut stats)?;
                    batch = 0;
                }
            }

            seen += scan.accepted();
            stats.roots_scanned += 1;
            commit_batch(store, batch, &mut stats)?;

            if cancel.is_some_and(CancelToken::is_cancelled) {
                stats.cancelled = true;
                tracing::info!("Indexing cancelled during {:?}", scan.root());
                break;
            }
        }

        if let Err(e) = store.release_writer() {
            tracing::warn!("Failed to release index writer: {}", e);
        }
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} files indexed, {} failed, {} root(s) in {}ms",
            stats.files_indexed,
            stats.files_failed,
            stats.roots_scanned,
            stats.duration_ms
        );

        Ok(stats)
    }
}

/// Commit `batch` upserts; on a non-fatal failure move them to `files_failed`
fn commit_batch<S: EntrySink + ?Sized>(
    store: &S,
    batch: usize,
    stats: &mut IndexStats,
) -> Result<()> {
    match store.commit() {
        Ok(()) => {
            tracing::debug!("Committed batch of {} entries", batch);
            Ok(())
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::error!("Failed to commit batch of {} entries: {}", batch, e);
            stats.files_indexed -= batch;
            stats.files_failed += batch;
            Ok(())
        }
    }
}

/// Index `roots` into `store` and return the number of entries written
pub fn index_paths(
    store: &IndexStore,
    roots: &[PathBuf],
    filters: FilterSet,
    progress: Option<&ProgressFn<'_>>,
    cancel: Option<&CancelToken>,
) -> Result<usize> {
    IndexingPipeline::new(filters)
        .index_paths(store, roots, progress, cancel)
        .map(|stats| stats.files_indexed)
}
