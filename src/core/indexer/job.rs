//! Background indexing.
//!
//! An [`IndexJob`] runs one [`IndexingPipeline`] call on the blocking
//! thread pool and streams progress back over an unbounded channel, so
//! the worker never waits on the consumer. [`run_periodic`] repeats a job
//! on a fixed interval until a shutdown future resolves.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::error::{EveryfindError, Result};
use crate::core::indexer::pipeline::IndexingPipeline;
use crate::core::indexer::progress::CancelToken;
use crate::core::storage::IndexStore;
use crate::core::types::IndexStats;

/// Progress notification from a running job
#[derive(Debug, Clone, PartialEq)]
pub struct IndexProgress {
    /// Running count across all roots of the job
    pub count: usize,
    pub path: String,
}

/// Handle to an indexing run on a background worker
pub struct IndexJob {
    cancel: CancelToken,
    progress: mpsc::UnboundedReceiver<IndexProgress>,
    handle: JoinHandle<Result<IndexStats>>,
}

impl IndexJob {
    /// Start indexing `roots` into `store`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        store: Arc<IndexStore>,
        pipeline: Arc<IndexingPipeline>,
        roots: Vec<PathBuf>,
    ) -> Self {
        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let token = cancel.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let sink = move |count: usize, path: &str| {
                // Receiver dropped means nobody is listening; keep indexing
                let _ = tx.send(IndexProgress {
                    count,
                    path: path.to_string(),
                });
            };
            pipeline.index_paths(&*store, &roots, Some(&sink), Some(&token))
        });

        Self {
            cancel,
            progress: rx,
            handle,
        }
    }

    /// Token that stops this job when cancelled
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Next progress notification, or `None` once the worker is done
    pub async fn next_progress(&mut self) -> Option<IndexProgress> {
        self.progress.recv().await
    }

    /// Wait for the worker and return its statistics
    ///
    /// Undelivered progress notifications are dropped.
    pub async fn wait(self) -> Result<IndexStats> {
        let IndexJob {
            handle, progress, ..
        } = self;
        drop(progress);

        handle.await.map_err(|e| {
            EveryfindError::StorageError(format!("Indexing worker failed: {e}"))
        })?
    }
}

/// Longest period between scheduled runs
pub const MAX_REINDEX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Re-run indexing every `interval` until `shutdown` resolves
///
/// The first run starts immediately. `interval` is clamped between one
/// second and [`MAX_REINDEX_PERIOD`]. A shutdown during a run cancels it
/// and waits for the worker to stop. Failed runs are logged; a closed
/// store ends the loop with an error.
///
/// # Returns
///
/// Number of runs started
pub async fn run_periodic<F>(
    store: Arc<IndexStore>,
    pipeline: Arc<IndexingPipeline>,
    roots: Vec<PathBuf>,
    interval: Duration,
    shutdown: F,
) -> Result<usize>
where
    F: Future<Output = ()>,
{
    let period = interval.clamp(Duration::from_secs(1), MAX_REINDEX_PERIOD);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut runs = 0usize;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        runs += 1;
        tracing::info!("Starting scheduled reindex #{}", runs);

        let job = IndexJob::spawn(Arc::clone(&store), Arc::clone(&pipeline), roots.clone());
        let token = job.cancel_token();
        let wait = job.wait();
        tokio::pin!(wait);

        let (result, stop) = tokio::select! {
            result = &mut wait => (result, false),
            _ = &mut shutdown => {
                token.cancel();
                (wait.await, true)
            }
        };

        match result {
            Ok(stats) => tracing::info!(
                "Scheduled reindex #{} finished: {} files in {}ms",
                runs,
                stats.files_indexed,
                stats.duration_ms
            ),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => tracing::error!("Scheduled reindex #{} failed: {}", runs, e),
        }

        if stop {
            break;
        }
    }

    tracing::info!("Periodic reindexing stopped after {} run(s)", runs);
    Ok(runs)
}
