//! Filesystem indexing.
//!
//! - **filter**: include/exclude matching for one entry
//! - **walker**: lazy directory scan with pruning and cancellation
//! - **progress**: progress sinks and cancellation tokens
//! - **pipeline**: scanner → store orchestration with batched commits
//! - **job**: background and periodic indexing on the tokio runtime

pub mod filter;
pub mod job;
pub mod pipeline;
pub mod progress;
pub mod walker;

pub use filter::FilterSet;
pub use job::{run_periodic, IndexJob, IndexProgress, MAX_REINDEX_PERIOD};
pub use pipeline::{index_paths, IndexingPipeline, DEFAULT_BATCH_SIZE};
pub use progress::{CancelToken, ProgressFn};
pub use walker::{FileWalker, Scan};
