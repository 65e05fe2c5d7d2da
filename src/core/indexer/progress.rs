//! Progress reporting and cooperative cancellation for indexing runs.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress sink: `(running_count, current_path)`
///
/// The lifetime lets sinks borrow from the caller's stack.
pub type ProgressFn<'a> = dyn Fn(usize, &str) + Send + Sync + 'a;

/// Shared cancellation signal for one indexing run
///
/// Clones observe the same flag. The scanner polls it once per file.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Invoke a progress sink, discarding any panic it raises
pub(crate) fn notify(sink: Option<&ProgressFn<'_>>, count: usize, path: &str) {
    let Some(sink) = sink else {
        return;
    };

    if catch_unwind(AssertUnwindSafe(|| sink(count, path))).is_err() {
        tracing::debug!("Progress callback panicked at {} ({}), ignoring", count, path);
    }
}
