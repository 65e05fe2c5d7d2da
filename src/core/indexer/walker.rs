//! File system walker with include/exclude filtering.
//!
//! Traverses a directory tree depth-first and lazily yields one
//! [`FileEntry`] per accepted file. Excluded directories are pruned
//! before they are opened. Errors on individual entries (permission
//! denied, dangling symlinks, files deleted mid-scan) are logged and
//! skipped without ending the walk.
//!
//! Directory symlinks are not descended into, so symlink cycles cannot
//! occur. A symlink to a file is stat'ed through the link.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::core::indexer::filter::{resolve_path, FilterSet};
use crate::core::indexer::progress::{notify, CancelToken, ProgressFn};
use crate::core::types::FileEntry;

/// Failure to read one filesystem entry, never surfaced past the walker
#[derive(Debug, Error)]
enum ScanAccessError {
    #[error("cannot access {path:?}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

type EntryIter<'a> = Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'a>;

/// File system walker bound to one filter set
#[derive(Debug, Clone, Default)]
pub struct FileWalker {
    filters: FilterSet,
}

impl FileWalker {
    /// Create a new file walker
    pub fn new(filters: FilterSet) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Start a lazy scan of `root`
    ///
    /// The root is expanded and resolved first. A missing root or a root
    /// that is not a directory yields an empty scan and logs an error.
    pub fn scan(&self, root: &Path) -> Scan<'_> {
        let root = resolve_path(root);

        if !root.exists() {
            tracing::error!("Path does not exist: {:?}", root);
            return Scan::empty(&self.filters, root);
        }
        if !root.is_dir() {
            tracing::error!("Path is not a directory: {:?}", root);
            return Scan::empty(&self.filters, root);
        }

        tracing::info!("Starting scan of {:?}", root);

        let filters = &self.filters;
        let prune_root = root.clone();
        let entries = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| should_descend(filters, e, &prune_root));

        Scan {
            root,
            entries: Some(Box::new(entries)),
            filters,
            progress: None,
            cancel: None,
            accepted: 0,
        }
    }

    /// Collect all matching files under `root`
    pub fn collect_files(&self, root: &Path) -> Vec<FileEntry> {
        self.scan(root).collect()
    }
}

/// Decide whether walkdir should yield (and, for directories, open) an entry
///
/// Never filters the root directory itself.
fn should_descend(filters: &FilterSet, entry: &DirEntry, root: &Path) -> bool {
    if entry.depth() == 0 || entry.path() == root {
        return true;
    }

    if !entry.file_type().is_dir() {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    let path = entry.path().to_string_lossy();
    if filters.is_excluded(&name, &path) {
        tracing::debug!("Skipping excluded directory: {:?}", entry.path());
        return false;
    }

    true
}

/// Lazy, forward-only sequence of accepted entries
///
/// Not restartable: call [`FileWalker::scan`] again for a fresh traversal.
pub struct Scan<'a> {
    root: PathBuf,
    entries: Option<EntryIter<'a>>,
    filters: &'a FilterSet,
    progress: Option<&'a ProgressFn<'a>>,
    cancel: Option<CancelToken>,
    accepted: usize,
}

impl<'a> Scan<'a> {
    fn empty(filters: &'a FilterSet, root: PathBuf) -> Self {
        Self {
            root,
            entries: None,
            filters,
            progress: None,
            cancel: None,
            accepted: 0,
        }
    }

    /// Invoke `sink(running_count, path)` after every accepted entry
    pub fn with_progress(mut self, sink: &'a ProgressFn<'a>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Stop the scan once `token` is cancelled
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Resolved root of this scan
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of entries yielded so far
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Turn a walked file into an entry, or `None` if filtered out
    fn accept(&self, entry: &DirEntry) -> Result<Option<FileEntry>, ScanAccessError> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return Ok(None);
        }

        let path = entry.path();
        let name = entry.file_name().to_string_lossy();

        if file_type.is_symlink() {
            let metadata = fs::metadata(path).map_err(|source| ScanAccessError::Stat {
                path: path.to_path_buf(),
                source,
            })?;
            if !metadata.is_file() {
                return Ok(None);
            }

            let resolved = resolve_path(path);
            if !self.filters.matches(&name, &resolved.to_string_lossy()) {
                return Ok(None);
            }
            return Ok(Some(FileEntry::from_metadata(path, &metadata)));
        }

        if !file_type.is_file() {
            return Ok(None);
        }

        if !self.filters.matches(&name, &path.to_string_lossy()) {
            return Ok(None);
        }

        let metadata = fs::metadata(path).map_err(|source| ScanAccessError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(FileEntry::from_metadata(path, &metadata)))
    }
}

impl Iterator for Scan<'_> {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        loop {
            if self.is_cancelled() {
                if self.entries.take().is_some() {
                    tracing::info!(
                        "Scan of {:?} cancelled after {} entries",
                        self.root,
                        self.accepted
                    );
                }
                return None;
            }

            let next = self.entries.as_mut()?.next();
            let Some(walked) = next else {
                tracing::info!(
                    "Scan of {:?} complete: {} entries",
                    self.root,
                    self.accepted
                );
                self.entries = None;
                return None;
            };

            let result = walked
                .map_err(ScanAccessError::from)
                .and_then(|entry| self.accept(&entry));

            match result {
                Ok(Some(file)) => {
                    self.accepted += 1;
                    notify(self.progress, self.accepted, &file.path);
                    return Some(file);
                }
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("{}", e);
                    continue;
                }
            }
        }
    }
}
