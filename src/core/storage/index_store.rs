//! Tantivy-backed store for file metadata.
//!
//! One document per path. `path` is indexed as a raw term so an upsert
//! can delete the previous document for the same path before adding the
//! new one; lowercased copies of `path` and `filename` back the
//! case-insensitive substring query.
//!
//! All access goes through a mutex owned by the handle, so one
//! [`IndexStore`] can be shared (`Arc`) between a background indexing
//! worker and foreground queries.
//!
//! Opening a store only creates a reader. The Tantivy writer, and with it
//! the directory's exclusive write lock, is taken on the first write and
//! given back by [`IndexStore::release_writer`], so any number of handles
//! (in this or other processes) can query while one of them indexes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tantivy::collector::DocSetCollector;
use tantivy::directory::MmapDirectory;
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query, RegexQuery};
use tantivy::schema::{Field, Schema, Value, STORED, STRING};
use tantivy::{
    doc, DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument,
    Term,
};

use crate::core::error::{EveryfindError, Result};
use crate::core::types::{now_seconds, FileEntry, StoreStats};

/// Writer heap size (single indexing thread)
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Longest lowercased needle answered with a regex query
///
/// Tantivy caps regex automata at 1000 states; longer needles are matched
/// by scanning the stored entries instead.
const MAX_REGEX_NEEDLE_BYTES: usize = 48;

/// Create the Tantivy schema for file entries
///
/// Fields:
/// - path: Absolute path, unique key (STRING | STORED)
/// - filename: Base name (STRING | STORED)
/// - path_lower: Lowercased path for substring lookup (STRING)
/// - filename_lower: Lowercased base name for substring lookup (STRING)
/// - size: Byte count (u64 | STORED)
/// - modified_time: Seconds since epoch (f64 | STORED)
/// - indexed_at: Seconds since epoch of the last upsert (f64 | STORED)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    // Keys
    builder.add_text_field("path", STRING | STORED);
    builder.add_text_field("filename", STRING | STORED);

    // Lookup
    builder.add_text_field("path_lower", STRING);
    builder.add_text_field("filename_lower", STRING);

    // Metadata
    builder.add_u64_field("size", STORED);
    builder.add_f64_field("modified_time", STORED);
    builder.add_f64_field("indexed_at", STORED);

    builder.build()
}

/// Resolved schema fields
#[derive(Debug, Clone, Copy)]
struct Fields {
    path: Field,
    filename: Field,
    path_lower: Field,
    filename_lower: Field,
    size: Field,
    modified_time: Field,
    indexed_at: Field,
}

impl Fields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let get = |name: &str| {
            schema.get_field(name).map_err(|e| {
                EveryfindError::StorageError(format!("Missing {name} field: {e}"))
            })
        };

        Ok(Self {
            path: get("path")?,
            filename: get("filename")?,
            path_lower: get("path_lower")?,
            filename_lower: get("filename_lower")?,
            size: get("size")?,
            modified_time: get("modified_time")?,
            indexed_at: get("indexed_at")?,
        })
    }
}

/// Open index state, dropped on close
struct StoreInner {
    index: Index,
    fields: Fields,
    /// Present while this handle holds the write lock
    writer: Option<IndexWriter>,
    reader: IndexReader,
    /// Upserts since the last commit
    pending: usize,
}

impl StoreInner {
    fn searcher(&self) -> Searcher {
        self.reader.searcher()
    }

    /// The writer, created on first use
    fn writer(&mut self) -> Result<&mut IndexWriter> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => {
                let writer = self
                    .index
                    .writer_with_num_threads(1, WRITER_HEAP_BYTES)
                    .map_err(|e| {
                        EveryfindError::StorageError(format!("Failed to create writer: {e}"))
                    })?;
                tracing::debug!("Index writer acquired");
                writer
            }
        };
        Ok(self.writer.insert(writer))
    }

    /// Commit pending writes, or roll them back if the commit fails
    fn commit(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.commit() {
                let discarded = std::mem::take(&mut self.pending);
                if let Err(rollback) = writer.rollback() {
                    tracing::error!("Rollback after failed commit also failed: {}", rollback);
                }
                return Err(EveryfindError::StorageError(format!(
                    "Failed to commit {discarded} entries: {e}"
                )));
            }
        }
        self.pending = 0;
        self.reader
            .reload()
            .map_err(|e| EveryfindError::StorageError(format!("Failed to reload reader: {e}")))
    }

    /// Drop the writer and its lock once nothing is pending
    fn release_writer(&mut self) -> Result<bool> {
        if self.pending > 0 {
            return Ok(false);
        }
        match self.writer.take() {
            Some(writer) => {
                writer.wait_merging_threads().map_err(|e| {
                    EveryfindError::StorageError(format!("Failed to release writer: {e}"))
                })?;
                tracing::debug!("Index writer released");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Load every entry matching `query`, ordered by filename then path
    fn entries(&self, query: &dyn Query) -> Result<Vec<FileEntry>> {
        let searcher = self.searcher();
        let addresses: HashSet<DocAddress> = searcher
            .search(query, &DocSetCollector)
            .map_err(|e| EveryfindError::SearchFailed(format!("Query failed: {e}")))?;

        let mut entries = Vec::with_capacity(addresses.len());
        for address in addresses {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| {
                EveryfindError::StorageError(format!("Failed to retrieve document: {e}"))
            })?;
            entries.push(self.to_entry(&doc));
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    fn to_entry(&self, doc: &TantivyDocument) -> FileEntry {
        let text = |field: Field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let float = |field: Field| doc.get_first(field).and_then(|v| v.as_f64()).unwrap_or(0.0);

        FileEntry {
            path: text(self.fields.path),
            filename: text(self.fields.filename),
            size: doc
                .get_first(self.fields.size)
                .and_then(|v| v.as_u64())
                .unwrap_or(0),
            modified_time: float(self.fields.modified_time),
            indexed_at: float(self.fields.indexed_at),
        }
    }
}

/// Ordering used by every enumeration: filename, then path
fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| {
        a.filename
            .cmp(&b.filename)
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Durable path → metadata store
pub struct IndexStore {
    /// Index directory
    location: PathBuf,

    /// `None` once closed
    inner: Mutex<Option<StoreInner>>,
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("location", &self.location)
            .field("open", &self.is_open())
            .finish()
    }
}

impl IndexStore {
    /// Open the store at `location`, creating it if absent
    ///
    /// Reopening an existing location keeps its contents. Fails with
    /// `StorageError` if the location is not usable as an index directory
    /// or holds an index with a different schema.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let location = location.as_ref().to_path_buf();

        fs::create_dir_all(&location).map_err(|e| {
            EveryfindError::StorageError(format!(
                "Cannot create index directory {location:?}: {e}"
            ))
        })?;

        let directory = MmapDirectory::open(&location).map_err(|e| {
            EveryfindError::StorageError(format!("Failed to open index directory: {e}"))
        })?;

        let index = Index::open_or_create(directory, create_schema())
            .map_err(|e| EveryfindError::StorageError(format!("Failed to open index: {e}")))?;

        let fields = Fields::resolve(&index.schema())?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| EveryfindError::StorageError(format!("Failed to create reader: {e}")))?;

        tracing::info!("Index store opened at {:?}", location);

        Ok(Self {
            location,
            inner: Mutex::new(Some(StoreInner {
                index,
                fields,
                writer: None,
                reader,
                pending: 0,
            })),
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<StoreInner>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` on the open state, or fail with `StateError`
    fn with_inner<T>(&self, op: &str, f: impl FnOnce(&mut StoreInner) -> Result<T>) -> Result<T> {
        let mut guard = self.lock();
        match guard.as_mut() {
            Some(inner) => f(inner),
            None => Err(EveryfindError::StateError(format!(
                "cannot {op}: store at {:?} is closed",
                self.location
            ))),
        }
    }

    /// Take the write lock now rather than on the first write
    ///
    /// Fails with `StorageError` while another writer holds the index.
    pub fn acquire_writer(&self) -> Result<()> {
        self.with_inner("acquire writer", |inner| inner.writer().map(|_| ()))
    }

    /// Give the write lock back so other handles can write
    ///
    /// Keeps the writer if upserts are still uncommitted. Returns whether
    /// a writer was released.
    pub fn release_writer(&self) -> Result<bool> {
        self.with_inner("release writer", StoreInner::release_writer)
    }

    /// Insert or replace the entry for `entry.path`
    ///
    /// Stamps `indexed_at` with the current time. Not visible to queries
    /// until the next [`IndexStore::commit`].
    pub fn upsert(&self, entry: &FileEntry) -> Result<()> {
        self.with_inner("upsert", |inner| {
            let f = inner.fields;
            let writer = inner.writer()?;
            writer.delete_term(Term::from_field_text(f.path, &entry.path));

            let document = doc!(
                f.path => entry.path.as_str(),
                f.filename => entry.filename.as_str(),
                f.path_lower => entry.path.to_lowercase(),
                f.filename_lower => entry.filename.to_lowercase(),
                f.size => entry.size,
                f.modified_time => entry.modified_time,
                f.indexed_at => now_seconds(),
            );

            writer.add_document(document).map_err(|e| {
                EveryfindError::StorageError(format!("Failed to add {}: {e}", entry.path))
            })?;
            inner.pending += 1;
            Ok(())
        })
    }

    /// Commit pending upserts and make them visible to queries
    ///
    /// On failure the pending upserts are rolled back and the error is
    /// returned; the handle stays usable.
    pub fn commit(&self) -> Result<()> {
        self.with_inner("commit", StoreInner::commit)
    }

    /// Number of upserts not yet committed
    pub fn pending(&self) -> Result<usize> {
        self.with_inner("count pending writes", |inner| Ok(inner.pending))
    }

    /// All indexed paths, ordered by filename then path
    pub fn all_paths(&self) -> Result<Vec<String>> {
        Ok(self
            .all_entries()?
            .into_iter()
            .map(|e| e.path)
            .collect())
    }

    /// All indexed entries, ordered by filename then path
    pub fn all_entries(&self) -> Result<Vec<FileEntry>> {
        self.with_inner("enumerate entries", |inner| inner.entries(&AllQuery))
    }

    /// Paths whose filename or full path contains `pattern`
    ///
    /// Case-insensitive substring match (no wildcards); same ordering as
    /// [`IndexStore::all_paths`].
    pub fn search_substring(&self, pattern: &str) -> Result<Vec<String>> {
        let needle = pattern.to_lowercase();

        self.with_inner("search", |inner| {
            let query = if needle.len() <= MAX_REGEX_NEEDLE_BYTES {
                substring_query(inner.fields, &needle)
            } else {
                None
            };

            let entries = match query {
                Some(query) => inner.entries(&query)?,
                None => {
                    tracing::debug!("Scanning entries for a {}-byte needle", needle.len());
                    inner
                        .entries(&AllQuery)?
                        .into_iter()
                        .filter(|e| contains_needle(e, &needle))
                        .collect()
                }
            };

            Ok(entries.into_iter().map(|e| e.path).collect())
        })
    }

    /// Number of committed entries
    pub fn len(&self) -> Result<usize> {
        self.with_inner("count entries", |inner| {
            Ok(inner.searcher().num_docs() as usize)
        })
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Delete every entry and commit; the index directory stays
    pub fn clear(&self) -> Result<()> {
        self.with_inner("clear", |inner| {
            inner
                .writer()?
                .delete_all_documents()
                .map_err(|e| EveryfindError::StorageError(format!("Failed to clear: {e}")))?;
            inner.commit()?;
            inner.release_writer()?;
            tracing::info!("Index cleared");
            Ok(())
        })
    }

    /// Entry count, on-disk size and most recent indexing time
    pub fn stats(&self) -> Result<StoreStats> {
        let entries = self.all_entries()?;
        let last_indexed_at = entries
            .iter()
            .map(|e| e.indexed_at)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))));

        Ok(StoreStats {
            location: self.location.to_string_lossy().into_owned(),
            entry_count: entries.len(),
            size_bytes: calculate_directory_size(&self.location),
            last_indexed_at,
        })
    }

    /// Release the index; later operations fail with `StateError`
    ///
    /// Uncommitted upserts are discarded. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let inner = self.lock().take();
        match inner {
            Some(inner) => {
                if inner.pending > 0 {
                    tracing::warn!(
                        "Closing index with {} uncommitted entries",
                        inner.pending
                    );
                }
                drop(inner);
                tracing::info!("Index store at {:?} closed", self.location);
            }
            None => tracing::debug!("Index store at {:?} already closed", self.location),
        }
        Ok(())
    }
}

/// Regex query over both lowercased fields, `None` if it cannot be built
///
/// `(?s)` lets `.` cross newlines, which are legal in Unix paths.
fn substring_query(fields: Fields, needle: &str) -> Option<BooleanQuery> {
    let pattern = format!("(?s).*{}.*", regex::escape(needle));
    let build = |field: Field| match RegexQuery::from_pattern(&pattern, field) {
        Ok(query) => Some(Box::new(query) as Box<dyn Query>),
        Err(e) => {
            tracing::debug!("Regex query unavailable ({}), scanning instead", e);
            None
        }
    };

    Some(BooleanQuery::new(vec![
        (Occur::Should, build(fields.path_lower)?),
        (Occur::Should, build(fields.filename_lower)?),
    ]))
}

fn contains_needle(entry: &FileEntry, needle: &str) -> bool {
    entry.path.to_lowercase().contains(needle) || entry.filename.to_lowercase().contains(needle)
}

/// Calculate directory size recursively
fn calculate_directory_size(path: &Path) -> u64 {
    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
