//! Persistent index of file metadata.
//!
//! The store is a single Tantivy index directory:
//!
//! ```text
//! {config_dir}/everyfind/index.db/
//! ├── .managed.json
//! ├── meta.json
//! └── [segment files]
//! ```

mod index_store;

pub use index_store::{create_schema, IndexStore};

use crate::core::error::Result;
use crate::core::types::FileEntry;

/// Write side of the store, as driven by the indexing pipeline
pub trait EntrySink: Send + Sync {
    /// Take write access for a run; fails while another writer holds it
    fn acquire_writer(&self) -> Result<()>;

    fn upsert(&self, entry: &FileEntry) -> Result<()>;

    /// Make pending upserts durable; a failed commit discards them
    fn commit(&self) -> Result<()>;

    /// Give write access back once the run is over
    fn release_writer(&self) -> Result<()>;
}

impl EntrySink for IndexStore {
    fn acquire_writer(&self) -> Result<()> {
        IndexStore::acquire_writer(self)
    }

    fn upsert(&self, entry: &FileEntry) -> Result<()> {
        IndexStore::upsert(self, entry)
    }

    fn commit(&self) -> Result<()> {
        IndexStore::commit(self)
    }

    fn release_writer(&self) -> Result<()> {
        IndexStore::release_writer(self).map(|_| ())
    }
}
