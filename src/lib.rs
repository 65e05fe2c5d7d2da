//! everyfind - filesystem metadata indexer and filename search
//!
//! Walks configured directories, records each file's path, name, size
//! and modification time in a Tantivy index, and answers substring and
//! fuzzy queries against it.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (filtering, scanning, batched indexing runs)
//!   - storage (Tantivy-backed path index)
//!   - search (substring, fuzzy ranking, fzf selection)
//!   - services (unified service container)
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Example
//!
//! ```no_run
//! use everyfind::core::indexer::{index_paths, FilterSet};
//! use everyfind::core::storage::IndexStore;
//! use std::path::PathBuf;
//!
//! let store = IndexStore::open("/tmp/everyfind-index")?;
//! let filters = FilterSet::new([".git"], ["/mnt"], ["*.pdf"])?;
//! let count = index_paths(&store, &[PathBuf::from("/home/me")], filters, None, None)?;
//! println!("{count} files indexed");
//!
//! for path in store.search_substring("invoice")? {
//!     println!("{path}");
//! }
//! store.close()?;
//! # Ok::<(), everyfind::EveryfindError>(())
//! ```

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{EveryfindError, Result};
pub use core::services::Services;
pub use core::storage::IndexStore;
pub use core::types::*;
