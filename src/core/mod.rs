//! Core domain logic
//!
//! Everything here is independent of the command-line surface.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **indexer**: Filtering, directory scanning and indexing runs
//! - **storage**: Tantivy-backed path index
//! - **search**: Substring, fuzzy and interactive selection
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{EveryfindError, Result};
pub use services::Services;
