//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for one
//! subcommand.

pub mod clear;
pub mod completions;
pub mod config;
pub mod index;
pub mod search;
pub mod stats;
pub mod watch;

// Re-export argument types for use in mod.rs
pub use clear::ClearArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use index::IndexArgs;
pub use search::SearchArgs;
pub use stats::StatsArgs;
pub use watch::WatchArgs;
