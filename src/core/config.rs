//! Configuration management for everyfind.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with defaults for all settings.

use crate::core::error::{EveryfindError, Result};
use crate::core::indexer::FilterSet;
use crate::core::search::FinderKind;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Directories to index (empty = home directory)
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Globs or bare extensions to keep (empty = every file)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Path prefixes to skip
    #[serde(default = "default_exclude_paths")]
    pub exclude_paths: Vec<String>,

    /// Directory or file names to skip anywhere in the tree
    #[serde(default = "default_exclude_names")]
    pub exclude_names: Vec<String>,

    /// Re-run indexing periodically (`watch`)
    #[serde(default)]
    pub auto_reindex: bool,

    #[serde(default = "default_reindex_interval")]
    pub reindex_interval_minutes: u64,

    /// Upserts between commits
    #[serde(default = "default_commit_batch_size")]
    pub commit_batch_size: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Index directory
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Finder used by `search` without `--substring`/`--rank`
    #[serde(default)]
    pub finder: FinderKind,

    /// Results printed by `search --rank`
    #[serde(default = "default_rank_limit")]
    pub rank_limit: usize,
}

// Default value functions
fn default_exclude_paths() -> Vec<String> {
    vec!["/media".to_string(), "/mnt".to_string()]
}

pub fn default_exclude_names() -> Vec<String> {
    vec![
        ".git".to_string(),
        "__pycache__".to_string(),
        ".venv".to_string(),
        "venv".to_string(),
        "node_modules".to_string(),
    ]
}

fn default_reindex_interval() -> u64 {
    60
}

fn default_commit_batch_size() -> usize {
    crate::core::indexer::DEFAULT_BATCH_SIZE
}

fn default_index_path() -> PathBuf {
    PathBuf::from("./index.db")
}

fn default_rank_limit() -> usize {
    20
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            include_patterns: Vec::new(),
            exclude_paths: default_exclude_paths(),
            exclude_names: default_exclude_names(),
            auto_reindex: false,
            reindex_interval_minutes: default_reindex_interval(),
            commit_batch_size: default_commit_batch_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            finder: FinderKind::default(),
            rank_limit: default_rank_limit(),
        }
    }
}

impl IndexingConfig {
    /// Configured roots, or the home directory if none
    pub fn effective_roots(&self) -> Vec<PathBuf> {
        if !self.roots.is_empty() {
            return self.roots.clone();
        }
        dirs::home_dir().into_iter().collect()
    }

    /// Compile the include/exclude settings
    pub fn filter_set(&self) -> Result<FilterSet> {
        FilterSet::new(
            self.exclude_names.iter().cloned(),
            &self.exclude_paths,
            &self.include_patterns,
        )
    }

    pub fn reindex_interval(&self) -> Duration {
        minutes_to_duration(self.reindex_interval_minutes)
    }
}

/// `minutes` as a duration, saturating instead of overflowing
pub fn minutes_to_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            EveryfindError::ConfigError(format!("Failed to read config file: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write configuration as TOML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            EveryfindError::ConfigError(format!("Failed to serialize config: {e}"))
        })?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. EVERYFIND_CONFIG env var
    /// 2. XDG config file (~/.config/everyfind/config.toml)
    /// 3. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("EVERYFIND_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else {
                Self::default()
            }
        };

        // Index lives in the XDG config dir unless set explicitly
        if config.storage.index_path == default_index_path() {
            config.storage.index_path = xdg.index_path();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Some(roots) = env::var_os("EVERYFIND_ROOTS") {
            self.indexing.roots = env::split_paths(&roots)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        if let Ok(auto) = env::var("EVERYFIND_AUTO_REINDEX") {
            if let Ok(flag) = auto.parse() {
                self.indexing.auto_reindex = flag;
            }
        }
        if let Ok(interval) = env::var("EVERYFIND_REINDEX_INTERVAL_MINUTES") {
            if let Ok(minutes) = interval.parse() {
                self.indexing.reindex_interval_minutes = minutes;
            }
        }
        if let Ok(batch) = env::var("EVERYFIND_COMMIT_BATCH_SIZE") {
            if let Ok(size) = batch.parse() {
                self.indexing.commit_batch_size = size;
            }
        }

        // Storage configuration
        if let Ok(path) = env::var("EVERYFIND_INDEX_PATH") {
            self.storage.index_path = PathBuf::from(path);
        }

        // Search configuration
        if let Ok(finder) = env::var("EVERYFIND_FINDER") {
            match finder.parse() {
                Ok(kind) => self.search.finder = kind,
                Err(e) => tracing::warn!("Ignoring EVERYFIND_FINDER: {}", e),
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.reindex_interval_minutes == 0 {
            return Err(EveryfindError::ConfigError(
                "Reindex interval must be non-zero".to_string(),
            ));
        }

        if self.indexing.commit_batch_size == 0 {
            return Err(EveryfindError::ConfigError(
                "Commit batch size must be non-zero".to_string(),
            ));
        }

        if self.search.rank_limit == 0 {
            return Err(EveryfindError::ConfigError(
                "Rank limit must be non-zero".to_string(),
            ));
        }

        if self.storage.index_path.as_os_str().is_empty() {
            return Err(EveryfindError::ConfigError(
                "Index path must not be empty".to_string(),
            ));
        }

        // Surfaces malformed globs at load time
        self.indexing.filter_set()?;

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Roots: {:?}", self.indexing.effective_roots());
        tracing::debug!(
            "  Include patterns: {} patterns",
            self.indexing.include_patterns.len()
        );
        tracing::debug!("  Exclude paths: {:?}", self.indexing.exclude_paths);
        tracing::debug!("  Exclude names: {:?}", self.indexing.exclude_names);
        tracing::debug!(
            "  Auto reindex: {} (every {} min)",
            self.indexing.auto_reindex,
            self.indexing.reindex_interval_minutes
        );
        tracing::debug!("  Commit batch size: {}", self.indexing.commit_batch_size);
        tracing::debug!("  Index path: {:?}", self.storage.index_path);
        tracing::debug!("  Finder: {}", self.search.finder);
    }
}
