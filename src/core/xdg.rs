//! XDG Base Directory Support
//!
//! Everything everyfind persists lives under one config directory:
//!
//! ```text
//! ~/.config/everyfind/
//! ├── config.toml
//! ├── settings.json   # older JSON settings, imported once
//! └── index.db/       # Tantivy index
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::core::config::Config;
use crate::core::error::Result;

/// Application directory name under the XDG base
const APP_DIR: &str = "everyfind";

/// XDG directory structure for everyfind
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve the config directory
    ///
    /// Priority order (highest to lowest):
    /// 1. EVERYFIND_CONFIG_DIR
    /// 2. XDG_CONFIG_HOME/everyfind
    /// 3. ~/.config/everyfind
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("EVERYFIND_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return PathBuf::from(xdg).join(APP_DIR);
            }
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default index location
    pub fn index_path(&self) -> PathBuf {
        self.config_dir.join("index.db")
    }

    /// JSON settings file written by earlier releases
    pub fn legacy_settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)
    }

    /// Log the resolved paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
        tracing::debug!("  Index: {:?}", self.index_path());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape of the older `settings.json`
#[derive(Debug, Deserialize)]
struct LegacySettings {
    #[serde(default)]
    indexed_paths: Vec<String>,
    #[serde(default)]
    file_filters: Vec<String>,
    excluded_paths: Option<Vec<String>>,
    #[serde(default)]
    auto_reindex: bool,
    reindex_interval_minutes: Option<u64>,
}

/// Import `settings.json` into `config.toml`
///
/// Only runs when the JSON file exists and no TOML config does. The JSON
/// file is left in place.
///
/// # Returns
///
/// `true` if a config file was written
pub fn migrate_legacy_settings(xdg: &XdgDirs) -> Result<bool> {
    let legacy = xdg.legacy_settings_file();
    let target = xdg.config_file();

    if !legacy.exists() || target.exists() {
        return Ok(false);
    }

    let contents = fs::read_to_string(&legacy)?;
    let settings: LegacySettings = serde_json::from_str(&contents)?;

    let mut config = Config::default();
    config.indexing.roots = settings.indexed_paths.into_iter().map(PathBuf::from).collect();
    config.indexing.include_patterns = settings
        .file_filters
        .into_iter()
        .filter(|f| f != "*")
        .collect();
    if let Some(excluded) = settings.excluded_paths {
        config.indexing.exclude_paths = excluded;
    }
    config.indexing.auto_reindex = settings.auto_reindex;
    if let Some(minutes) = settings.reindex_interval_minutes {
        config.indexing.reindex_interval_minutes = minutes;
    }

    config.save(&target)?;
    tracing::info!("Migrated settings: {:?} → {:?}", legacy, target);
    tracing::info!("Legacy settings preserved at {:?} (safe to delete)", legacy);

    Ok(true)
}
