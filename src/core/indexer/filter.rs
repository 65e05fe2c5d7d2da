//! Include/exclude filtering for scanned entries.
//!
//! A [`FilterSet`] is built once per scan and then only read, so it can
//! be shared freely between threads. Matching itself never touches the
//! filesystem: callers pass paths that are already resolved.

use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::error::{EveryfindError, Result};

/// Characters that turn an include pattern into a glob
const GLOB_CHARS: &[char] = &['*', '?', '['];

/// One compiled include pattern
#[derive(Debug, Clone)]
enum IncludePattern {
    /// Glob matched against the file name
    Glob(Pattern),
    /// Lowercased extension with leading dot, matched as a suffix
    Extension(String),
}

impl IncludePattern {
    fn parse(raw: &str) -> Result<Self> {
        if raw.contains(GLOB_CHARS) {
            let pattern = Pattern::new(raw).map_err(|e| EveryfindError::InvalidPattern {
                pattern: raw.to_string(),
                message: e.to_string(),
            })?;
            return Ok(IncludePattern::Glob(pattern));
        }

        let ext = if raw.starts_with('.') {
            raw.to_lowercase()
        } else {
            format!(".{}", raw.to_lowercase())
        };
        Ok(IncludePattern::Extension(ext))
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            IncludePattern::Glob(p) => p.matches(name),
            IncludePattern::Extension(ext) => name.to_lowercase().ends_with(ext.as_str()),
        }
    }
}

/// Combined include/exclude rules for one scan
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    /// Basenames pruned unconditionally
    exclude_names: HashSet<String>,

    /// Resolved absolute path prefixes
    exclude_path_prefixes: Vec<String>,

    /// Ordered include patterns (OR semantics, empty = everything)
    include_patterns: Vec<IncludePattern>,
}

impl FilterSet {
    /// Create a filter set
    ///
    /// # Arguments
    ///
    /// * `exclude_names` - Directory/file basenames to prune
    /// * `exclude_paths` - Path prefixes to skip; `~` is expanded and each
    ///   prefix is resolved now, falling back to its expanded form
    /// * `include_patterns` - Globs (`*.py`) or bare extensions (`txt`, `.pdf`)
    ///
    /// # Returns
    ///
    /// The filter set, or `InvalidPattern` for a malformed glob
    pub fn new<N, P, I>(exclude_names: N, exclude_paths: P, include_patterns: I) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let exclude_names = exclude_names.into_iter().map(Into::into).collect();

        let exclude_path_prefixes = exclude_paths
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| resolve_path(Path::new(p.as_ref())).to_string_lossy().into_owned())
            .collect();

        let include_patterns = include_patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| IncludePattern::parse(&p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            exclude_names,
            exclude_path_prefixes,
            include_patterns,
        })
    }

    /// Check whether `name` or `resolved_path` is excluded
    ///
    /// Used for directories before descending, and as the first step of
    /// [`FilterSet::matches`].
    pub fn is_excluded(&self, name: &str, resolved_path: &str) -> bool {
        if self.exclude_names.contains(name) {
            return true;
        }
        self.exclude_path_prefixes
            .iter()
            .any(|prefix| resolved_path.starts_with(prefix.as_str()))
    }

    /// Check whether a file passes the filter set
    ///
    /// Exclusion wins: an excluded entry is never tested against the
    /// include patterns.
    pub fn matches(&self, name: &str, resolved_path: &str) -> bool {
        if self.is_excluded(name, resolved_path) {
            return false;
        }

        if self.include_patterns.is_empty() {
            return true;
        }

        self.include_patterns.iter().any(|p| p.matches(name))
    }

    pub fn exclude_path_prefixes(&self) -> &[String] {
        &self.exclude_path_prefixes
    }

    pub fn has_include_patterns(&self) -> bool {
        !self.include_patterns.is_empty()
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Expand `~` and resolve symlinks and `..`
///
/// Falls back to the lexically absolute expanded path when the target
/// cannot be canonicalized (for example because it does not exist).
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = expand_tilde(path);
    match expanded.canonicalize() {
        Ok(resolved) => resolved,
        Err(_) => std::path::absolute(&expanded).unwrap_or(expanded),
    }
}
