//! Query engine over the indexed paths.
//!
//! A [`Finder`] turns a corpus and a query into a [`Selection`]. Two are
//! provided: [`FzfFinder`] (interactive, external process) and
//! [`SubstringFinder`] (in-process, always available). Which one is used
//! is decided once at startup by [`detect_finder`].
//!
//! [`rank_fuzzy`] scores a corpus without any UI.

mod display;
mod fuzzy;
mod fzf;
mod substring;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EveryfindError;

pub use display::{decorate, display_name, resolve_line};
pub use fuzzy::{rank_fuzzy, RankedMatch};
pub use fzf::{FzfFinder, FZF_BINARY};
pub use substring::{filter_substring, SubstringFinder};

/// Result of one finder invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "paths", rename_all = "lowercase")]
pub enum Selection {
    /// Cancelled, no match, or finder failure
    None,
    One(String),
    Many(Vec<String>),
}

impl Selection {
    /// `None` for no paths, `One` for exactly one, `Many` otherwise
    pub fn from_paths(mut paths: Vec<String>) -> Self {
        match paths.len() {
            0 => Selection::None,
            1 => Selection::One(paths.remove(0)),
            _ => Selection::Many(paths),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn into_paths(self) -> Vec<String> {
        match self {
            Selection::None => Vec::new(),
            Selection::One(path) => vec![path],
            Selection::Many(paths) => paths,
        }
    }
}

/// Selection strategy over an in-memory corpus
pub trait Finder: Send + Sync {
    /// Short identifier for logs and `stats`
    fn name(&self) -> &'static str;

    /// True if the finder takes over the terminal
    fn is_interactive(&self) -> bool;

    /// Select entries of `corpus` for `query`
    ///
    /// Never fails: launch errors and cancellations yield [`Selection::None`].
    fn search(&self, corpus: &[String], query: &str, multi: bool) -> Selection;
}

/// Configured finder preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinderKind {
    /// fzf if it can be launched, otherwise substring
    #[default]
    Auto,
    Fzf,
    Substring,
}

impl fmt::Display for FinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinderKind::Auto => "auto",
            FinderKind::Fzf => "fzf",
            FinderKind::Substring => "substring",
        };
        f.write_str(s)
    }
}

impl FromStr for FinderKind {
    type Err = EveryfindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(FinderKind::Auto),
            "fzf" => Ok(FinderKind::Fzf),
            "substring" => Ok(FinderKind::Substring),
            other => Err(EveryfindError::ConfigError(format!(
                "Unknown finder '{other}' (expected auto, fzf or substring)"
            ))),
        }
    }
}

/// Resolve the finder for `kind`
///
/// `Fzf` is honored only if the executable launches; otherwise the
/// substring finder is used and a warning is logged.
pub fn detect_finder(kind: FinderKind) -> Box<dyn Finder> {
    match kind {
        FinderKind::Substring => Box::new(SubstringFinder),
        FinderKind::Auto | FinderKind::Fzf => {
            let fzf = FzfFinder::default();
            if fzf.is_available() {
                tracing::debug!("Using fzf finder");
                Box::new(fzf)
            } else {
                if kind == FinderKind::Fzf {
                    tracing::warn!("fzf not available, using substring search");
                } else {
                    tracing::debug!("fzf not found, using substring search");
                }
                Box::new(SubstringFinder)
            }
        }
    }
}

/// Outcome of a search against the persisted index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The index holds no entries
    IndexEmpty,
    /// Entries exist but nothing was selected
    NoMatch,
    Selected { paths: Vec<String> },
}

impl From<Selection> for SearchOutcome {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::None => SearchOutcome::NoMatch,
            other => SearchOutcome::Selected {
                paths: other.into_paths(),
            },
        }
    }
}
