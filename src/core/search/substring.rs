//! In-process substring selection, always available.

use super::{Finder, Selection};

/// Entries of `corpus` containing `query`, case-insensitively, in corpus order
///
/// An empty query keeps everything.
pub fn filter_substring(corpus: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|path| path.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Non-interactive finder backed by [`filter_substring`]
///
/// Every match is returned; there is no prompt to narrow a single pick,
/// so `multi` does not change the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringFinder;

impl Finder for SubstringFinder {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn search(&self, corpus: &[String], query: &str, _multi: bool) -> Selection {
        if corpus.is_empty() {
            return Selection::None;
        }
        Selection::from_paths(filter_substring(corpus, query))
    }
}
