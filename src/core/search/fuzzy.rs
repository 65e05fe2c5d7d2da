//! Non-interactive fuzzy ranking with nucleo.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};
use serde::Serialize;

/// One scored corpus entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub path: String,
    pub score: u32,
}

fn create_pattern(query: &str) -> Pattern {
    Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    )
}

/// Score every entry against `query` and return the best `limit`
///
/// Higher scores first; ties keep corpus order. Entries that do not match
/// at all are dropped. A blank query matches nothing.
pub fn rank_fuzzy(corpus: &[String], query: &str, limit: usize) -> Vec<RankedMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let pattern = create_pattern(query);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT.match_paths());
    let mut utf32buf = Vec::new();

    let mut scored: Vec<(usize, u32)> = corpus
        .iter()
        .enumerate()
        .filter_map(|(idx, path)| {
            let haystack = Utf32Str::new(path, &mut utf32buf);
            pattern.score(haystack, &mut matcher).map(|s| (idx, s))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    scored
        .into_iter()
        .take(limit.max(1))
        .map(|(idx, score)| RankedMatch {
            path: corpus[idx].clone(),
            score,
        })
        .collect()
}
