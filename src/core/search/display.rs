//! Display decoration for interactive selection.
//!
//! Each corpus entry is shown as `name (parent)` behind a hidden
//! `index<TAB>` column. The index, not the display text, maps a selected
//! line back to its path, so two files with the same name in
//! same-named directories stay distinguishable.

use std::path::Path;

/// Column separator between the hidden index and the display text
pub const FIELD_SEPARATOR: char = '\t';

/// `name (parent)` for one path
pub fn display_name(path: &str) -> String {
    let p = Path::new(path);
    let name = p
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let parent = p
        .parent()
        .map(|d| d.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!("{name} ({parent})")
}

/// One line per corpus entry: `index<TAB>name (parent)`
///
/// Tabs and newlines inside paths are replaced with spaces in the display
/// column so every entry stays on one line.
pub fn decorate(corpus: &[String]) -> Vec<String> {
    corpus
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let shown = display_name(path).replace(['\t', '\n', '\r'], " ");
            format!("{idx}{FIELD_SEPARATOR}{shown}")
        })
        .collect()
}

/// Map one selected line back to its corpus entry
pub fn resolve_line<'a>(line: &str, corpus: &'a [String]) -> Option<&'a String> {
    let (idx, _) = line.split_once(FIELD_SEPARATOR)?;
    let idx: usize = idx.trim().parse().ok()?;
    corpus.get(idx)
}
