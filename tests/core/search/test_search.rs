// Query engine over an indexed tree

use crate::common::{create_test_services, create_test_store, index_tree, names_of, TestTree};
use everyfind::core::indexer::FilterSet;
use everyfind::core::search::{
    decorate, rank_fuzzy, resolve_line, Finder, SearchOutcome, Selection, SubstringFinder,
};

#[test]
fn test_substring_finder_over_indexed_corpus() {
    let tree = TestTree::home_like();
    let (store, _dir) = create_test_store();
    index_tree(&store, &[tree.root()], FilterSet::default());

    let corpus = store.all_paths().unwrap();
    let selection = SubstringFinder.search(&corpus, "notes", false);

    match selection {
        Selection::One(path) => assert!(path.ends_with("Documents/Notes.TXT")),
        other => panic!("expected one match, got {other:?}"),
    }
}

#[test]
fn test_substring_finder_no_match() {
    let tree = TestTree::basic();
    let (store, _dir) = create_test_store();
    index_tree(&store, &[tree.root()], FilterSet::default());

    let corpus = store.all_paths().unwrap();
    assert!(SubstringFinder.search(&corpus, "xyz_not_present", true).is_none());
}

#[test]
fn test_rank_fuzzy_prefers_tighter_match() {
    let tree = TestTree::with_files(&[
        "src/main.rs",
        "docs/manual/install.md",
        "misc/m_a_i_n.txt",
    ]);
    let (store, _dir) = create_test_store();
    index_tree(&store, &[tree.root()], FilterSet::default());

    let corpus = store.all_paths().unwrap();
    let ranked = rank_fuzzy(&corpus, "main.rs", 10);

    assert!(!ranked.is_empty());
    assert!(ranked[0].path.ends_with("src/main.rs"));
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_rank_fuzzy_respects_limit() {
    let tree = TestTree::flat(25);
    let (store, _dir) = create_test_store();
    index_tree(&store, &[tree.root()], FilterSet::default());

    let corpus = store.all_paths().unwrap();
    assert_eq!(rank_fuzzy(&corpus, "file", 7).len(), 7);
}

#[test]
fn test_same_name_in_same_named_directories_resolve_distinctly() {
    let tree = TestTree::with_files(&["one/cfg/app.toml", "two/cfg/app.toml"]);
    let (store, _dir) = create_test_store();
    index_tree(&store, &[tree.root()], FilterSet::default());

    let corpus = store.all_paths().unwrap();
    let lines = decorate(&corpus);
    assert_eq!(lines.len(), 2);

    let first = resolve_line(&lines[0], &corpus).unwrap();
    let second = resolve_line(&lines[1], &corpus).unwrap();
    assert_ne!(first, second);
    assert_eq!(names_of(&[first.clone(), second.clone()]), vec!["app.toml", "app.toml"]);
}

#[test]
fn test_services_search_empty_index() {
    let (services, _dir) = create_test_services();

    let outcome = services.search(services.finder(), "anything", false).unwrap();
    assert_eq!(outcome, SearchOutcome::IndexEmpty);
}

#[test]
fn test_services_search_outcomes() {
    let tree = TestTree::basic();
    let (services, _dir) = create_test_services();
    index_tree(&services.store, &[tree.root()], FilterSet::default());

    let none = services.search(services.finder(), "xyz_not_present", false).unwrap();
    assert_eq!(none, SearchOutcome::NoMatch);

    match services.search(services.finder(), ".TXT", true).unwrap() {
        SearchOutcome::Selected { paths } => {
            assert_eq!(names_of(&paths), vec!["a.txt", "c.txt"]);
        }
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn test_services_search_after_shutdown_fails() {
    let (services, _dir) = create_test_services();
    services.shutdown().unwrap();

    assert!(services.search(services.finder(), "a", false).is_err());
}
