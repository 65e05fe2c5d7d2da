//! Tests for the index command
//!
//! - Explicit paths and configured roots
//! - Exclude/include overrides
//! - Missing directories are skipped, not fatal

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::{create_test_services, names_of, TestTree};
use everyfind::cli::commands::index::{execute, IndexArgs};
use everyfind::cli::OutputFormat;

fn args(paths: Vec<std::path::PathBuf>) -> IndexArgs {
    IndexArgs {
        paths,
        exclude: vec![],
        include: vec![],
        exclude_path: vec![],
        quiet: true,
    }
}

#[tokio::test]
async fn test_index_explicit_path_human() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::basic();

    let result = execute(args(vec![tree.root()]), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Index should succeed: {:?}", result.err());
    assert_eq!(services.store.len().unwrap(), 3);
}

#[tokio::test]
async fn test_index_configured_roots_json() {
    let tree = TestTree::home_like();
    let (services, _storage) = create_cli_test_services(vec![tree.root()], false);

    execute(args(vec![]), &services, OutputFormat::Json)
        .await
        .unwrap();

    // Default excludes drop .git, node_modules and __pycache__
    let mut names = names_of(&services.store.all_paths().unwrap());
    names.sort();
    assert_eq!(
        names,
        vec!["Notes.TXT", "main.py", "report.pdf", "song.mp3", "temp.txt"]
    );
}

#[tokio::test]
async fn test_index_include_override() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::home_like();

    let mut index_args = args(vec![tree.root()]);
    index_args.include = vec!["*.pdf".to_string(), "txt".to_string()];
    execute(index_args, &services, OutputFormat::Human)
        .await
        .unwrap();

    let mut names = names_of(&services.store.all_paths().unwrap());
    names.sort();
    assert_eq!(names, vec!["Notes.TXT", "report.pdf", "temp.txt"]);
}

#[tokio::test]
async fn test_index_exclude_replaces_defaults() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::home_like();

    let mut index_args = args(vec![tree.root()]);
    index_args.exclude = vec!["Documents".to_string()];
    execute(index_args, &services, OutputFormat::Human)
        .await
        .unwrap();

    let paths = services.store.all_paths().unwrap();
    assert!(paths.iter().all(|p| !p.contains("/Documents/")));
    // .git is no longer excluded once the list is replaced
    assert!(paths.iter().any(|p| p.ends_with(".git/HEAD")));
}

#[tokio::test]
async fn test_index_missing_directory_is_skipped() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::basic();
    let missing = tree.path().join("does-not-exist");

    let result = execute(
        args(vec![missing, tree.root()]),
        &services,
        OutputFormat::Json,
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(services.store.len().unwrap(), 3);
}

#[tokio::test]
async fn test_index_closed_store_fails() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::basic();
    services.shutdown().unwrap();

    let result = execute(args(vec![tree.root()]), &services, OutputFormat::Human).await;
    assert!(result.is_err());
}
