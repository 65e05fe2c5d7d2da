//! Tests for the watch command

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::TestTree;
use everyfind::cli::commands::watch::{execute_until, WatchArgs};
use everyfind::cli::OutputFormat;
use std::time::Duration;

#[tokio::test]
async fn test_watch_refuses_without_auto_reindex() {
    let tree = TestTree::basic();
    let (services, _storage) = create_cli_test_services(vec![tree.root()], false);

    let args = WatchArgs {
        interval_minutes: Some(1),
        force: false,
    };
    let result = execute_until(args, &services, OutputFormat::Human, async {}).await;

    assert!(result.is_err());
    assert!(services.store.is_empty().unwrap());
}

#[tokio::test]
async fn test_watch_zero_interval_rejected() {
    let tree = TestTree::basic();
    let (services, _storage) = create_cli_test_services(vec![tree.root()], true);

    let args = WatchArgs {
        interval_minutes: Some(0),
        force: false,
    };
    let result = execute_until(args, &services, OutputFormat::Json, async {}).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_watch_forced_first_run_indexes_roots() {
    let tree = TestTree::flat(6);
    let (services, _storage) = create_cli_test_services(vec![tree.root()], false);

    let args = WatchArgs {
        interval_minutes: Some(60),
        force: true,
    };
    let store = services.store.clone();
    let shutdown = async move {
        // The first run starts immediately; stop once it has landed
        for _ in 0..200 {
            if store.len().unwrap_or(0) == 6 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    };

    execute_until(args, &services, OutputFormat::Json, shutdown)
        .await
        .unwrap();
    assert_eq!(services.store.len().unwrap(), 6);
}
