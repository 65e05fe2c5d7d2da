//! Tests for clear, stats and show-config

use crate::common::{create_test_services, index_tree, TestTree};
use everyfind::cli::commands::{clear, config, stats};
use everyfind::cli::OutputFormat;
use everyfind::core::indexer::FilterSet;

#[tokio::test]
async fn test_clear_force_removes_everything() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::flat(5);
    index_tree(&services.store, &[tree.root()], FilterSet::default());
    assert_eq!(services.store.len().unwrap(), 5);

    clear::execute(
        clear::ClearArgs { force: true },
        &services,
        OutputFormat::Json,
    )
    .await
    .unwrap();

    assert!(services.store.all_paths().unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_empty_index_needs_no_confirmation() {
    let (services, _storage) = create_test_services();

    let result = clear::execute(
        clear::ClearArgs { force: false },
        &services,
        OutputFormat::Human,
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_stats_both_formats() {
    let (services, _storage) = create_test_services();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        stats::execute(stats::StatsArgs {}, &services, format)
            .await
            .unwrap();
    }

    let tree = TestTree::basic();
    index_tree(&services.store, &[tree.root()], FilterSet::default());
    for format in [OutputFormat::Human, OutputFormat::Json] {
        stats::execute(stats::StatsArgs {}, &services, format)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_show_config_formats() {
    let (services, _storage) = create_test_services();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        config::execute(config::ConfigArgs { toml: false }, &services, format)
            .await
            .unwrap();
    }
    config::execute(config::ConfigArgs { toml: true }, &services, OutputFormat::Human)
        .await
        .unwrap();
}

#[test]
fn test_config_response_flattens_sections() {
    let (services, _storage) = create_test_services();
    let response = config::ConfigResponse {
        config_file: "/tmp/config.toml".to_string(),
        effective_roots: vec!["/data".to_string()],
        config: services.config.as_ref(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["config_file"], "/tmp/config.toml");
    assert_eq!(json["search"]["finder"], "substring");
    assert_eq!(json["indexing"]["reindex_interval_minutes"], 60);
}
