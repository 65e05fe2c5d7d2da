//! Config command - show current configuration

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective configuration as TOML (a starting config.toml)
    #[arg(long)]
    pub toml: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub effective_roots: Vec<String>,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();

    if args.toml {
        print!("{}", toml::to_string_pretty(config)?);
        return Ok(());
    }

    let response = ConfigResponse {
        config_file: XdgDirs::new().config_file().to_string_lossy().into_owned(),
        effective_roots: config
            .indexing
            .effective_roots()
            .iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", colors::file_path(&response.config_file));
            println!("  indexing:");
            println!("    roots: {:?}", response.effective_roots);
            println!(
                "    include_patterns: {:?}",
                config.indexing.include_patterns
            );
            println!("    exclude_paths: {:?}", config.indexing.exclude_paths);
            println!("    exclude_names: {:?}", config.indexing.exclude_names);
            println!("    auto_reindex: {}", config.indexing.auto_reindex);
            println!(
                "    reindex_interval_minutes: {}",
                config.indexing.reindex_interval_minutes
            );
            println!(
                "    commit_batch_size: {}",
                config.indexing.commit_batch_size
            );
            println!("  storage:");
            println!(
                "    index_path: {}",
                colors::file_path(&config.storage.index_path.display().to_string())
            );
            println!("  search:");
            println!("    finder: {}", config.search.finder);
            println!("    rank_limit: {}", config.search.rank_limit);
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}
