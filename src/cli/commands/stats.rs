//! Stats command - show index statistics

use crate::cli::output::{
    colors, epoch_to_datetime, format_bytes, format_relative_time, print_json,
};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Statistics response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub location: String,
    pub total_files: usize,
    pub size_bytes: u64,
    /// RFC 3339 timestamp of the most recent upsert
    pub last_indexed: Option<String>,
}

/// Execute the stats command
pub async fn execute(
    _args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services.store.stats()?;
    let last_indexed = stats.last_indexed_at.and_then(epoch_to_datetime);

    let response = StatsResponse {
        location: stats.location,
        total_files: stats.entry_count,
        size_bytes: stats.size_bytes,
        last_indexed: last_indexed.map(|t| t.to_rfc3339()),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{}  {}",
                colors::label("Database:"),
                colors::file_path(&response.location)
            );
            println!(
                "{}  {}",
                colors::label("Total files:"),
                colors::number(&response.total_files.to_string())
            );
            println!(
                "{}  {}",
                colors::label("Index size:"),
                colors::number(&format_bytes(response.size_bytes))
            );
            match last_indexed {
                Some(t) => println!(
                    "{}  {}",
                    colors::label("Last indexed:"),
                    colors::dim(&format_relative_time(&t))
                ),
                None => println!("{}  never", colors::label("Last indexed:")),
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}
