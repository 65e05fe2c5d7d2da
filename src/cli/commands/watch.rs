//! Watch command - periodic re-indexing of the configured roots

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::config::minutes_to_duration;
use crate::core::indexer::run_periodic;
use crate::core::services::Services;
use clap::Args;
use std::future::Future;
use std::sync::Arc;

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Minutes between runs (default: indexing.reindex_interval_minutes)
    #[arg(long, short = 'n')]
    pub interval_minutes: Option<u64>,

    /// Run even if indexing.auto_reindex is false
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Execute the watch command until Ctrl-C
pub async fn execute(
    args: WatchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    execute_until(args, services, format, shutdown).await
}

/// Execute the watch command until `shutdown` resolves
pub async fn execute_until<F>(
    args: WatchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()>,
{
    let indexing = &services.config.indexing;
    if !indexing.auto_reindex && !args.force {
        return Err(
            "Auto-reindex is disabled. Set indexing.auto_reindex = true or pass --force.".into(),
        );
    }

    let minutes = args
        .interval_minutes
        .unwrap_or(indexing.reindex_interval_minutes);
    if minutes == 0 {
        return Err("Interval must be at least one minute.".into());
    }

    let roots = indexing.effective_roots();
    let pipeline = Arc::new(services.create_pipeline()?);

    if format == OutputFormat::Human {
        eprintln!(
            "Re-indexing {} root(s) every {} min. Press Ctrl-C to stop.",
            colors::number(&roots.len().to_string()),
            colors::number(&minutes.to_string())
        );
    }

    let runs = run_periodic(
        Arc::clone(&services.store),
        pipeline,
        roots,
        minutes_to_duration(minutes),
        shutdown,
    )
    .await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} after {} run(s)",
                colors::success("Stopped"),
                colors::number(&runs.to_string())
            );
        }
        OutputFormat::Json => {
            let response = serde_json::json!({ "runs": runs });
            print_json(&response)?;
        }
    }

    Ok(())
}
