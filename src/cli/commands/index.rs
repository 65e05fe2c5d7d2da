//! Index command - scan directories into the index

use crate::cli::output::{colors, format_duration, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::indexer::{FilterSet, IndexJob};
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Progress line interval (files)
const PROGRESS_EVERY: usize = 1000;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Directories to index (default: configured roots, then home directory)
    pub paths: Vec<PathBuf>,

    /// Directory or file names to skip (replaces the configured list)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Globs or extensions to keep, e.g. '*.pdf' or txt (replaces the configured list)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Path prefixes to skip (replaces the configured list)
    #[arg(long)]
    pub exclude_path: Vec<String>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub roots: Vec<String>,
    pub files_indexed: usize,
    pub files_failed: usize,
    pub cancelled: bool,
    pub duration_secs: f64,
    pub throughput_files_per_sec: f64,
}

fn pick<'a>(given: &'a [String], configured: &'a [String]) -> &'a [String] {
    if given.is_empty() {
        configured
    } else {
        given
    }
}

/// Execute the index command
///
/// Ctrl-C cancels the run; entries committed so far stay in the index.
pub async fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let indexing = &services.config.indexing;

    let roots = if args.paths.is_empty() {
        indexing.effective_roots()
    } else {
        args.paths.clone()
    };
    if roots.is_empty() {
        return Err("No directories to index. Pass a path or set indexing.roots.".into());
    }

    for root in &roots {
        if !root.is_dir() {
            print_warning(&format!(
                "'{}' is not an accessible directory, skipping",
                root.display()
            ));
        }
    }

    let filters = FilterSet::new(
        pick(&args.exclude, &indexing.exclude_names).iter().cloned(),
        pick(&args.exclude_path, &indexing.exclude_paths),
        pick(&args.include, &indexing.include_patterns),
    )?;

    let show_progress = !args.quiet && format == OutputFormat::Human;
    if show_progress {
        for root in &roots {
            eprintln!("Indexing {}...", colors::file_path(&root.display().to_string()));
        }
    }

    let pipeline = Arc::new(services.pipeline_with(filters));
    let mut job = IndexJob::spawn(Arc::clone(&services.store), pipeline, roots.clone());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            progress = job.next_progress() => match progress {
                Some(p) => {
                    if show_progress && p.count % PROGRESS_EVERY == 0 {
                        eprintln!(
                            "  {} files... {}",
                            colors::number(&p.count.to_string()),
                            colors::dim(&p.path)
                        );
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                job.cancel();
                if show_progress {
                    eprintln!("{}", colors::warning("Cancelling..."));
                }
            }
        }
    }

    let stats = job.wait().await?;

    let duration_secs = stats.duration_ms as f64 / 1000.0;
    let throughput = if duration_secs > 0.0 {
        stats.files_indexed as f64 / duration_secs
    } else {
        0.0
    };

    let response = IndexResponse {
        roots: roots
            .iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect(),
        files_indexed: stats.files_indexed,
        files_failed: stats.files_failed,
        cancelled: stats.cancelled,
        duration_secs,
        throughput_files_per_sec: throughput,
    };

    match format {
        OutputFormat::Human => {
            let verb = if response.cancelled {
                colors::warning("Cancelled after indexing")
            } else {
                colors::success("Indexed")
            };
            println!(
                "{} {} files in {}",
                verb,
                colors::number(&response.files_indexed.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.files_failed > 0 {
                println!(
                    "{} files could not be stored (see log)",
                    colors::warning(&response.files_failed.to_string())
                );
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}
