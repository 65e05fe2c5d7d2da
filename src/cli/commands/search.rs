//! Search command - find indexed files
//!
//! Three modes:
//! - default: the configured finder (fzf when available)
//! - `--substring`: case-insensitive substring match in the index
//! - `--rank`: in-process fuzzy ranking, best matches first

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::search::{rank_fuzzy, RankedMatch, SearchOutcome, Selection};
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Initial search query
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Allow multiple selections
    #[arg(long, short = 'm')]
    pub multi: bool,

    /// Print every path containing the query (no interactive UI)
    #[arg(long, conflicts_with = "rank")]
    pub substring: bool,

    /// Print fuzzy-ranked matches (no interactive UI)
    #[arg(long)]
    pub rank: bool,

    /// Maximum ranked results (default: search.rank_limit)
    #[arg(long, short = 'k', requires = "rank")]
    pub limit: Option<usize>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub mode: &'static str,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranked: Vec<RankedMatch>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = args.query.clone().unwrap_or_default();

    let output = if args.rank {
        let limit = args
            .limit
            .unwrap_or(services.config.search.rank_limit)
            .max(1);
        search_ranked(services, &query, limit)?
    } else if args.substring {
        search_substring(services, &query)?
    } else {
        search_interactive(services, &query, args.multi, format).await?
    };

    match format {
        OutputFormat::Human => print_human(&output),
        OutputFormat::Json => print_json(&output)?,
    }

    Ok(())
}

fn search_substring(
    services: &Services,
    query: &str,
) -> Result<SearchResponseOutput, Box<dyn std::error::Error>> {
    let outcome = if services.store.is_empty()? {
        SearchOutcome::IndexEmpty
    } else {
        Selection::from_paths(services.store.search_substring(query)?).into()
    };

    Ok(SearchResponseOutput {
        query: query.to_string(),
        mode: "substring",
        outcome,
        ranked: Vec::new(),
    })
}

fn search_ranked(
    services: &Services,
    query: &str,
    limit: usize,
) -> Result<SearchResponseOutput, Box<dyn std::error::Error>> {
    let corpus = services.store.all_paths()?;
    let (outcome, ranked) = if corpus.is_empty() {
        (SearchOutcome::IndexEmpty, Vec::new())
    } else {
        let ranked = rank_fuzzy(&corpus, query, limit);
        let paths = ranked.iter().map(|m| m.path.clone()).collect();
        (Selection::from_paths(paths).into(), ranked)
    };

    Ok(SearchResponseOutput {
        query: query.to_string(),
        mode: "rank",
        outcome,
        ranked,
    })
}

async fn search_interactive(
    services: &Arc<Services>,
    query: &str,
    multi: bool,
    format: OutputFormat,
) -> Result<SearchResponseOutput, Box<dyn std::error::Error>> {
    let mode = services.finder().name();
    if format == OutputFormat::Human && services.finder().is_interactive() {
        if let Ok(count) = services.store.len() {
            eprintln!(
                "Searching {} files...",
                colors::number(&count.to_string())
            );
        }
    }

    // The finder may block on the terminal until the user picks something
    let worker = Arc::clone(services);
    let owned_query = query.to_string();
    let outcome = tokio::task::spawn_blocking(move || {
        worker.search(worker.finder(), &owned_query, multi)
    })
    .await??;

    Ok(SearchResponseOutput {
        query: query.to_string(),
        mode,
        outcome,
        ranked: Vec::new(),
    })
}

fn print_human(output: &SearchResponseOutput) {
    match &output.outcome {
        SearchOutcome::IndexEmpty => {
            println!("No files in index. Run 'everyfind index' first.");
        }
        SearchOutcome::NoMatch => {
            println!("{}", colors::dim("No matches."));
        }
        SearchOutcome::Selected { paths } if output.ranked.is_empty() => {
            for path in paths {
                println!("{path}");
            }
        }
        SearchOutcome::Selected { .. } => {
            for (i, m) in output.ranked.iter().enumerate() {
                println!(
                    "{:>3}. {} {}",
                    colors::rank(&(i + 1).to_string()),
                    colors::file_path(&m.path),
                    colors::score(&format!("({})", m.score))
                );
            }
        }
    }
}
