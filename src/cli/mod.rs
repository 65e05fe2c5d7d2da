//! CLI adapter for everyfind
//!
//! Maps clap subcommands onto the core services. Every command opens the
//! index once through [`Services`] and closes it before returning.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::{migrate_legacy_settings, XdgDirs};

/// everyfind - fast file search for Linux
///
/// Index file names and metadata under your directories, then find files
/// by substring or fuzzy matching.
#[derive(Parser, Debug)]
#[command(name = "everyfind")]
#[command(version)]
#[command(about = "Fast filename search", long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  everyfind index ~/projects          Index a directory
  everyfind search                    Interactive fuzzy search
  everyfind search -q report --rank   Ranked matches without a UI
  everyfind stats                     Show index statistics")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Index location (default: ~/.config/everyfind/index.db)
    #[arg(long, global = true, env = "EVERYFIND_DB")]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index directories (default: configured roots, then home directory)
    Index(commands::IndexArgs),

    /// Search indexed files
    Search(commands::SearchArgs),

    /// Remove every entry from the index
    Clear(commands::ClearArgs),

    /// Show index statistics
    Stats(commands::StatsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Re-index the configured roots periodically until interrupted
    Watch(commands::WatchArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  everyfind completions bash > ~/.local/share/bash-completion/completions/everyfind
    ///   zsh:   everyfind completions zsh > ~/.zfunc/_everyfind
    ///   fish:  everyfind completions fish > ~/.config/fish/completions/everyfind.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Completions don't need the index
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    if let Err(e) = migrate_legacy_settings(&xdg) {
        output::print_warning(&format!("Settings migration issue: {e}"));
    }

    let mut config = Config::load_with_xdg(&xdg)?;
    if let Some(db) = cli.db {
        config.storage.index_path = db;
    }
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    let result = match cli.command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Clear(args) => commands::clear::execute(args, &services, cli.format).await,
        Commands::Stats(args) => commands::stats::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => {
            commands::config::execute(args, &services, cli.format).await
        }
        Commands::Watch(args) => commands::watch::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    };

    services.shutdown()?;
    result
}
