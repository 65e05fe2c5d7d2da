//! everyfind - fast filename search
//!
//! # Examples
//!
//! ```bash
//! # Index the home directory (or the configured roots)
//! everyfind index
//!
//! # Index specific directories, skipping build output
//! everyfind index ~/src ~/docs --exclude target --exclude node_modules
//!
//! # Interactive search with an initial query
//! everyfind search -q report
//!
//! # Show statistics
//! everyfind stats
//! ```

use clap::Parser;
use everyfind::cli::{run, Cli};
use everyfind::EveryfindError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr subscriber
///
/// RUST_LOG wins; otherwise warnings only, or debug with `--verbose`.
/// EVERYFIND_LOG_FORMAT=json switches to JSON lines.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "everyfind=debug"
    } else {
        "everyfind=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    let json = std::env::var("EVERYFIND_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn hint_for(err: &EveryfindError) -> Option<&'static str> {
    if err.is_bad_request() {
        Some("Check the arguments, or run 'everyfind show-config' to review the configuration.")
    } else if err.is_storage() {
        Some("The index may be in use by another everyfind process, or --db points somewhere unwritable.")
    } else {
        None
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if let Some(hint) = e.downcast_ref::<EveryfindError>().and_then(hint_for) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}
