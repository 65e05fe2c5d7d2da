//! Clear command - remove every entry from the index

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::io::{self, Write};
use std::sync::Arc;

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Clear without asking
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Ask a yes/no question on stdin; anything but `y` is a no
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Execute the clear command
///
/// Asks for confirmation when the index is not empty, unless `--force`.
pub async fn execute(
    args: ClearArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let count = services.store.len()?;

    if !args.force && count > 0 {
        let prompt = format!(
            "Remove {} entries from '{}'?",
            colors::number(&count.to_string()),
            colors::file_path(&services.store.location().display().to_string())
        );
        if !confirm(&prompt)? {
            println!("{}", colors::dim("Cancelled."));
            return Ok(());
        }
    }

    services.store.clear()?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} ({} entries removed)",
                colors::success("Index cleared"),
                colors::number(&count.to_string())
            );
        }
        OutputFormat::Json => {
            let response = serde_json::json!({
                "cleared": true,
                "removed": count,
                "location": services.store.location().to_string_lossy(),
            });
            print_json(&response)?;
        }
    }

    Ok(())
}
