//! Output formatting for CLI commands
//!
//! Helpers for human-readable output. Colors respect the NO_COLOR env var
//! (handled by `colored`). JSON output is written by each command with
//! `serde_json`.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for fuzzy scores
    pub fn score(s: &str) -> ColoredString {
        s.magenta()
    }

    /// Style for rank numbers
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }
}

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Binary-prefixed size, one decimal above bytes: `512 B`, `1.5 KB`
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", SIZE_UNITS[unit])
    }
}

/// `250ms`, `4.20s` or `2m 5.0s`
pub fn format_duration(secs: f64) -> String {
    match secs {
        s if s < 1.0 => format!("{:.0}ms", s * 1000.0),
        s if s < 60.0 => format!("{s:.2}s"),
        s => {
            let mins = (s / 60.0).floor();
            format!("{mins:.0}m {:.1}s", s - mins * 60.0)
        }
    }
}

/// Convert epoch seconds to a UTC timestamp
pub fn epoch_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    Utc.timestamp_opt(whole as i64, nanos).single()
}

/// Coarsest non-zero unit of the time since `timestamp`: `3d ago`, `just now`
pub fn format_relative_time(timestamp: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*timestamp);
    if elapsed < chrono::Duration::zero() {
        return "in the future".to_string();
    }

    match (elapsed.num_days(), elapsed.num_hours(), elapsed.num_minutes()) {
        (d, _, _) if d > 0 => format!("{d}d ago"),
        (_, h, _) if h > 0 => format!("{h}h ago"),
        (_, _, m) if m > 0 => format!("{m}m ago"),
        _ => "just now".to_string(),
    }
}

/// Pretty-print a response as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}
