//! Interactive selection through an external `fzf` process.
//!
//! The corpus is piped to fzf's stdin as decorated lines; fzf draws its
//! UI on the controlling terminal and prints the chosen lines on stdout.
//! Exit status 0 means a selection, 1 no match, 130 an abort.

use std::io::Write;
use std::process::{Command, Stdio};

use super::display::{decorate, resolve_line, FIELD_SEPARATOR};
use super::{Finder, Selection};

/// Default executable name, looked up on `PATH`
pub const FZF_BINARY: &str = "fzf";

/// Finder backed by the `fzf` executable
#[derive(Debug, Clone)]
pub struct FzfFinder {
    binary: String,
    prompt: String,
}

impl Default for FzfFinder {
    fn default() -> Self {
        Self::new(FZF_BINARY)
    }
}

impl FzfFinder {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            prompt: "Everyfind: ".to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Check whether the executable can be launched
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn command(&self, query: &str, multi: bool) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(if multi { "--multi" } else { "--no-multi" })
            .arg("-i")
            .arg(format!("--delimiter={FIELD_SEPARATOR}"))
            .arg("--with-nth=2..")
            .arg(format!("--prompt={}", self.prompt))
            .arg(format!("--query={query}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }

    fn run(&self, corpus: &[String], query: &str, multi: bool) -> std::io::Result<Option<String>> {
        let mut child = self.command(query, multi).spawn()?;

        let lines = decorate(corpus);
        let stdin = child.stdin.take();
        // fzf starts reading before input ends; feed it from a separate thread
        let feeder = std::thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                for line in lines {
                    if writeln!(stdin, "{line}").is_err() {
                        break;
                    }
                }
            }
        });

        let output = child.wait_with_output()?;
        let _ = feeder.join();

        match output.status.code() {
            Some(0) => Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned())),
            Some(1) | Some(130) => Ok(None),
            other => {
                tracing::warn!("fzf exited abnormally ({:?})", other);
                Ok(None)
            }
        }
    }
}

impl Finder for FzfFinder {
    fn name(&self) -> &'static str {
        "fzf"
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn search(&self, corpus: &[String], query: &str, multi: bool) -> Selection {
        if corpus.is_empty() {
            return Selection::None;
        }

        let stdout = match self.run(corpus, query, multi) {
            Ok(Some(stdout)) => stdout,
            Ok(None) => return Selection::None,
            Err(e) => {
                tracing::error!("Failed to run {}: {}", self.binary, e);
                return Selection::None;
            }
        };

        let selected: Vec<String> = stdout
            .lines()
            .filter_map(|line| resolve_line(line, corpus))
            .cloned()
            .collect();

        Selection::from_paths(selected)
    }
}
