//! Blocking user interaction: confirmations and alerts.

use std::io::{self, BufRead, Write};

/// Synchronous user interaction injected into [`crate::store::NoteStore`].
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. Only an explicit yes returns `true`.
    fn confirm(&self, message: &str) -> bool;

    /// Show a message the user has to see before continuing.
    fn alert(&self, message: &str);
}

/// Prompter for an interactive terminal: questions on stdin, alerts on stderr.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr().lock();
        if write!(stderr, "{} [y/N] ", message)
            .and_then(|_| stderr.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
