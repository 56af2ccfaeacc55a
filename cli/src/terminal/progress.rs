//! Progress bar output using indicatif.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use jumpsearch_core::{ProgressSink, ProgressUpdate};
use std::time::Duration;

/// Scan progress shown on stderr; hidden when stderr is not a terminal
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let bar = if Term::stderr().is_term() {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} {prefix} [{bar:30.cyan/blue}] {percent:>3}% {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn begin(&self, title: &str, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(title.to_string());
        self.bar.set_message("(Ctrl-C to stop)");
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn report(&self, update: ProgressUpdate) {
        let total = self.bar.length().unwrap_or(0);
        let position = (update.percent / 100.0 * total as f64).round() as u64;
        self.bar.set_position(position.min(total));
        self.bar.set_message(update.message);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
