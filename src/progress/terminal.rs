//! Terminal progress rendering.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::ProgressSink;

/// Progress sink rendering a per-component bar in the terminal.
pub struct TerminalProgress {
    bar: ProgressBar,
    name: String,
}

impl TerminalProgress {
    /// Create a bar for one component.
    pub fn new(name: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.magenta} {prefix:.bold} {msg}")
                .unwrap(),
        );
        bar.set_prefix(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            name: name.to_string(),
        }
    }

    /// Create a bar that doesn't show (for silent mode).
    pub fn hidden(name: &str) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            name: name.to_string(),
        }
    }

    /// Component name this bar reports for.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ProgressSink for TerminalProgress {
    fn set_status(&mut self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    fn set_current(&mut self, value: u64) {
        self.bar.set_position(value);
    }

    fn set_label(&mut self, label: &str) {
        self.bar.set_prefix(label.to_string());
    }

    fn set_total_download_size(&mut self, size: u64) {
        self.bar.set_length(size);
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold} [{bar:30}] {bytes}/{total_bytes} {msg}")
                .unwrap(),
        );
    }

    fn set_complete(&mut self) {
        self.bar.finish_with_message("done");
    }

    fn downloaded(&mut self, bytes: u64, _elapsed: Duration) {
        self.bar.set_position(bytes);
    }
}
