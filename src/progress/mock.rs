//! Mock progress sink for testing.
//!
//! `MockProgress` implements the `ProgressSink` trait and captures all
//! notifications for later assertion.
//!
//! # Example
//!
//! ```
//! use outfitter::progress::{MockProgress, ProgressSink};
//!
//! let mut progress = MockProgress::new();
//! progress.set_status("Downloading");
//!
//! assert!(progress.statuses().contains(&"Downloading".to_string()));
//! ```

use std::time::Duration;

use super::ProgressSink;

/// Mock progress sink that records every notification.
#[derive(Debug, Default)]
pub struct MockProgress {
    statuses: Vec<String>,
    currents: Vec<u64>,
    labels: Vec<String>,
    total_sizes: Vec<u64>,
    byte_events: Vec<(u64, Duration)>,
    completed: usize,
}

impl MockProgress {
    /// Create an empty mock sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All status updates, in order.
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    /// All labels, in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// All current-value updates, in order.
    pub fn currents(&self) -> &[u64] {
        &self.currents
    }

    /// All announced total sizes.
    pub fn total_sizes(&self) -> &[u64] {
        &self.total_sizes
    }

    /// All byte-progress events.
    pub fn byte_events(&self) -> &[(u64, Duration)] {
        &self.byte_events
    }

    /// How many times completion was reported.
    pub fn completions(&self) -> usize {
        self.completed
    }

    /// Whether a status update containing `needle` was recorded.
    pub fn has_status(&self, needle: &str) -> bool {
        self.statuses.iter().any(|s| s.contains(needle))
    }
}

impl ProgressSink for MockProgress {
    fn set_status(&mut self, status: &str) {
        self.statuses.push(status.to_string());
    }

    fn set_current(&mut self, value: u64) {
        self.currents.push(value);
    }

    fn set_label(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }

    fn set_total_download_size(&mut self, size: u64) {
        self.total_sizes.push(size);
    }

    fn set_complete(&mut self) {
        self.completed += 1;
    }

    fn downloaded(&mut self, bytes: u64, elapsed: Duration) {
        self.byte_events.push((bytes, elapsed));
    }
}
