//! Progress reporting for component lifecycles.
//!
//! This module provides:
//! - [`ProgressSink`] trait for progress abstraction
//! - [`TerminalProgress`] for interactive terminal usage
//! - [`MockProgress`] for tests
//!
//! A sink is purely a notification target: the engine never consumes return
//! values from it.

pub mod mock;
pub mod terminal;

pub use mock::MockProgress;
pub use terminal::TerminalProgress;

use std::time::Duration;

/// Trait for progress notifications during detection, download, and install.
///
/// This trait allows mocking the progress display in tests.
pub trait ProgressSink {
    /// Update the status line (e.g. "Downloading", "Installing").
    fn set_status(&mut self, status: &str);

    /// Update the current progress value.
    fn set_current(&mut self, value: u64);

    /// Update the label shown next to the progress value.
    fn set_label(&mut self, label: &str);

    /// Announce the total download size in bytes.
    fn set_total_download_size(&mut self, size: u64);

    /// Mark the operation as complete.
    fn set_complete(&mut self);

    /// Report bytes received and elapsed time since the transfer started.
    fn downloaded(&mut self, bytes: u64, elapsed: Duration);
}

/// Sink that discards every notification (quiet/headless runs).
#[derive(Debug, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn set_status(&mut self, _status: &str) {}
    fn set_current(&mut self, _value: u64) {}
    fn set_label(&mut self, _label: &str) {}
    fn set_total_download_size(&mut self, _size: u64) {}
    fn set_complete(&mut self) {}
    fn downloaded(&mut self, _bytes: u64, _elapsed: Duration) {}
}
