//! Wizard session collaborators.
//!
//! The component engine never resolves paths itself: an
//! [`InstallerDataService`] supplies the temp and install directories, and a
//! [`DownloadTracker`] owned by the session gates secondary installs while
//! sibling components are still downloading.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Path resolution supplied by the wizard session.
///
/// Read-only from the engine's perspective; implementations decide where
/// temp artifacts and installed components live.
pub trait InstallerDataService {
    /// Directory for downloaded installers and temporary extraction.
    fn temp_dir(&self) -> &Path;

    /// Root directory components are installed under.
    fn install_dir(&self) -> &Path;

    /// Dedicated install subdirectory for one component.
    fn component_dir(&self, name: &str) -> PathBuf;
}

/// Production data service over a pair of directories.
#[derive(Debug, Clone)]
pub struct SessionDirs {
    temp_dir: PathBuf,
    install_dir: PathBuf,
}

impl SessionDirs {
    /// Create a data service rooted at the given directories.
    pub fn new(temp_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            install_dir: install_dir.into(),
        }
    }
}

impl InstallerDataService for SessionDirs {
    fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    fn component_dir(&self, name: &str) -> PathBuf {
        self.install_dir.join(name)
    }
}

/// Counts in-flight downloads across the wizard session.
///
/// Components check the tracker before their secondary install phase so the
/// msiexec-equivalent step never runs while sibling components are still
/// writing into the shared temp directory. Clones share one counter.
#[derive(Debug, Clone, Default)]
pub struct DownloadTracker {
    in_flight: Arc<AtomicUsize>,
}

impl DownloadTracker {
    /// Create a tracker with no downloads in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a download started.
    pub fn begin(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    /// Record that a download finished (success or failure).
    pub fn finish(&self) {
        let previous = self.in_flight.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "finish() without matching begin()");
    }

    /// Whether any component is still downloading.
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}
