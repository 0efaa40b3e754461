//! Detection of pre-existing installations.
//!
//! Detection runs a short chain of OS queries: resolve an installation root,
//! locate the binary subfolder, then ask the binary for its version. Any
//! failed step short-circuits the chain to "not found" — detection absence
//! is expected, never an error. Single attempt, no retry.

use std::path::{Path, PathBuf};

use crate::exec::CommandRunner;
use crate::version::extract_version;

/// A located existing installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedInstall {
    /// Folder containing the component's binaries.
    pub location: PathBuf,

    /// Version reported by the binary, normalized (revision suffix dropped).
    pub version: String,
}

/// How the installation root is resolved on this platform.
///
/// Selected once at startup per target platform; install layouts differ
/// enough that the two strategies share nothing beyond the root they yield.
#[derive(Debug, Clone)]
pub enum DetectionStrategy {
    /// Look up environment variables in order; first usable value wins.
    EnvVar { names: Vec<String> },

    /// Pattern-search a marker file for a `key=value` configuration line.
    MarkerFile { path: PathBuf, key: String },
}

impl DetectionStrategy {
    /// Resolve the installation root, or `None` if this strategy finds nothing.
    fn resolve_root(&self) -> Option<PathBuf> {
        match self {
            DetectionStrategy::EnvVar { names } => names.iter().find_map(|name| {
                let value = std::env::var(name).ok()?;
                // An unexpanded %VAR% echo means the variable was never set.
                if value.is_empty() || value.starts_with('%') {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }),
            DetectionStrategy::MarkerFile { path, key } => {
                let content = std::fs::read_to_string(path).ok()?;
                find_config_value(&content, key).map(PathBuf::from)
            }
        }
    }
}

/// Extract the value of a `key=value` line, tolerating quotes and whitespace.
fn find_config_value(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.trim();
        let rest = line.strip_prefix(key)?;
        let value = rest.trim_start().strip_prefix('=')?;
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

/// Locates an existing installation of one component.
#[derive(Debug)]
pub struct Detector {
    strategy: DetectionStrategy,
    executables: Vec<String>,
    version_args: Vec<String>,
}

impl Detector {
    /// Create a detector.
    ///
    /// `executables` are the binary names expected in the install root or
    /// its `bin` subfolder (e.g. `VBoxManage`, `VBoxManage.exe`).
    pub fn new(strategy: DetectionStrategy, executables: Vec<String>) -> Self {
        Self {
            strategy,
            executables,
            version_args: vec!["--version".to_string()],
        }
    }

    /// Override the arguments used for the version query.
    pub fn with_version_args(mut self, args: Vec<String>) -> Self {
        self.version_args = args;
        self
    }

    /// Look for an existing installation.
    ///
    /// Returns `None` when any step of the chain fails; a partial failure
    /// never surfaces as an error to the caller.
    pub fn detect_existing_install(&self, runner: &dyn CommandRunner) -> Option<DetectedInstall> {
        let root = self.strategy.resolve_root()?;
        tracing::debug!("Detection root: {}", root.display());

        let (folder, executable) = self.locate_binary(&root)?;

        let output = runner
            .exec_file(&executable, &self.version_args)
            .ok()?;
        let version = extract_version(&output.stdout)?;

        tracing::debug!(
            "Found version {} at {}",
            version,
            folder.display()
        );

        Some(DetectedInstall {
            location: folder,
            version,
        })
    }

    /// Containment check: the root itself, then its `bin` subfolder.
    fn locate_binary(&self, root: &Path) -> Option<(PathBuf, PathBuf)> {
        for folder in [root.to_path_buf(), root.join("bin")] {
            for name in &self.executables {
                let candidate = folder.join(name);
                if candidate.exists() {
                    return Some((folder, candidate));
                }
            }
        }
        None
    }
}
