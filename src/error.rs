//! Error types for Outfitter operations.
//!
//! This module defines [`OutfitterError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `OutfitterError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `OutfitterError::Other`) for unexpected errors
//! - Asynchronous lifecycle failures (download, install) are returned as values;
//!   only construction-time configuration errors are raised eagerly

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Outfitter operations.
#[derive(Debug, Error)]
pub enum OutfitterError {
    /// Component has neither a download URL nor a pre-supplied installer file.
    #[error("No download URL set for component '{component}'")]
    NoDownloadSource { component: String },

    /// Installer download failed in the transport layer.
    #[error("Download failed for '{component}': {message}")]
    DownloadFailed { component: String, message: String },

    /// External installer or query process failed to spawn or exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    ExecutionFailed { command: String, code: Option<i32> },

    /// Detected installation is older than the required baseline.
    #[error("'{component}' version {detected} is older than required {required}")]
    VersionIncompatible {
        component: String,
        detected: String,
        required: String,
    },

    /// Component manifest could not be read or parsed.
    #[error("Failed to load manifest at {path:?}: {message}")]
    ManifestError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Outfitter operations.
pub type Result<T> = std::result::Result<T, OutfitterError>;
