//! Outfitter - setup wizard engine for third-party runtimes.
//!
//! Outfitter manages the installable components of a multi-step setup
//! session: for each dependency it decides whether to reuse an existing
//! installation, download and run a fresh installer, or report an
//! incompatible existing version.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`component`] - Installable component lifecycle state machine
//! - [`detect`] - Platform-specific detection of existing installations
//! - [`download`] - URL templating and download transports
//! - [`error`] - Error types and result aliases
//! - [`exec`] - External process execution
//! - [`manifest`] - Component manifest loading
//! - [`progress`] - Progress sinks (terminal, mock, silent)
//! - [`session`] - Data-service collaborator and the download gate
//! - [`version`] - Semantic version comparison and extraction
//!
//! # Example
//!
//! ```
//! use outfitter::component::InstallableComponent;
//! use outfitter::session::SessionDirs;
//!
//! let dirs = SessionDirs::new("tmp", "install");
//! let component = InstallableComponent::new(
//!     "virtualbox",
//!     "5.0.8",
//!     "103449",
//!     &dirs,
//!     Some("http://host/${version}/VirtualBox-${version}-${revision}-Win.exe".into()),
//!     None,
//! )
//! .unwrap();
//! assert!(component.use_download());
//! ```

pub mod cli;
pub mod component;
pub mod detect;
pub mod download;
pub mod error;
pub mod exec;
pub mod manifest;
pub mod progress;
pub mod session;
pub mod version;

pub use error::{OutfitterError, Result};
