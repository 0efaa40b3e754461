//! Command-line interface for Outfitter.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and the wizard command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`wizard`] - Detect and install command implementations

pub mod args;
pub mod wizard;

pub use args::{Cli, Commands};
pub use wizard::{run_detect, run_install, WizardOptions};
