//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Outfitter - setup wizard for third-party runtimes.
#[derive(Debug, Parser)]
#[command(name = "outfitter")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the component manifest
    #[arg(short, long, global = true, default_value = "outfitter.yml")]
    pub manifest: PathBuf,

    /// Directory for downloaded installers and temporary extraction
    #[arg(long, global = true, default_value = "tmp")]
    pub temp_dir: PathBuf,

    /// Root directory components are installed under
    #[arg(long, global = true, default_value = "install")]
    pub install_dir: PathBuf,

    /// Answer prompts with the first valid option
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report existing installations for each manifest component
    Detect,

    /// Run the full lifecycle: detect, choose, download, install (default)
    Install,
}
