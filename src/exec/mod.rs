//! External process execution.
//!
//! Install steps and detection queries share one execution path: a
//! [`CommandRunner`] takes an executable and an ordered argument list and
//! yields the outcome as a value. Spawn failures and non-zero exits both
//! surface as [`OutfitterError::ExecutionFailed`], never as a panic —
//! callers decide whether a given step's failure is fatal.

pub mod stub;

pub use stub::StubRunner;

use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::error::{OutfitterError, Result};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

/// Uniform seam for invoking external installers and queries.
pub trait CommandRunner {
    /// Run an executable with an ordered argument list.
    ///
    /// A spawn failure or non-zero exit is returned as `Err`, carrying the
    /// command line and exit code for diagnostics.
    fn exec_file(&self, program: &Path, args: &[String]) -> Result<CommandOutput>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn exec_file(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        let start = Instant::now();
        let rendered = display_command(program, args);
        tracing::debug!("Executing: {}", rendered);

        let output = Command::new(program).args(args).output().map_err(|e| {
            tracing::debug!("Spawn failed for {}: {}", rendered, e);
            OutfitterError::ExecutionFailed {
                command: rendered.clone(),
                code: None,
            }
        })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: start.elapsed(),
        };

        if output.status.success() {
            Ok(result)
        } else {
            tracing::debug!(
                "Command exited with {:?}: {}",
                result.exit_code,
                rendered
            );
            Err(OutfitterError::ExecutionFailed {
                command: rendered,
                code: result.exit_code,
            })
        }
    }
}

/// Render a command line for logs and error messages.
fn display_command(program: &Path, args: &[String]) -> String {
    if args.is_empty() {
        program.display().to_string()
    } else {
        format!("{} {}", program.display(), args.join(" "))
    }
}
