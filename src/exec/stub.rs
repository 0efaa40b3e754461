//! Stub command runner for testing.
//!
//! `StubRunner` implements [`CommandRunner`] and replays a scripted sequence
//! of responses while recording every invocation for later assertion.
//!
//! # Example
//!
//! ```
//! use outfitter::exec::{CommandRunner, StubRunner};
//! use std::path::Path;
//!
//! let runner = StubRunner::new();
//! runner.push_success("5.0.8r103449");
//!
//! let output = runner.exec_file(Path::new("VBoxManage"), &["--version".into()]).unwrap();
//! assert_eq!(output.stdout, "5.0.8r103449");
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{OutfitterError, Result};

use super::{CommandOutput, CommandRunner};

/// One scripted response.
#[derive(Debug, Clone)]
enum StubResponse {
    Success { stdout: String },
    Failure { code: Option<i32> },
}

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Executable path as given.
    pub program: PathBuf,
    /// Ordered argument list as given.
    pub args: Vec<String>,
}

/// Scripted command runner that records invocations.
///
/// Responses are consumed in order; a call past the end of the script
/// returns an execution failure.
#[derive(Debug, Default)]
pub struct StubRunner {
    responses: RefCell<VecDeque<StubResponse>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl StubRunner {
    /// Create an empty stub runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response with the given stdout.
    pub fn push_success(&self, stdout: &str) {
        self.responses.borrow_mut().push_back(StubResponse::Success {
            stdout: stdout.to_string(),
        });
    }

    /// Queue a failure response with the given exit code.
    pub fn push_failure(&self, code: Option<i32>) {
        self.responses
            .borrow_mut()
            .push_back(StubResponse::Failure { code });
    }

    /// All invocations recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for StubRunner {
    fn exec_file(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });

        match self.responses.borrow_mut().pop_front() {
            Some(StubResponse::Success { stdout }) => Ok(CommandOutput {
                exit_code: Some(0),
                stdout,
                stderr: String::new(),
                duration: Duration::ZERO,
            }),
            Some(StubResponse::Failure { code }) => Err(OutfitterError::ExecutionFailed {
                command: program.display().to_string(),
                code,
            }),
            None => Err(OutfitterError::ExecutionFailed {
                command: format!("unscripted call: {}", program.display()),
                code: None,
            }),
        }
    }
}
