//! Execution bridge to the operating system
//!
//! The engine hands a finished command string to a [`CommandExecutor`] and
//! waits for it to complete before doing anything else, so at most one
//! process is in flight at a time.

pub mod recording;
pub mod shell;

pub use recording::RecordingExecutor;
pub use shell::ShellExecutor;

use crate::error::Result;

/// Decoded result of one finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a command to completion. An `Err` means the command could not be
/// started at all; a non-zero exit is reported through `exit_code`.
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> Result<ExecutionOutput>;
}
