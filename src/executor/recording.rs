use super::{CommandExecutor, ExecutionOutput};
use crate::error::{ModeError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Executor that never spawns anything: it records each command and answers
/// with canned output registered for that exact command text, or with an
/// execution failure for commands registered through [`fail`](Self::fail).
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    responses: Mutex<HashMap<String, ExecutionOutput>>,
    failures: Mutex<HashSet<String>>,
    executed: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with a successful run printing `stdout`.
    pub fn with_output(self, command: &str, stdout: &str) -> Self {
        self.respond(
            command,
            ExecutionOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(0),
            },
        );
        self
    }

    pub fn respond(&self, command: &str, output: ExecutionOutput) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(command.to_string(), output);
    }

    /// Make `command` fail as if it could not be started.
    pub fn fail(&self, command: &str) {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(command.to_string());
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &str) -> Result<ExecutionOutput> {
        tracing::info!("Dry run: {}", command);
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command.to_string());

        if self
            .failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(command)
        {
            return Err(ModeError::ExecutionFailure(format!(
                "{}: simulated failure",
                command
            )));
        }

        let output = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(command)
            .cloned()
            .unwrap_or(ExecutionOutput {
                exit_code: Some(0),
                ..Default::default()
            });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_commands_in_order() {
        let executor = RecordingExecutor::new().with_output("list", "a\nb\n");

        let output = executor.execute("list").await.unwrap();
        assert_eq!(output.stdout, "a\nb\n");

        let output = executor.execute("unknown").await.unwrap();
        assert!(output.stdout.is_empty());
        assert!(output.success());

        assert_eq!(executor.executed(), vec!["list", "unknown"]);
    }

    #[tokio::test]
    async fn test_failing_command_is_still_recorded() {
        let executor = RecordingExecutor::new().with_output("boom", "ignored");
        executor.fail("boom");

        let result = executor.execute("boom").await;
        assert!(matches!(result, Err(ModeError::ExecutionFailure(_))));
        assert_eq!(executor.executed(), vec!["boom"]);
    }
}
