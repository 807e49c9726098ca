use super::{CommandExecutor, ExecutionOutput};
use crate::error::{ModeError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands through a shell so pipes and quoting in templates work
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    program: String,
    args: Vec<String>,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        if cfg!(windows) {
            Self::new("cmd", vec!["/C".to_string()])
        } else {
            Self::new("sh", vec!["-c".to_string()])
        }
    }
}

impl ShellExecutor {
    /// `program args... <command>`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait::async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &str) -> Result<ExecutionOutput> {
        debug!("Executing command: {}", command);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        // cmd.exe parses its own command line, so pass it through unquoted
        #[cfg(windows)]
        cmd.raw_arg(command);
        #[cfg(not(windows))]
        cmd.arg(command);

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ModeError::ExecutionFailure(format!("{}: {}", command, e)))?;

        let result = ExecutionOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        if result.success() {
            debug!("Command output: {} bytes", result.stdout.len());
        } else {
            warn!(
                "Command exited with status {}: {}",
                output.status,
                result.stderr.trim()
            );
        }
        Ok(result)
    }
}

#[cfg(all(test, windows))]
mod windows_tests {
    use super::*;

    #[tokio::test]
    async fn test_inner_quotes_reach_cmd_unescaped() {
        let executor = ShellExecutor::default();
        let output = executor.execute(r#"echo "pid eq 42""#).await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), r#""pid eq 42""#);
    }
}
