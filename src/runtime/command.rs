// ABOUTME: Subprocess driver for engine command-line invocations.
// ABOUTME: Runs one argument vector under a deadline and classifies the outcome.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Why an engine invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {status}: {output}")]
    Exited {
        command: String,
        status: i32,
        output: String,
    },

    #[error("`{command}` did not finish within {after:?}")]
    TimedOut { command: String, after: Duration },
}

impl CommandError {
    /// Exit status, if the process ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Exited { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Combined output captured before the failure.
    pub fn output(&self) -> &str {
        match self {
            CommandError::Exited { output, .. } => output,
            _ => "",
        }
    }
}

/// Output of a successful invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        combine(&self.stdout, &self.stderr)
    }
}

fn combine(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim();
    let stderr = stderr.trim();
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, _) => stderr.to_string(),
        (_, true) => stdout.to_string(),
        _ => format!("{stdout}\n{stderr}"),
    }
}

/// A resolved engine executable plus the deadline applied to each call.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    program: PathBuf,
    timeout: Duration,
}

impl EngineCommand {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Run the engine with `args` under the default deadline.
    pub async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandError> {
        self.run_with_timeout(args, self.timeout).await
    }

    /// Run the engine with `args`, killing it if `timeout` elapses.
    ///
    /// Dropping the returned future also kills the child process.
    pub async fn run_with_timeout(
        &self,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let command = self.render(args);
        tracing::debug!("Executing: {command}");

        let mut child = Command::new(&self.program);
        child
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(timeout, child.output()).await {
            Err(_) => {
                tracing::warn!("`{command}` timed out after {timeout:?}");
                return Err(CommandError::TimedOut {
                    command,
                    after: timeout,
                });
            }
            Ok(Err(source)) => {
                return Err(CommandError::Launch {
                    program: self.program.display().to_string(),
                    source,
                });
            }
            Ok(Ok(output)) => output,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            tracing::debug!("`{command}` exited with status {status}");
            return Err(CommandError::Exited {
                command,
                status,
                output: combine(&stdout, &stderr),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }

    /// Human-readable form of an invocation, used in logs and errors.
    fn render(&self, args: &[String]) -> String {
        let program = self
            .program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string());
        if args.is_empty() {
            program
        } else {
            format!("{program} {}", args.join(" "))
        }
    }
}
