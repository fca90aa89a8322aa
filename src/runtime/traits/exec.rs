// ABOUTME: Exec operations trait for container engines.
// ABOUTME: Runs additional commands inside a running container.

use super::shared_types::ExecOutput;
use crate::runtime::command::CommandError;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Exec operations: run commands in containers.
#[async_trait]
pub trait ExecOps: Send + Sync {
    /// Run `cmd` in the running container and wait for it to exit.
    async fn exec(&self, id: &ContainerId, cmd: &[String]) -> Result<ExecOutput, ExecError>;
}

/// An exec that could not run or exited non-zero.
#[derive(Debug, thiserror::Error)]
#[error("exec {command:?} in container {id} failed: {source}")]
pub struct ExecError {
    pub id: String,
    pub command: Vec<String>,
    #[source]
    pub source: CommandError,
}

impl ExecError {
    /// Exit status of the command, if it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        self.source.exit_code()
    }

    /// Combined stdout/stderr captured from the command.
    pub fn output(&self) -> &str {
        self.source.output()
    }
}
