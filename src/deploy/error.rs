// ABOUTME: Error types for deploy targets.
// ABOUTME: Covers launch failures, non-zero exits, timeouts and cancellation.

use std::time::Duration;

/// Errors a deploy target can report for one stage.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The stage has no command to run.
    #[error("stage has no command")]
    NoCommand,

    /// The deploy command could not be started.
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The deploy command exited unsuccessfully.
    #[error("deploy command exited with status {status}: {output}")]
    Failed { status: i32, output: String },

    /// The deploy command ran past its deadline.
    #[error("deploy command timed out after {0:?}")]
    TimedOut(Duration),

    /// The run was cancelled while the stage was in progress.
    #[error("deploy cancelled")]
    Cancelled,
}
