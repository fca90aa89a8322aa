// ABOUTME: Log operations trait for container engines.
// ABOUTME: Returns a container's captured output as a stream of lines.

use crate::runtime::command::CommandError;
use crate::types::ContainerId;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Stream of log lines. Dropping it releases the underlying resources.
pub type LogLines = Pin<Box<dyn Stream<Item = LogLine> + Send>>;

#[async_trait]
pub trait LogOps: Send + Sync {
    /// Fetch everything the container has written so far.
    async fn container_logs(&self, id: &ContainerId) -> Result<LogLines, LogError>;
}

/// A single log line from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub content: String,
    pub source: LogSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Stdout,
    Stderr,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read logs of container {id}: {source}")]
pub struct LogError {
    pub id: String,
    #[source]
    pub source: CommandError,
}
