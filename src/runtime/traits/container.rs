// ABOUTME: Container lifecycle trait for container engines.
// ABOUTME: Create, start, wait for and remove containers.

use super::shared_types::ContainerConfig;
use crate::runtime::command::CommandError;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Send + Sync {
    /// Allocate a stopped container.
    async fn create_container(&self, config: &ContainerConfig) -> Result<ContainerId, CreateError>;

    /// Start a created container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), StartError>;

    /// Block until the container's main process exits, returning its status.
    ///
    /// A non-zero status is reported as [`WaitError::NonZeroExit`].
    async fn wait_container(&self, id: &ContainerId) -> Result<i64, WaitError>;

    /// Forcefully remove a container. Callers treat failures as best effort.
    async fn remove_container(&self, id: &ContainerId) -> Result<(), RemoveError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("failed to create container from {image}: {source}")]
    Engine {
        image: String,
        #[source]
        source: CommandError,
    },

    #[error("engine returned no container id for {image}")]
    MissingId { image: String },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to start container {id}: {source}")]
pub struct StartError {
    pub id: String,
    #[source]
    pub source: CommandError,
}

#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("failed to wait for container {id}: {source}")]
    Engine {
        id: String,
        #[source]
        source: CommandError,
    },

    #[error("container {id} exited with status {code}")]
    NonZeroExit { id: String, code: i64 },

    #[error("unexpected wait output for container {id}: {output:?}")]
    UnexpectedOutput { id: String, output: String },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to remove container {id}: {source}")]
pub struct RemoveError {
    pub id: String,
    #[source]
    pub source: CommandError,
}
