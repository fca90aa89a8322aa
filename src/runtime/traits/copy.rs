// ABOUTME: Copy operations trait for container engines.
// ABOUTME: Moves files between the host and a container filesystem.

use crate::runtime::command::CommandError;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait CopyOps: Send + Sync {
    /// Copy a host path into the container.
    async fn copy_to_container(
        &self,
        id: &ContainerId,
        host_path: &Path,
        container_path: &str,
    ) -> Result<(), CopyError>;

    /// Copy a container path to the host, creating `host_path` if needed.
    async fn copy_from_container(
        &self,
        id: &ContainerId,
        container_path: &str,
        host_path: &Path,
    ) -> Result<(), CopyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("failed to copy {from} to {to}: {source}")]
    Engine {
        from: String,
        to: String,
        #[source]
        source: CommandError,
    },

    #[error("failed to prepare {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
