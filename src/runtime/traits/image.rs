// ABOUTME: Image operations trait for container engines.
// ABOUTME: Makes an image locally available according to a pull policy.

use super::shared_types::PullPolicy;
use crate::runtime::command::CommandError;
use crate::types::ImageRef;
use async_trait::async_trait;

/// Image operations.
#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Ensure the image is available locally. Idempotent.
    async fn pull_image(&self, image: &ImageRef, policy: PullPolicy) -> Result<(), FetchError>;
}

/// Failure to make an image available.
#[derive(Debug, thiserror::Error)]
#[error("failed to pull image {image}: {source}")]
pub struct FetchError {
    pub image: String,
    #[source]
    pub source: CommandError,
}
