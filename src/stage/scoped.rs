// ABOUTME: Scoped ownership of a container created for one stage.
// ABOUTME: Removal happens exactly once through release(); dropping without it is logged.

use crate::runtime::{ContainerOps, RemoveError};
use crate::types::ContainerId;

/// A container that must be removed before its stage ends.
///
/// Async removal cannot run from `Drop`, so the owning stage calls
/// [`ScopedContainer::release`] on every exit path. `release` consumes the
/// scope, which makes a second removal impossible.
#[must_use = "a created container must be released"]
#[derive(Debug)]
pub struct ScopedContainer {
    id: ContainerId,
    released: bool,
}

impl ScopedContainer {
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            released: false,
        }
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Remove the container.
    pub async fn release<R: ContainerOps + ?Sized>(
        mut self,
        runtime: &R,
    ) -> Result<(), RemoveError> {
        self.released = true;
        tracing::debug!("Removing container {}", self.id.short());
        runtime.remove_container(&self.id).await
    }
}

impl Drop for ScopedContainer {
    fn drop(&mut self) {
        if !self.released {
            tracing::error!("Container {} left its stage without being removed", self.id);
        }
    }
}
