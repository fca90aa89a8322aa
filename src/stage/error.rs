// ABOUTME: Stage-level error wrapping a runtime or deploy failure with its position.
// ABOUTME: Names the failing stage so the CLI can report it.

use super::StageKind;
use crate::deploy::DeployError;
use crate::runtime::RuntimeError;
use crate::types::StageName;

/// Why a single stage failed.
#[derive(Debug, thiserror::Error)]
pub enum StageFailure {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("build stage has no image")]
    MissingImage,
}

impl StageFailure {
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            StageFailure::Runtime(RuntimeError::Cancelled)
                | StageFailure::Deploy(DeployError::Cancelled)
        )
    }
}

/// A failed stage, identified by phase, name and position.
#[derive(Debug, thiserror::Error)]
#[error("{kind} stage '{name}' ({}/{total}) failed: {cause}", .index + 1)]
pub struct StageError {
    pub kind: StageKind,
    pub name: StageName,
    /// Zero-based position within its phase.
    pub index: usize,
    pub total: usize,
    #[source]
    pub cause: StageFailure,
}

impl StageError {
    pub fn is_cancelled(&self) -> bool {
        self.cause.is_cancelled()
    }
}
