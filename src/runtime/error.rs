// ABOUTME: Runtime error types for engine lookup and lifecycle operations.
// ABOUTME: RuntimeError unifies the per-operation errors for stage-level handling.

use super::traits::{CopyError, CreateError, ExecError, FetchError, StartError, WaitError};
use super::types::EngineKind;
use std::path::PathBuf;

/// The engine executable could not be found.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeNotFoundError {
    #[error("{engine} not found in PATH")]
    NotInPath { engine: EngineKind },

    #[error("{engine} executable not found at {}", .path.display())]
    NotAtPath { engine: EngineKind, path: PathBuf },
}

/// Any failure of a lifecycle operation, or cancellation of one.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Create(#[from] CreateError),

    #[error(transparent)]
    Start(#[from] StartError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Copy(#[from] CopyError),

    #[error("operation cancelled")]
    Cancelled,
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    Fetch,
    Create,
    Start,
    Exec,
    Wait,
    Copy,
    Cancelled,
}

impl RuntimeError {
    pub fn kind(&self) -> RuntimeErrorKind {
        match self {
            RuntimeError::Fetch(_) => RuntimeErrorKind::Fetch,
            RuntimeError::Create(_) => RuntimeErrorKind::Create,
            RuntimeError::Start(_) => RuntimeErrorKind::Start,
            RuntimeError::Exec(_) => RuntimeErrorKind::Exec,
            RuntimeError::Wait(_) => RuntimeErrorKind::Wait,
            RuntimeError::Copy(_) => RuntimeErrorKind::Copy,
            RuntimeError::Cancelled => RuntimeErrorKind::Cancelled,
        }
    }
}
