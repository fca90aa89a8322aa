// ABOUTME: Pipeline-level fatal error types with SNAFU pattern.
// ABOUTME: Wraps precondition, runtime lookup, build and deploy failures.

use snafu::Snafu;

use super::overlay::OverlayError;
use crate::runtime::RuntimeNotFoundError;
use crate::stage::StageError;

/// Any error that aborts a pipeline run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PipelineError {
    #[snafu(display("failed to copy overlays: {source}"))]
    Overlay { source: OverlayError },

    #[snafu(display("failed to initialize container runtime: {source}"))]
    Runtime { source: RuntimeNotFoundError },

    #[snafu(display("build failed: {source}"))]
    Build { source: StageError },

    #[snafu(display("deploy failed: {source}"))]
    Deploy { source: StageError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    Overlay,
    RuntimeNotFound,
    Build,
    Deploy,
    Cancelled,
}

impl PipelineError {
    pub fn kind(&self) -> PipelineErrorKind {
        if self.is_cancelled() {
            return PipelineErrorKind::Cancelled;
        }
        match self {
            PipelineError::Overlay { .. } => PipelineErrorKind::Overlay,
            PipelineError::Runtime { .. } => PipelineErrorKind::RuntimeNotFound,
            PipelineError::Build { .. } => PipelineErrorKind::Build,
            PipelineError::Deploy { .. } => PipelineErrorKind::Deploy,
        }
    }

    /// The failing stage, when the error came from one.
    pub fn stage_error(&self) -> Option<&StageError> {
        match self {
            PipelineError::Build { source } | PipelineError::Deploy { source } => Some(source),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.stage_error().is_some_and(StageError::is_cancelled)
    }
}
