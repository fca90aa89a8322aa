// ABOUTME: Sequential build and deploy stage runners.
// ABOUTME: Fail-fast execution with guaranteed container removal per stage.

mod build;
mod cancel;
mod deploy;
mod error;
mod scoped;

pub use build::BuildRunner;
pub use cancel::{CancellationToken, cancel_on_interrupts, until_cancelled};
pub use deploy::DeployRunner;
pub use error::{StageError, StageFailure};
pub use scoped::ScopedContainer;

use std::fmt;

/// Which phase a stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Build,
    Deploy,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Build => "build",
            StageKind::Deploy => "deploy",
        }
    }

    /// Progress verb, as in "Building 1/3: app".
    pub fn verb(&self) -> &'static str {
        match self {
            StageKind::Build => "Building",
            StageKind::Deploy => "Deploying",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
