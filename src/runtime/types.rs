// ABOUTME: Engine type definitions for Docker and Podman.
// ABOUTME: EngineKind identifies a backend; EngineSettings configures how it is reached.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The container engine backing a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Docker,
    Podman,
}

impl EngineKind {
    /// Executable name searched for on `PATH`.
    pub fn executable(&self) -> &'static str {
        match self {
            EngineKind::Docker => "docker",
            EngineKind::Podman => "podman",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// How to reach the engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub kind: EngineKind,
    /// Explicit executable path; `PATH` is searched when absent.
    pub path: Option<PathBuf>,
    /// Deadline for each engine call.
    pub timeout: Duration,
}

impl EngineSettings {
    pub fn new(kind: EngineKind) -> Self {
        Self {
            kind,
            path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Default deadline for a single engine call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Deadline for log retrieval and removal, which run after a failure or cancellation.
pub const REMOVE_TIMEOUT: Duration = Duration::from_secs(60);
