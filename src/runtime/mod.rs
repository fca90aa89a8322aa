// ABOUTME: Container engine abstraction and its command-line backends.
// ABOUTME: Capability traits, Docker/Podman adapters, and engine selection.

pub mod command;
mod detection;
pub mod docker;
mod engine;
mod error;
pub mod podman;
pub mod traits;
mod types;

pub use command::{CommandError, CommandOutput, EngineCommand};
pub use detection::{connect, locate_executable};
pub use docker::DockerRuntime;
pub use engine::{CliRuntime, Dialect, PullPlan};
pub use error::{RuntimeError, RuntimeErrorKind, RuntimeNotFoundError};
pub use podman::PodmanRuntime;
pub use traits::*;
pub use types::{DEFAULT_TIMEOUT, EngineKind, EngineSettings, REMOVE_TIMEOUT};
