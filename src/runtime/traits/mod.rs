// ABOUTME: Composable capability traits for container engines.
// ABOUTME: ImageOps, ContainerOps, ExecOps, CopyOps and LogOps combine into ContainerRuntime.

mod container;
mod copy;
mod exec;
mod image;
mod logs;
mod shared_types;

pub use container::{ContainerOps, CreateError, RemoveError, StartError, WaitError};
pub use copy::{CopyError, CopyOps};
pub use exec::{ExecError, ExecOps};
pub use image::{FetchError, ImageOps};
pub use logs::{LogError, LogLine, LogLines, LogOps, LogSource};
pub use shared_types::*;

use async_trait::async_trait;

/// The full capability set a pipeline needs from a container engine.
///
/// Backends implement the capability traits and this one; the trait is
/// object safe so engines can be selected at runtime.
#[async_trait]
pub trait ContainerRuntime: ImageOps + ContainerOps + ExecOps + CopyOps + LogOps {
    /// Engine identifier, e.g. `docker`.
    fn name(&self) -> &str;

    /// Release runtime-level resources. Safe to call more than once.
    async fn close(&self);
}
