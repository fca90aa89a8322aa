// ABOUTME: Deployment targets that deploy stages are applied to.
// ABOUTME: Exports the DeployTarget port and the local command implementation.

mod error;
mod target;

pub use error::DeployError;
pub use target::{CommandTarget, DeployTarget};
