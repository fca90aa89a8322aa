// ABOUTME: Application-wide error types for stagecoach.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::pipeline::PipelineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("project '{project}' not found (file: {})", .path.display())]
    ProjectNotFound { project: String, path: PathBuf },

    #[error("invalid project name: {0:?}")]
    InvalidProject(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

pub type Result<T> = std::result::Result<T, Error>;
