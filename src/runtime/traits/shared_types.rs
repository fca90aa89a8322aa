// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerConfig, ExecOutput and PullPolicy.

use crate::types::ImageRef;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Configuration for creating a container.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Image to run.
    pub image: ImageRef,
    /// Command to run (empty keeps the image default).
    pub cmd: Vec<String>,
    /// Environment entries, `KEY=VALUE` or bare `KEY` to pass through.
    pub env: Vec<String>,
    /// Labels to apply.
    pub labels: BTreeMap<String, String>,
}

impl ContainerConfig {
    pub fn new(image: ImageRef) -> Self {
        Self {
            image,
            cmd: Vec::new(),
            env: Vec::new(),
            labels: BTreeMap::new(),
        }
    }
}

/// Captured output of a successful exec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Combined stdout and stderr.
    pub output: String,
}

/// When to contact the registry for an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullPolicy {
    /// Always pull.
    Always,
    /// Pull when the registry has a newer image than the local one.
    #[default]
    Newer,
    /// Pull only when no local image exists.
    Missing,
    /// Never pull; the image must already be present.
    Never,
}

impl PullPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullPolicy::Always => "always",
            PullPolicy::Newer => "newer",
            PullPolicy::Missing => "missing",
            PullPolicy::Never => "never",
        }
    }
}

impl fmt::Display for PullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
