// ABOUTME: Per-stage configuration shared by build and deploy stages.
// ABOUTME: Image, command, environment, copy paths, extra execs and pull policy.

use super::deserialize::{
    deserialize_command, deserialize_commands, deserialize_image_ref_option,
    deserialize_stage_name,
};
use crate::runtime::{ContainerConfig, PullPolicy};
use crate::types::{ImageRef, StageName};
use serde::Deserialize;

/// Label attached to every build container with its stage name.
pub const STAGE_LABEL: &str = "stagecoach.stage";

#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    #[serde(deserialize_with = "deserialize_stage_name")]
    pub name: StageName,

    #[serde(default, deserialize_with = "deserialize_image_ref_option")]
    pub image: Option<ImageRef>,

    #[serde(default, deserialize_with = "deserialize_command")]
    pub cmd: Vec<String>,

    #[serde(default)]
    pub env: Vec<String>,

    #[serde(default, alias = "copyIn")]
    pub copy_in: Option<CopyPaths>,

    #[serde(default, alias = "copyOut")]
    pub copy_out: Option<CopyPaths>,

    /// Extra commands run inside the started container before waiting on it.
    #[serde(default, deserialize_with = "deserialize_commands")]
    pub exec: Vec<Vec<String>>,

    #[serde(default)]
    pub pull: PullPolicy,
}

/// A source/destination pair. Host sides are relative to the base path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CopyPaths {
    pub from: String,
    pub to: String,
}

impl CopyPaths {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl StageConfig {
    /// A stage with only a name; the remaining fields are empty or default.
    pub fn named(name: StageName) -> Self {
        Self {
            name,
            image: None,
            cmd: Vec::new(),
            env: Vec::new(),
            copy_in: None,
            copy_out: None,
            exec: Vec::new(),
            pull: PullPolicy::default(),
        }
    }

    /// Container settings for running this stage on `image`.
    pub fn container_config(&self, image: &ImageRef) -> ContainerConfig {
        let mut config = ContainerConfig::new(image.clone());
        config.cmd = self.cmd.clone();
        config.env = self.env.clone();
        config
            .labels
            .insert(STAGE_LABEL.to_string(), self.name.to_string());
        config
    }

    /// Environment entries as key/value pairs. Bare keys are skipped; they
    /// are inherited from the parent environment.
    pub fn env_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().filter_map(|entry| entry.split_once('='))
    }
}
