// ABOUTME: Configuration types and parsing for a project's config.yaml.
// ABOUTME: Engine selection, build and deploy stages, and their validation.

mod deserialize;
mod project;
mod stage;

pub use project::{
    CONFIG_FILENAME, CONFIG_FILENAME_ALT, OVERLAYS_DIR, ProjectLayout, RESOURCE_DIR,
};
pub use stage::{CopyPaths, STAGE_LABEL, StageConfig};

use crate::error::{Error, Result};
use crate::runtime::{DEFAULT_TIMEOUT, EngineKind, EngineSettings};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub container: ContainerSection,

    #[serde(default)]
    pub builds: Vec<StageConfig>,

    #[serde(default)]
    pub deploys: Vec<StageConfig>,
}

/// The `container:` block selecting and tuning the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerSection {
    #[serde(rename = "type")]
    pub engine: EngineKind,

    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl PipelineConfig {
    /// Parse and validate a configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            kind: self.container.engine,
            path: self.container.path.clone(),
            timeout: self.container.timeout,
        }
    }

    /// Reject configurations that would only fail once the pipeline is running.
    pub fn validate(&self) -> Result<()> {
        if self.container.timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "container.timeout must be greater than zero".to_string(),
            ));
        }

        check_unique_names("builds", &self.builds)?;
        check_unique_names("deploys", &self.deploys)?;

        for stage in &self.builds {
            if stage.image.is_none() {
                return Err(Error::InvalidConfig(format!(
                    "build stage '{}' has no image",
                    stage.name
                )));
            }
            if stage.exec.iter().any(Vec::is_empty) {
                return Err(Error::InvalidConfig(format!(
                    "build stage '{}' has an empty exec command",
                    stage.name
                )));
            }
        }

        for stage in &self.deploys {
            if stage.cmd.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "deploy stage '{}' has no cmd",
                    stage.name
                )));
            }
        }

        for stage in self.builds.iter().chain(&self.deploys) {
            if let Some(entry) = stage
                .env
                .iter()
                .find(|entry| entry.is_empty() || entry.starts_with('='))
            {
                return Err(Error::InvalidConfig(format!(
                    "stage '{}' has an invalid env entry {entry:?}",
                    stage.name
                )));
            }
        }

        Ok(())
    }
}

fn check_unique_names(section: &str, stages: &[StageConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for stage in stages {
        if !seen.insert(stage.name.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "duplicate stage name '{}' in {section}",
                stage.name
            )));
        }
    }
    Ok(())
}
