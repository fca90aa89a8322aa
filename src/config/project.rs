// ABOUTME: On-disk layout of a project inside the workspace directory.
// ABOUTME: Locates config.yaml, the overlays directory and the resource directory.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.yaml";
pub const CONFIG_FILENAME_ALT: &str = "config.yml";
pub const OVERLAYS_DIR: &str = "overlays";
pub const RESOURCE_DIR: &str = "resource";

/// Paths of one project: `<workspace>/<project>/`.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    name: String,
    dir: PathBuf,
    config: PathBuf,
}

impl ProjectLayout {
    /// Find `project` under `workspace`, failing if it has no config file.
    pub fn discover(workspace: &Path, project: &str) -> Result<Self> {
        if project.is_empty() || project.contains(['/', '\\']) || project == ".." {
            return Err(Error::InvalidProject(project.to_string()));
        }

        let dir = workspace.join(project);
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        candidates
            .into_iter()
            .find(|path| path.is_file())
            .map(|config| Self {
                name: project.to_string(),
                dir: dir.clone(),
                config,
            })
            .ok_or_else(|| Error::ProjectNotFound {
                project: project.to_string(),
                path: dir.join(CONFIG_FILENAME),
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project directory. Stage copy paths on the host resolve against it.
    pub fn base_path(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config
    }

    pub fn overlays_dir(&self) -> PathBuf {
        self.dir.join(OVERLAYS_DIR)
    }

    pub fn resource_dir(&self) -> PathBuf {
        self.dir.join(RESOURCE_DIR)
    }
}
