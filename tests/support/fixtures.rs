// ABOUTME: Builders for stage configurations and project directories.
// ABOUTME: Keeps test bodies focused on behavior rather than setup.

use stagecoach::config::{CopyPaths, StageConfig};
use stagecoach::types::{ImageRef, StageName};
use std::path::{Path, PathBuf};

/// A build stage running `image` with no copies or execs.
pub fn build_stage(name: &str, image: &str) -> StageConfig {
    let mut stage = StageConfig::named(StageName::new(name).unwrap());
    stage.image = Some(ImageRef::parse(image).unwrap());
    stage
}

/// A build stage that copies `/out` back to `dist/<name>`.
pub fn build_stage_with_output(name: &str, image: &str) -> StageConfig {
    let mut stage = build_stage(name, image);
    stage.copy_out = Some(CopyPaths::new("/out", format!("dist/{name}")));
    stage
}

/// A project directory with a config file, for pipeline-level tests.
pub fn project_dir(workspace: &Path, name: &str, config: &str) -> PathBuf {
    let dir = workspace.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.yaml"), config).unwrap();
    dir
}
