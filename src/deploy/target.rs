// ABOUTME: DeployTarget port plus a target that runs each stage's command locally.
// ABOUTME: The command sees the stage environment and STAGECOACH_* context variables.

use super::error::DeployError;
use crate::config::StageConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Something a deploy stage is applied to.
#[async_trait]
pub trait DeployTarget: Send + Sync {
    fn name(&self) -> &str;

    /// Apply `stage`; artifacts produced by the builds live under `base_path`.
    async fn deploy(&self, stage: &StageConfig, base_path: &Path) -> Result<(), DeployError>;
}

/// Runs the stage's `cmd` as a local process with `base_path` as working directory.
#[derive(Debug, Clone)]
pub struct CommandTarget {
    timeout: Duration,
}

impl CommandTarget {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Context variables exported to the deploy command.
    pub fn context_env(stage: &StageConfig, base_path: &Path) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("STAGECOACH_STAGE".to_string(), stage.name.to_string());
        env.insert(
            "STAGECOACH_BASE_PATH".to_string(),
            base_path.display().to_string(),
        );
        if let Some(ref image) = stage.image {
            env.insert("STAGECOACH_IMAGE".to_string(), image.to_string());
        }
        env
    }
}

/// Relative program paths like `./deploy.sh` resolve against the base path.
fn resolve_program(program: &str, base_path: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && program.contains('/') {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

#[async_trait]
impl DeployTarget for CommandTarget {
    fn name(&self) -> &str {
        "local"
    }

    async fn deploy(&self, stage: &StageConfig, base_path: &Path) -> Result<(), DeployError> {
        let (program, args) = stage.cmd.split_first().ok_or(DeployError::NoCommand)?;
        let program = resolve_program(program, base_path);

        tracing::info!("Running deploy command for {}: {:?}", stage.name, stage.cmd);

        let mut command = Command::new(&program);
        command
            .args(args)
            .current_dir(base_path)
            .envs(stage.env_pairs())
            .envs(Self::context_env(stage, base_path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| DeployError::TimedOut(self.timeout))?
            .map_err(|source| DeployError::Launch {
                program: program.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            tracing::warn!("Deploy stage {} failed with exit code {status}", stage.name);
            return Err(DeployError::Failed {
                status,
                output: format!("{stdout}{stderr}").trim().to_string(),
            });
        }

        if !stdout.trim().is_empty() {
            tracing::debug!("{} stdout: {}", stage.name, stdout.trim());
        }
        tracing::info!("Deploy stage {} completed successfully", stage.name);
        Ok(())
    }
}
