// ABOUTME: Deploy stage runner: applies stages to a DeployTarget in order.
// ABOUTME: The first failure halts the remaining deploy stages.

use super::StageKind;
use super::cancel::CancellationToken;
use super::error::{StageError, StageFailure};
use crate::config::StageConfig;
use crate::deploy::{DeployError, DeployTarget};
use crate::output::Progress;
use std::path::Path;

pub struct DeployRunner<'a> {
    progress: &'a dyn Progress,
    cancel: CancellationToken,
}

impl<'a> DeployRunner<'a> {
    pub fn new(progress: &'a dyn Progress, cancel: CancellationToken) -> Self {
        Self { progress, cancel }
    }

    pub async fn run<T: DeployTarget + ?Sized>(
        &self,
        target: &T,
        stages: &[StageConfig],
        base_path: &Path,
    ) -> Result<(), StageError> {
        let total = stages.len();
        for (index, stage) in stages.iter().enumerate() {
            self.progress
                .stage(StageKind::Deploy, index + 1, total, &stage.name);
            tracing::info!(
                "Deploy stage {}/{}: {} (target {})",
                index + 1,
                total,
                stage.name,
                target.name()
            );

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(DeployError::Cancelled),
                result = target.deploy(stage, base_path) => result,
            };

            result.map_err(|e| StageError {
                kind: StageKind::Deploy,
                name: stage.name.clone(),
                index,
                total,
                cause: StageFailure::Deploy(e),
            })?;
        }
        Ok(())
    }
}
