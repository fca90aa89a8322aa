// ABOUTME: Build stage runner: one full container lifecycle per stage.
// ABOUTME: pull, create, start, copy-in, exec/wait, copy-out, then always remove.

use super::StageKind;
use super::cancel::{CancellationToken, until_cancelled};
use super::error::{StageError, StageFailure};
use super::scoped::ScopedContainer;
use crate::config::StageConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Progress;
use crate::runtime::{ContainerRuntime, RuntimeError, WaitError};
use crate::types::ContainerId;
use futures::StreamExt;
use std::path::Path;

/// Number of log lines shown when a build container fails.
const LOG_TAIL: usize = 20;

/// Runs build stages in order and stops at the first failure.
pub struct BuildRunner<'a> {
    progress: &'a dyn Progress,
    cancel: CancellationToken,
}

impl<'a> BuildRunner<'a> {
    pub fn new(progress: &'a dyn Progress, cancel: CancellationToken) -> Self {
        Self { progress, cancel }
    }

    /// Run `stages` in configuration order against `runtime`.
    ///
    /// Host-side copy paths resolve against `base_path`. Removal failures are
    /// recorded in `diagnostics` and never replace a stage's error.
    pub async fn run<R: ContainerRuntime + ?Sized>(
        &self,
        runtime: &R,
        stages: &[StageConfig],
        base_path: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), StageError> {
        let total = stages.len();
        for (index, stage) in stages.iter().enumerate() {
            self.progress
                .stage(StageKind::Build, index + 1, total, &stage.name);
            tracing::info!("Build stage {}/{}: {}", index + 1, total, stage.name);

            self.run_stage(runtime, stage, base_path, diagnostics)
                .await
                .map_err(|cause| StageError {
                    kind: StageKind::Build,
                    name: stage.name.clone(),
                    index,
                    total,
                    cause,
                })?;
        }
        Ok(())
    }

    async fn run_stage<R: ContainerRuntime + ?Sized>(
        &self,
        runtime: &R,
        stage: &StageConfig,
        base_path: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), StageFailure> {
        let image = stage.image.as_ref().ok_or(StageFailure::MissingImage)?;

        self.progress.step(&format!("Pulling {image}"));
        until_cancelled(&self.cancel, runtime.pull_image(image, stage.pull)).await?;
        if self.cancel.is_cancelled() {
            return Err(RuntimeError::Cancelled.into());
        }

        // Not raced against cancellation: a handle the engine created must
        // come back so it can be removed.
        let id = runtime
            .create_container(&stage.container_config(image))
            .await
            .map_err(RuntimeError::from)?;
        let container = ScopedContainer::new(id);
        self.progress
            .step(&format!("Created container {}", container.id().short()));

        let outcome = if self.cancel.is_cancelled() {
            Err(RuntimeError::Cancelled)
        } else {
            self.drive(runtime, stage, container.id(), base_path).await
        };

        if let Err(RuntimeError::Wait(WaitError::NonZeroExit { .. })) = &outcome {
            self.report_logs(runtime, container.id(), diagnostics).await;
        }

        let id = container.id().clone();
        if let Err(e) = container.release(runtime).await {
            self.progress
                .warning(&format!("could not remove container {}: {e}", id.short()));
            diagnostics.warn(Warning::container_removal(e.to_string()));
        }

        outcome.map_err(StageFailure::from)
    }

    /// Steps 3 to 6 of a stage. Any error returns to `run_stage`, which
    /// removes the container before reporting it.
    async fn drive<R: ContainerRuntime + ?Sized>(
        &self,
        runtime: &R,
        stage: &StageConfig,
        id: &ContainerId,
        base_path: &Path,
    ) -> Result<(), RuntimeError> {
        self.progress.step("Starting container");
        until_cancelled(&self.cancel, runtime.start_container(id)).await?;

        if let Some(ref copy) = stage.copy_in {
            self.progress
                .step(&format!("Copying {} into {}", copy.from, copy.to));
            let host = base_path.join(&copy.from);
            until_cancelled(&self.cancel, runtime.copy_to_container(id, &host, &copy.to)).await?;
        }

        for cmd in &stage.exec {
            self.progress.step(&format!("Executing {}", cmd.join(" ")));
            let output = until_cancelled(&self.cancel, runtime.exec(id, cmd)).await?;
            if !output.output.is_empty() {
                tracing::debug!("exec output: {}", output.output);
            }
        }

        self.progress.step("Waiting for container to finish");
        until_cancelled(&self.cancel, runtime.wait_container(id)).await?;

        if let Some(ref copy) = stage.copy_out {
            self.progress
                .step(&format!("Copying {} out to {}", copy.from, copy.to));
            let host = base_path.join(&copy.to);
            until_cancelled(&self.cancel, runtime.copy_from_container(id, &copy.from, &host))
                .await?;
        }

        Ok(())
    }

    /// Log the tail of a failed container's output.
    async fn report_logs<R: ContainerRuntime + ?Sized>(
        &self,
        runtime: &R,
        id: &ContainerId,
        diagnostics: &mut Diagnostics,
    ) {
        match runtime.container_logs(id).await {
            Ok(lines) => {
                let lines: Vec<_> = lines.collect().await;
                let skip = lines.len().saturating_sub(LOG_TAIL);
                for line in &lines[skip..] {
                    tracing::warn!("[{}] {}", id.short(), line.content);
                }
            }
            Err(e) => diagnostics.warn(Warning::log_retrieval(e.to_string())),
        }
    }
}
