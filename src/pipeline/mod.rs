// ABOUTME: Pipeline coordinator: overlays, then every build stage, then every deploy stage.
// ABOUTME: Fail-fast; the first error aborts the run without rollback.

mod error;
mod overlay;

pub use error::{
    BuildSnafu, DeploySnafu, OverlaySnafu, PipelineError, PipelineErrorKind, RuntimeSnafu,
};
pub use overlay::{OverlayError, materialize};

use crate::config::{PipelineConfig, ProjectLayout};
use crate::deploy::{CommandTarget, DeployTarget};
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Progress;
use crate::runtime::{ContainerRuntime, connect};
use crate::stage::{BuildRunner, CancellationToken, DeployRunner};
use snafu::ResultExt;

/// Summary of a successful run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Files copied from the overlay directory, if it existed.
    pub overlay_files: Option<usize>,
    pub builds: usize,
    pub deploys: usize,
    /// Non-fatal problems, such as containers that could not be removed.
    pub warnings: Vec<Warning>,
}

/// Sequences one pipeline run.
pub struct Pipeline<'a> {
    progress: &'a dyn Progress,
    cancel: CancellationToken,
}

impl<'a> Pipeline<'a> {
    pub fn new(progress: &'a dyn Progress, cancel: CancellationToken) -> Self {
        Self { progress, cancel }
    }

    /// Run `config` for the project at `layout` against the given runtime
    /// and deploy target.
    pub async fn run<R, T>(
        &self,
        runtime: &R,
        target: &T,
        config: &PipelineConfig,
        layout: &ProjectLayout,
    ) -> Result<PipelineReport, PipelineError>
    where
        R: ContainerRuntime + ?Sized,
        T: DeployTarget + ?Sized,
    {
        let mut report = PipelineReport::default();
        let mut diagnostics = Diagnostics::default();
        let base_path = layout.base_path();

        let overlays = layout.overlays_dir();
        if overlays.exists() {
            self.progress.phase("Copying Overlays");
            let copied = materialize(&overlays, &layout.resource_dir()).context(OverlaySnafu)?;
            tracing::info!("Copied {copied} overlay file(s)");
            report.overlay_files = Some(copied);
        }

        if !config.builds.is_empty() {
            self.progress.phase("Building");
            let runner = BuildRunner::new(self.progress, self.cancel.clone());
            let result = runner
                .run(runtime, &config.builds, base_path, &mut diagnostics)
                .await;
            result.context(BuildSnafu)?;
            report.builds = config.builds.len();
        }

        if !config.deploys.is_empty() {
            self.progress.phase("Deploying");
            let runner = DeployRunner::new(self.progress, self.cancel.clone());
            runner
                .run(target, &config.deploys, base_path)
                .await
                .context(DeploySnafu)?;
            report.deploys = config.deploys.len();
        }

        report.warnings = diagnostics.into_warnings();
        Ok(report)
    }
}

/// Run a project's pipeline with the configured engine and the local
/// command deploy target.
///
/// The engine is looked up before any work starts and closed afterwards,
/// whether or not the run succeeded.
pub async fn run_project(
    config: &PipelineConfig,
    layout: &ProjectLayout,
    progress: &dyn Progress,
    cancel: CancellationToken,
) -> Result<PipelineReport, PipelineError> {
    let settings = config.engine_settings();
    let runtime = connect(&settings).context(RuntimeSnafu)?;
    tracing::info!("Using container runtime: {}", runtime.name());

    let target = CommandTarget::new(settings.timeout);
    let result = Pipeline::new(progress, cancel)
        .run(runtime.as_ref(), &target, config, layout)
        .await;

    runtime.close().await;
    result
}
