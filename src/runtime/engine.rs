// ABOUTME: Command-line backed runtime shared by the Docker and Podman backends.
// ABOUTME: Maps each lifecycle operation onto an engine argument vector.

use super::command::EngineCommand;
use super::detection::locate_executable;
use super::error::RuntimeNotFoundError;
use super::traits::{
    ContainerConfig, ContainerOps, ContainerRuntime, CopyError, CopyOps, CreateError, ExecError,
    ExecOps, ExecOutput, FetchError, ImageOps, LogError, LogLine, LogLines, LogOps, LogSource,
    PullPolicy, RemoveError, StartError, WaitError,
};
use super::types::{EngineKind, EngineSettings, REMOVE_TIMEOUT};
use crate::types::{ContainerId, ImageRef};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// What a pull policy translates to for a given engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullPlan {
    /// Do not contact the registry.
    Skip,
    /// Run these arguments.
    Pull(Vec<String>),
    /// Run these arguments only when `image inspect` fails.
    PullIfAbsent(Vec<String>),
}

/// Engine-specific parts of the command surface.
pub trait Dialect: Send + Sync + 'static {
    const KIND: EngineKind;

    fn pull_plan(image: &ImageRef, policy: PullPolicy) -> PullPlan;
}

/// A [`ContainerRuntime`] that shells out to an engine executable.
pub struct CliRuntime<D> {
    engine: EngineCommand,
    closed: AtomicBool,
    _dialect: PhantomData<D>,
}

impl<D: Dialect> CliRuntime<D> {
    /// Locate the engine executable, failing fast when it is absent.
    pub fn locate(settings: &EngineSettings) -> Result<Self, RuntimeNotFoundError> {
        let program = locate_executable(D::KIND, settings.path.as_deref())?;
        tracing::debug!("Using {} at {}", D::KIND, program.display());
        Ok(Self::with_engine(EngineCommand::new(program, settings.timeout)))
    }

    pub fn with_engine(engine: EngineCommand) -> Self {
        Self {
            engine,
            closed: AtomicBool::new(false),
            _dialect: PhantomData,
        }
    }

    async fn image_present(&self, image: &ImageRef) -> bool {
        self.engine
            .run(&args(["image", "inspect", image.as_str()]))
            .await
            .is_ok()
    }
}

fn args<const N: usize>(list: [&str; N]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn last_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).rfind(|l| !l.is_empty())
}

#[async_trait]
impl<D: Dialect> ImageOps for CliRuntime<D> {
    async fn pull_image(&self, image: &ImageRef, policy: PullPolicy) -> Result<(), FetchError> {
        let pull_args = match D::pull_plan(image, policy) {
            PullPlan::Skip => {
                tracing::debug!("Skipping pull of {image} (policy {policy})");
                return Ok(());
            }
            PullPlan::Pull(pull_args) => pull_args,
            PullPlan::PullIfAbsent(pull_args) => {
                if self.image_present(image).await {
                    tracing::debug!("{image} already present locally");
                    return Ok(());
                }
                pull_args
            }
        };

        self.engine
            .run(&pull_args)
            .await
            .map(|_| ())
            .map_err(|source| FetchError {
                image: image.to_string(),
                source,
            })
    }
}

#[async_trait]
impl<D: Dialect> ContainerOps for CliRuntime<D> {
    async fn create_container(&self, config: &ContainerConfig) -> Result<ContainerId, CreateError> {
        let mut create = vec!["create".to_string()];
        for (key, value) in &config.labels {
            create.push("--label".to_string());
            create.push(format!("{key}={value}"));
        }
        for env in &config.env {
            create.push("-e".to_string());
            create.push(env.clone());
        }
        create.push(config.image.to_string());
        create.extend(config.cmd.iter().cloned());

        let output = self
            .engine
            .run(&create)
            .await
            .map_err(|source| CreateError::Engine {
                image: config.image.to_string(),
                source,
            })?;

        last_line(&output.stdout)
            .map(ContainerId::new)
            .ok_or_else(|| CreateError::MissingId {
                image: config.image.to_string(),
            })
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), StartError> {
        self.engine
            .run(&args(["start", id.as_str()]))
            .await
            .map(|_| ())
            .map_err(|source| StartError {
                id: id.to_string(),
                source,
            })
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64, WaitError> {
        let output = self
            .engine
            .run(&args(["wait", id.as_str()]))
            .await
            .map_err(|source| WaitError::Engine {
                id: id.to_string(),
                source,
            })?;

        let code = last_line(&output.stdout)
            .and_then(|line| line.parse::<i64>().ok())
            .ok_or_else(|| WaitError::UnexpectedOutput {
                id: id.to_string(),
                output: output.combined(),
            })?;

        if code != 0 {
            return Err(WaitError::NonZeroExit {
                id: id.to_string(),
                code,
            });
        }
        Ok(code)
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<(), RemoveError> {
        self.engine
            .run_with_timeout(&args(["rm", "-f", id.as_str()]), REMOVE_TIMEOUT)
            .await
            .map(|_| ())
            .map_err(|source| RemoveError {
                id: id.to_string(),
                source,
            })
    }
}

#[async_trait]
impl<D: Dialect> ExecOps for CliRuntime<D> {
    async fn exec(&self, id: &ContainerId, cmd: &[String]) -> Result<ExecOutput, ExecError> {
        let mut exec = vec!["exec".to_string(), id.to_string()];
        exec.extend(cmd.iter().cloned());

        let output = self.engine.run(&exec).await.map_err(|source| ExecError {
            id: id.to_string(),
            command: cmd.to_vec(),
            source,
        })?;

        Ok(ExecOutput {
            output: output.combined(),
        })
    }
}

#[async_trait]
impl<D: Dialect> CopyOps for CliRuntime<D> {
    async fn copy_to_container(
        &self,
        id: &ContainerId,
        host_path: &Path,
        container_path: &str,
    ) -> Result<(), CopyError> {
        let from = host_path.display().to_string();
        let to = format!("{id}:{container_path}");
        self.engine
            .run(&["cp".to_string(), from.clone(), to.clone()])
            .await
            .map(|_| ())
            .map_err(|source| CopyError::Engine { from, to, source })
    }

    async fn copy_from_container(
        &self,
        id: &ContainerId,
        container_path: &str,
        host_path: &Path,
    ) -> Result<(), CopyError> {
        tokio::fs::create_dir_all(host_path)
            .await
            .map_err(|source| CopyError::Io {
                path: host_path.to_path_buf(),
                source,
            })?;

        let from = format!("{id}:{container_path}");
        let to = host_path.display().to_string();
        self.engine
            .run(&["cp".to_string(), from.clone(), to.clone()])
            .await
            .map(|_| ())
            .map_err(|source| CopyError::Engine { from, to, source })
    }
}

#[async_trait]
impl<D: Dialect> LogOps for CliRuntime<D> {
    async fn container_logs(&self, id: &ContainerId) -> Result<LogLines, LogError> {
        let output = self
            .engine
            .run_with_timeout(&args(["logs", id.as_str()]), REMOVE_TIMEOUT)
            .await
            .map_err(|source| LogError {
                id: id.to_string(),
                source,
            })?;

        let lines = split_lines(&output.stdout, LogSource::Stdout)
            .chain(split_lines(&output.stderr, LogSource::Stderr))
            .collect::<Vec<_>>();
        Ok(Box::pin(futures::stream::iter(lines)))
    }
}

fn split_lines(text: &str, source: LogSource) -> impl Iterator<Item = LogLine> + '_ {
    text.lines().map(move |line| LogLine {
        content: line.to_string(),
        source,
    })
}

#[async_trait]
impl<D: Dialect> ContainerRuntime for CliRuntime<D> {
    fn name(&self) -> &str {
        D::KIND.executable()
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("Closed {} runtime", D::KIND);
        }
    }
}
