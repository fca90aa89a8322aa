// ABOUTME: Recording doubles for the runtime, deploy target and progress ports.
// ABOUTME: Every call is logged; failures, hangs and cancellation are injected per image.

use async_trait::async_trait;
use parking_lot::Mutex;
use stagecoach::config::StageConfig;
use stagecoach::deploy::{DeployError, DeployTarget};
use stagecoach::output::Progress;
use stagecoach::runtime::{
    CommandError, ContainerConfig, ContainerOps, ContainerRuntime, CopyError, CopyOps,
    CreateError, ExecError, ExecOps, ExecOutput, FetchError, ImageOps, LogError, LogLine,
    LogLines, LogOps, LogSource, PullPolicy, RemoveError, StartError, WaitError,
};
use stagecoach::stage::{CancellationToken, StageKind};
use stagecoach::types::{ContainerId, ImageRef, StageName};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Operations of the runtime capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Pull,
    Create,
    Start,
    Exec,
    Wait,
    CopyTo,
    CopyFrom,
    Logs,
    Remove,
}

/// One observed runtime call. The string is the image the call concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub image: String,
    pub container: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Fail,
    Hang,
    CancelThenSucceed,
}

/// In-memory runtime that records every call and fails on demand.
///
/// Failures and hangs are keyed by operation and image, so each stage in a
/// test should use its own image.
pub struct RecordingRuntime {
    calls: Mutex<Vec<Call>>,
    behaviors: Mutex<HashMap<(Op, String), Behavior>>,
    images: Mutex<HashMap<String, String>>,
    cancel: Mutex<Option<CancellationToken>>,
    next_id: AtomicUsize,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behaviors: Mutex::new(HashMap::new()),
            images: Mutex::new(HashMap::new()),
            cancel: Mutex::new(None),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Make `op` fail for containers of `image`.
    pub fn fail(self, op: Op, image: &str) -> Self {
        self.behaviors
            .lock()
            .insert((op, image.to_string()), Behavior::Fail);
        self
    }

    /// Make `op` never complete for `image`.
    pub fn hang(self, op: Op, image: &str) -> Self {
        self.behaviors
            .lock()
            .insert((op, image.to_string()), Behavior::Hang);
        self
    }

    /// Cancel `token` while `op` runs for `image`; the call itself then succeeds.
    pub fn cancel_during(self, op: Op, image: &str, token: CancellationToken) -> Self {
        self.behaviors
            .lock()
            .insert((op, image.to_string()), Behavior::CancelThenSucceed);
        *self.cancel.lock() = Some(token);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.calls.lock().iter().map(|c| c.op).collect()
    }

    pub fn ops_for(&self, image: &str) -> Vec<Op> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.image == image)
            .map(|c| c.op)
            .collect()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls.lock().iter().filter(|c| c.op == op).count()
    }

    /// Containers created so far.
    pub fn created(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.op == Op::Create)
            .filter_map(|c| c.container.clone())
            .collect()
    }

    /// How often each container was removed.
    pub fn removals(&self) -> HashMap<String, usize> {
        let mut removals = HashMap::new();
        for call in self.calls.lock().iter().filter(|c| c.op == Op::Remove) {
            if let Some(ref id) = call.container {
                *removals.entry(id.clone()).or_insert(0) += 1;
            }
        }
        removals
    }

    fn image_of(&self, id: &ContainerId) -> String {
        self.images
            .lock()
            .get(id.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Record the call and apply any configured behavior. Returns the
    /// injected error when the call should fail.
    async fn enter(
        &self,
        op: Op,
        image: &str,
        container: Option<&ContainerId>,
    ) -> Option<CommandError> {
        self.calls.lock().push(Call {
            op,
            image: image.to_string(),
            container: container.map(|c| c.to_string()),
        });

        let behavior = self.behaviors.lock().get(&(op, image.to_string())).copied();
        match behavior {
            None => None,
            Some(Behavior::Fail) => Some(CommandError::Exited {
                command: format!("mock {op:?}"),
                status: 1,
                output: format!("injected {op:?} failure"),
            }),
            Some(Behavior::Hang) => {
                futures::future::pending::<()>().await;
                None
            }
            Some(Behavior::CancelThenSucceed) => {
                if let Some(token) = self.cancel.lock().clone() {
                    token.cancel();
                }
                // Give the racing cancellation branch a chance to observe it.
                tokio::time::sleep(Duration::from_millis(10)).await;
                None
            }
        }
    }
}

#[async_trait]
impl ImageOps for RecordingRuntime {
    async fn pull_image(&self, image: &ImageRef, _policy: PullPolicy) -> Result<(), FetchError> {
        match self.enter(Op::Pull, image.as_str(), None).await {
            Some(source) => Err(FetchError {
                image: image.to_string(),
                source,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContainerOps for RecordingRuntime {
    async fn create_container(&self, config: &ContainerConfig) -> Result<ContainerId, CreateError> {
        let image = config.image.to_string();
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = ContainerId::new(format!("ctr{n}"));

        let behavior = self.behaviors.lock().get(&(Op::Create, image.clone())).copied();
        if behavior == Some(Behavior::Fail) {
            self.enter(Op::Create, &image, None).await;
            return Err(CreateError::Engine {
                image,
                source: CommandError::Exited {
                    command: "mock Create".to_string(),
                    status: 125,
                    output: "injected Create failure".to_string(),
                },
            });
        }

        self.images.lock().insert(id.to_string(), image.clone());
        self.enter(Op::Create, &image, Some(&id)).await;
        Ok(id)
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), StartError> {
        match self.enter(Op::Start, &self.image_of(id), Some(id)).await {
            Some(source) => Err(StartError {
                id: id.to_string(),
                source,
            }),
            None => Ok(()),
        }
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64, WaitError> {
        match self.enter(Op::Wait, &self.image_of(id), Some(id)).await {
            Some(_) => Err(WaitError::NonZeroExit {
                id: id.to_string(),
                code: 2,
            }),
            None => Ok(0),
        }
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<(), RemoveError> {
        match self.enter(Op::Remove, &self.image_of(id), Some(id)).await {
            Some(source) => Err(RemoveError {
                id: id.to_string(),
                source,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExecOps for RecordingRuntime {
    async fn exec(&self, id: &ContainerId, cmd: &[String]) -> Result<ExecOutput, ExecError> {
        match self.enter(Op::Exec, &self.image_of(id), Some(id)).await {
            Some(source) => Err(ExecError {
                id: id.to_string(),
                command: cmd.to_vec(),
                source,
            }),
            None => Ok(ExecOutput {
                output: format!("ran {}", cmd.join(" ")),
            }),
        }
    }
}

#[async_trait]
impl CopyOps for RecordingRuntime {
    async fn copy_to_container(
        &self,
        id: &ContainerId,
        host_path: &Path,
        container_path: &str,
    ) -> Result<(), CopyError> {
        match self.enter(Op::CopyTo, &self.image_of(id), Some(id)).await {
            Some(source) => Err(CopyError::Engine {
                from: host_path.display().to_string(),
                to: format!("{id}:{container_path}"),
                source,
            }),
            None => Ok(()),
        }
    }

    /// Writes `artifact.txt` containing the image name into `host_path`.
    async fn copy_from_container(
        &self,
        id: &ContainerId,
        container_path: &str,
        host_path: &Path,
    ) -> Result<(), CopyError> {
        let image = self.image_of(id);
        if let Some(source) = self.enter(Op::CopyFrom, &image, Some(id)).await {
            return Err(CopyError::Engine {
                from: format!("{id}:{container_path}"),
                to: host_path.display().to_string(),
                source,
            });
        }
        std::fs::create_dir_all(host_path).map_err(|source| CopyError::Io {
            path: host_path.to_path_buf(),
            source,
        })?;
        std::fs::write(host_path.join("artifact.txt"), image).map_err(|source| CopyError::Io {
            path: host_path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl LogOps for RecordingRuntime {
    async fn container_logs(&self, id: &ContainerId) -> Result<LogLines, LogError> {
        if let Some(source) = self.enter(Op::Logs, &self.image_of(id), Some(id)).await {
            return Err(LogError {
                id: id.to_string(),
                source,
            });
        }
        let line = LogLine {
            content: "compilation failed".to_string(),
            source: LogSource::Stderr,
        };
        Ok(Box::pin(futures::stream::iter(vec![line])))
    }
}

#[async_trait]
impl ContainerRuntime for RecordingRuntime {
    fn name(&self) -> &str {
        "recording"
    }

    async fn close(&self) {}
}

/// Deploy target that records stage names and fails on request.
#[derive(Default)]
pub struct RecordingTarget {
    deployed: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(stage: &str) -> Self {
        Self {
            deployed: Mutex::new(Vec::new()),
            fail_on: Some(stage.to_string()),
        }
    }

    pub fn deployed(&self) -> Vec<String> {
        self.deployed.lock().clone()
    }
}

#[async_trait]
impl DeployTarget for RecordingTarget {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deploy(&self, stage: &StageConfig, _base_path: &Path) -> Result<(), DeployError> {
        self.deployed.lock().push(stage.name.to_string());
        if self.fail_on.as_deref() == Some(stage.name.as_str()) {
            return Err(DeployError::Failed {
                status: 1,
                output: "target rejected artifact".to_string(),
            });
        }
        Ok(())
    }
}

/// Progress port that keeps every event as a line of text.
#[derive(Default)]
pub struct RecordingProgress {
    lines: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Progress for RecordingProgress {
    fn phase(&self, title: &str) {
        self.lines.lock().push(format!("=== {title} ==="));
    }

    fn stage(&self, kind: StageKind, position: usize, total: usize, name: &StageName) {
        self.lines
            .lock()
            .push(format!("{} {position}/{total}: {name}", kind.verb()));
    }

    fn step(&self, message: &str) {
        self.lines.lock().push(format!("  → {message}"));
    }

    fn warning(&self, message: &str) {
        self.lines.lock().push(format!("warning: {message}"));
    }
}
