// ABOUTME: Engine executable lookup and backend selection.
// ABOUTME: Resolves docker/podman on PATH (or an explicit path) and builds the runtime.

use super::docker::DockerRuntime;
use super::error::RuntimeNotFoundError;
use super::podman::PodmanRuntime;
use super::traits::ContainerRuntime;
use super::types::{EngineKind, EngineSettings};
use std::path::{Path, PathBuf};

/// Build the runtime selected by `settings.kind`.
///
/// Fails fast when the engine executable is missing, before any stage runs.
pub fn connect(
    settings: &EngineSettings,
) -> Result<Box<dyn ContainerRuntime>, RuntimeNotFoundError> {
    let runtime: Box<dyn ContainerRuntime> = match settings.kind {
        EngineKind::Docker => Box::new(DockerRuntime::locate(settings)?),
        EngineKind::Podman => Box::new(PodmanRuntime::locate(settings)?),
    };
    Ok(runtime)
}

/// Find the executable for `engine`.
///
/// Lookup order:
/// 1. `explicit`, when given (must exist and be executable)
/// 2. each directory of `PATH`
pub fn locate_executable(
    engine: EngineKind,
    explicit: Option<&Path>,
) -> Result<PathBuf, RuntimeNotFoundError> {
    if let Some(path) = explicit {
        return if is_executable(path) {
            Ok(path.to_path_buf())
        } else {
            Err(RuntimeNotFoundError::NotAtPath {
                engine,
                path: path.to_path_buf(),
            })
        };
    }

    std::env::var_os("PATH")
        .and_then(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join(engine.executable()))
                .find(|candidate| is_executable(candidate))
        })
        .ok_or(RuntimeNotFoundError::NotInPath { engine })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
