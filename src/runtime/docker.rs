// ABOUTME: Docker backend: the Docker CLI dialect of the command-line runtime.
// ABOUTME: Docker's pull has no policy flag, so policies map onto plain pulls.

use super::engine::{CliRuntime, Dialect, PullPlan};
use super::traits::PullPolicy;
use super::types::EngineKind;
use crate::types::ImageRef;

pub struct Docker;

impl Dialect for Docker {
    const KIND: EngineKind = EngineKind::Docker;

    fn pull_plan(image: &ImageRef, policy: PullPolicy) -> PullPlan {
        let pull = vec!["pull".to_string(), image.to_string()];
        match policy {
            PullPolicy::Never => PullPlan::Skip,
            // `docker pull` only downloads layers that changed upstream.
            PullPolicy::Always | PullPolicy::Newer => PullPlan::Pull(pull),
            PullPolicy::Missing => PullPlan::PullIfAbsent(pull),
        }
    }
}

pub type DockerRuntime = CliRuntime<Docker>;
