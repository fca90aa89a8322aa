// ABOUTME: Podman backend: the Podman CLI dialect of the command-line runtime.
// ABOUTME: Podman evaluates pull policies itself via `pull --policy`.

use super::engine::{CliRuntime, Dialect, PullPlan};
use super::traits::PullPolicy;
use super::types::EngineKind;
use crate::types::ImageRef;

pub struct Podman;

impl Dialect for Podman {
    const KIND: EngineKind = EngineKind::Podman;

    fn pull_plan(image: &ImageRef, policy: PullPolicy) -> PullPlan {
        match policy {
            PullPolicy::Never => PullPlan::Skip,
            _ => PullPlan::Pull(vec![
                "pull".to_string(),
                "--policy".to_string(),
                policy.to_string(),
                image.to_string(),
            ]),
        }
    }
}

pub type PodmanRuntime = CliRuntime<Podman>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_is_passed_through() {
        let image = ImageRef::parse("quay.io/org/tool:2").unwrap();
        assert_eq!(
            Podman::pull_plan(&image, PullPolicy::Newer),
            PullPlan::Pull(vec![
                "pull".into(),
                "--policy".into(),
                "newer".into(),
                "quay.io/org/tool:2".into()
            ])
        );
    }

    #[test]
    fn never_skips_the_registry() {
        let image = ImageRef::parse("tool").unwrap();
        assert_eq!(Podman::pull_plan(&image, PullPolicy::Never), PullPlan::Skip);
    }
}
