use hookgen_pipeline::{Events, Plugin};

use crate::events::{CreateServerDockerCompose, CreateServerDockerComposeDB};

/// Skips the docker compose files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocker;

impl Plugin for NoDocker {
    fn register(&self) -> Events {
        Events::new()
            .before_fn::<CreateServerDockerCompose, _>(|ctx, params| {
                ctx.set_skip_default_behavior(true);
                Ok(params)
            })
            .before_fn::<CreateServerDockerComposeDB, _>(|ctx, params| {
                ctx.set_skip_default_behavior(true);
                Ok(params)
            })
    }
}

#[cfg(test)]
mod tests {
    use hookgen_core::{Module, Version};
    use hookgen_manifest::{ResourceData, ServiceConfig};
    use hookgen_pipeline::{Pipeline, StageOutcome};

    use super::*;
    use crate::{events::CreateServerGitIgnore, generators::*};

    #[tokio::test]
    async fn test_skips_only_docker_stages() {
        let pipeline = Pipeline::builder()
            .stage::<CreateServerGitIgnore>(GitIgnoreGenerator)
            .stage::<CreateServerDockerCompose>(DockerComposeGenerator)
            .stage::<CreateServerDockerComposeDB>(DockerComposeGenerator)
            .plugin("no-docker", Version::new(1, 0, 0), NoDocker)
            .build()
            .unwrap();

        let outcome = pipeline
            .run(ResourceData::new(ServiceConfig::new("shop")))
            .await
            .unwrap();

        let paths: Vec<&str> = outcome.modules.iter().map(Module::path).collect();
        assert_eq!(paths, vec!["server/.gitignore"]);
        assert_eq!(
            outcome.stages[1].outcome,
            StageOutcome::Completed {
                default_skipped: true
            }
        );
    }
}
