use hookgen_pipeline::{Events, Plugin};

use crate::events::CreateServer;

/// Aborts generation when the manifest declares no entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireEntities;

impl Plugin for RequireEntities {
    fn register(&self) -> Events {
        Events::new().before_fn::<CreateServer, _>(|ctx, params| {
            if ctx.entities().is_empty() {
                ctx.abort_generation("no entities defined");
            }
            Ok(params)
        })
    }
}

#[cfg(test)]
mod tests {
    use hookgen_core::Version;
    use hookgen_manifest::{Entity, ResourceData, ServiceConfig};
    use hookgen_pipeline::{Pipeline, RunStatus};

    use super::*;
    use crate::generators::ServerGenerator;

    fn pipeline() -> Pipeline {
        Pipeline::builder()
            .stage::<CreateServer>(ServerGenerator)
            .plugin("require-entities", Version::new(1, 0, 0), RequireEntities)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_aborts_without_entities() {
        let outcome = pipeline()
            .run(ResourceData::new(ServiceConfig::new("shop")))
            .await
            .unwrap();

        assert!(outcome.modules.is_empty());
        assert_eq!(
            outcome.status,
            RunStatus::Aborted {
                stage: "CreateServer",
                message: "no entities defined".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_passes_with_entities() {
        let resource =
            ResourceData::new(ServiceConfig::new("shop")).with_entity("Order", Entity::default());
        let outcome = pipeline().run(resource).await.unwrap();

        assert!(outcome.is_completed());
        assert_eq!(outcome.modules.len(), 1);
    }
}
