//! The standard stage sequence.

use hookgen_manifest::ResourceData;
use hookgen_pipeline::{Pipeline, PipelineBuilder};

use crate::{events::*, generators::*};

/// A pipeline builder with the standard stages for `resource`.
pub fn standard_pipeline(resource: &ResourceData) -> PipelineBuilder {
    standard_stages(Pipeline::builder(), resource)
}

/// Append the standard stages for `resource` to `builder`.
///
/// Server stages come first, then the entity stages once per entity in
/// manifest order, the auth stage when auth is enabled, the broker stages
/// when a broker is configured, then environment, git and docker files, and
/// finally the admin UI.
pub fn standard_stages(builder: PipelineBuilder, resource: &ResourceData) -> PipelineBuilder {
    let mut builder = builder
        .stage::<CreateServer>(ServerGenerator)
        .stage::<LoadStaticFiles>(StaticFilesGenerator)
        .stage::<CreateServerPackageJson>(PackageJsonGenerator)
        .stage::<CreateDTOs>(DtosGenerator);

    for entity in resource.entities.keys() {
        builder = entity_stages(builder, entity);
    }

    if resource.auth_enabled {
        builder = builder.stage::<CreateServerAuth>(AuthGenerator);
    }

    builder = builder
        .stage::<CreateSwagger>(SwaggerGenerator)
        .stage::<CreateServerAppModule>(AppModuleGenerator)
        .stage::<CreatePrismaSchema>(PrismaSchemaGenerator)
        .stage::<CreateSeed>(SeedGenerator);

    if resource.message_broker.is_some() {
        builder = builder
            .stage::<CreateMessageBroker>(BrokerGenerator::new())
            .stage::<CreateMessageBrokerTopicsEnum>(BrokerGenerator::new())
            .stage::<CreateMessageBrokerNestJSModule>(BrokerGenerator::new())
            .stage::<CreateMessageBrokerClientOptionsFactory>(BrokerGenerator::new())
            .stage::<CreateMessageBrokerService>(BrokerGenerator::new())
            .stage::<CreateMessageBrokerServiceBase>(BrokerGenerator::new());
    }

    builder
        .stage::<CreateServerDotEnv>(DotEnvGenerator)
        .stage::<CreateServerGitIgnore>(GitIgnoreGenerator)
        .stage::<CreateServerDockerCompose>(DockerComposeGenerator)
        .stage::<CreateServerDockerComposeDB>(DockerComposeGenerator)
        .stage::<CreateAdminUI>(AdminUiGenerator)
        .stage::<CreateAdminUIPackageJson>(PackageJsonGenerator)
        .stage::<CreateAdminGitIgnore>(GitIgnoreGenerator)
}

fn entity_stages(builder: PipelineBuilder, entity: &str) -> PipelineBuilder {
    builder
        .stage::<CreateEntityModule>(EntityGenerator::new(entity))
        .stage::<CreateEntityModuleBase>(EntityGenerator::new(entity))
        .stage::<CreateEntityService>(EntityGenerator::new(entity))
        .stage::<CreateEntityServiceBase>(EntityGenerator::new(entity))
        .stage::<CreateEntityController>(EntityGenerator::new(entity))
        .stage::<CreateEntityControllerBase>(EntityGenerator::new(entity))
        .stage::<CreateEntityControllerToManyRelationMethods>(RelationGenerator::new(entity))
        .stage::<CreateEntityControllerSpec>(EntityGenerator::new(entity))
        .stage::<CreateEntityResolver>(EntityGenerator::new(entity))
        .stage::<CreateEntityResolverBase>(EntityGenerator::new(entity))
        .stage::<CreateEntityResolverToManyRelationMethods>(RelationGenerator::new(entity))
        .stage::<CreateEntityResolverToOneRelationMethods>(RelationGenerator::new(entity))
}

#[cfg(test)]
mod tests {
    use hookgen_manifest::{Entity, IdentityFields, MessageBrokerConfig, ServiceConfig};

    use super::*;

    fn build(resource: &ResourceData) -> Vec<&'static str> {
        standard_pipeline(resource).build().unwrap().stage_names()
    }

    #[test]
    fn test_minimal_sequence() {
        let names = build(&ResourceData::new(ServiceConfig::new("shop")));

        assert_eq!(
            names,
            vec![
                "CreateServer",
                "LoadStaticFiles",
                "CreateServerPackageJson",
                "CreateDTOs",
                "CreateSwagger",
                "CreateServerAppModule",
                "CreatePrismaSchema",
                "CreateSeed",
                "CreateServerDotEnv",
                "CreateServerGitIgnore",
                "CreateServerDockerCompose",
                "CreateServerDockerComposeDB",
                "CreateAdminUI",
                "CreateAdminUIPackageJson",
                "CreateAdminGitIgnore",
            ]
        );
    }

    #[test]
    fn test_entities_auth_and_broker() {
        let resource = ResourceData::new(ServiceConfig::new("shop"))
            .with_entity("User", Entity::default())
            .with_entity("Order", Entity::default())
            .with_auth(IdentityFields::default())
            .with_message_broker(MessageBrokerConfig::default());
        let names = build(&resource);

        assert_eq!(names.len(), 15 + 2 * 12 + 1 + 6);
        assert_eq!(names[4], "CreateEntityModule");
        assert_eq!(names[4 + 12], "CreateEntityModule");
        assert_eq!(names[4 + 24], "CreateServerAuth");
        assert!(names.contains(&"CreateMessageBrokerServiceBase"));
        assert_eq!(names.last(), Some(&"CreateAdminGitIgnore"));
    }

    #[test]
    fn test_catalogue_covered() {
        let resource = ResourceData::new(ServiceConfig::new("shop"))
            .with_entity("User", Entity::default())
            .with_auth(IdentityFields::default())
            .with_message_broker(MessageBrokerConfig::default());
        let names = build(&resource);

        for stage in ALL_STAGES {
            assert!(names.contains(stage), "{} missing from the sequence", stage);
        }
    }
}
