//! The stage catalogue.
//!
//! Every stage is a marker type implementing [`Stage`]; plugins register
//! hooks against these types.

use hookgen_pipeline::Stage;

use crate::params::*;

macro_rules! stages {
    ($($(#[$meta:meta])* $name:ident => $params:ty;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl Stage for $name {
                const NAME: &'static str = stringify!($name);
                type Params = $params;
            }
        )*

        /// Names of every stage, in catalogue order.
        pub const ALL_STAGES: &[&str] = &[$(stringify!($name)),*];
    };
}

stages! {
    /// Server entry point.
    CreateServer => ServerParams;
    /// Static server files copied verbatim.
    LoadStaticFiles => StaticFilesParams;
    CreateServerPackageJson => PackageJsonParams;
    /// DTO barrel and per-entity input types.
    CreateDTOs => DtosParams;
    CreateEntityModule => EntityParams;
    CreateEntityModuleBase => EntityParams;
    CreateEntityService => EntityParams;
    CreateEntityServiceBase => EntityParams;
    CreateEntityController => EntityParams;
    CreateEntityControllerBase => EntityParams;
    CreateEntityControllerToManyRelationMethods => RelationParams;
    CreateEntityControllerSpec => EntityParams;
    CreateEntityResolver => EntityParams;
    CreateEntityResolverBase => EntityParams;
    CreateEntityResolverToManyRelationMethods => RelationParams;
    CreateEntityResolverToOneRelationMethods => RelationParams;
    /// Only in the sequence when `[auth]` is declared.
    CreateServerAuth => AuthParams;
    CreateSwagger => SwaggerParams;
    CreateServerAppModule => AppModuleParams;
    CreatePrismaSchema => PrismaSchemaParams;
    CreateSeed => SeedParams;
    /// The broker stages are only in the sequence when `[message_broker]`
    /// is declared.
    CreateMessageBroker => BrokerParams;
    CreateMessageBrokerTopicsEnum => BrokerParams;
    CreateMessageBrokerNestJSModule => BrokerParams;
    CreateMessageBrokerClientOptionsFactory => BrokerParams;
    CreateMessageBrokerService => BrokerParams;
    CreateMessageBrokerServiceBase => BrokerParams;
    CreateServerDotEnv => DotEnvParams;
    CreateServerGitIgnore => GitIgnoreParams;
    CreateServerDockerCompose => DockerComposeParams;
    CreateServerDockerComposeDB => DockerComposeParams;
    CreateAdminUI => AdminUiParams;
    CreateAdminUIPackageJson => PackageJsonParams;
    CreateAdminGitIgnore => GitIgnoreParams;
}
