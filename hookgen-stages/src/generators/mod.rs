//! Baseline generators: the default behavior of every stage.
//!
//! These emit small deterministic stubs. Plugins replace or extend them
//! through hooks.

mod admin;
mod broker;
mod config;
mod entity;
mod server;

pub use admin::AdminUiGenerator;
pub use broker::{BrokerFile, BrokerGenerator};
pub use config::{DockerComposeGenerator, DotEnvGenerator, GitIgnoreGenerator};
pub use entity::{EntityFile, EntityGenerator, Names, RelationFile, RelationGenerator};
pub use server::{
    AppModuleGenerator, AuthGenerator, DtosGenerator, PackageJsonGenerator, PrismaSchemaGenerator,
    SeedGenerator, ServerGenerator, StaticFilesGenerator, SwaggerGenerator,
};
