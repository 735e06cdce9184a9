//! Per-stage parameter types.
//!
//! Each stage threads one of these through its before-chain; the final value
//! is what the stage's default behavior and after-hooks see.

use std::path::PathBuf;

use hookgen_manifest::{Dtos, Entity, EntityDtos, FieldSpec, IdentityFields};
use indexmap::IndexMap;

/// Parameters of `CreateServer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerParams {
    /// Server directory, relative to the output root
    pub server_directory: String,
    pub port: u16,
}

/// Parameters of `LoadStaticFiles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFilesParams {
    /// Directory to import from; nothing is imported when unset
    pub source: Option<PathBuf>,
    /// Path prefix of the imported modules
    pub base_path: String,
}

/// Parameters of the `package.json` stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJsonParams {
    pub path: String,
    pub name: String,
    pub version: String,
    /// Objects merged into the generated package, in order
    pub update_properties: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Parameters of `CreateDTOs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtosParams {
    pub dtos: Dtos,
}

/// Parameters of the per-entity file stages.
#[derive(Debug, Clone)]
pub struct EntityParams {
    pub entity_name: String,
    pub entity: Entity,
    pub dtos: EntityDtos,
    /// Directory of the entity's files, relative to the output root
    pub directory: String,
}

/// A relation field of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationField {
    pub name: String,
    pub spec: FieldSpec,
}

/// Parameters of the relation-method stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationParams {
    pub entity_name: String,
    pub directory: String,
    pub relations: Vec<RelationField>,
}

/// Parameters of `CreateServerAuth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub identity: IdentityFields,
    pub directory: String,
}

/// Parameters of `CreateSwagger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwaggerParams {
    pub path: String,
    pub title: String,
    pub description: String,
    pub version: String,
}

/// Parameters of `CreateServerAppModule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppModuleParams {
    pub path: String,
    /// `(class name, import path)` of every module the app module imports
    pub modules: Vec<(String, String)>,
}

/// Parameters of `CreatePrismaSchema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrismaSchemaParams {
    pub path: String,
    pub provider: String,
    /// Environment variable holding the connection URL
    pub url_env: String,
    pub entities: IndexMap<String, Entity>,
}

/// Parameters of `CreateSeed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedParams {
    pub path: String,
    /// Identity of the seeded user; unset when there is no user entity
    pub user: Option<IdentityFields>,
    pub roles: Vec<String>,
}

/// Parameters of the message broker stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerParams {
    pub directory: String,
    pub topics: Vec<String>,
}

/// Parameters of `CreateServerDotEnv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEnvParams {
    pub path: String,
    pub env_variables: IndexMap<String, String>,
}

/// Parameters of the `.gitignore` stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIgnoreParams {
    pub path: String,
    pub entries: Vec<String>,
}

/// Parameters of the docker compose stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerComposeParams {
    pub path: String,
    pub service_name: String,
    pub environment: IndexMap<String, String>,
}

/// Parameters of `CreateAdminUI`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUiParams {
    pub directory: String,
    pub title: String,
    pub entities: Vec<String>,
}
