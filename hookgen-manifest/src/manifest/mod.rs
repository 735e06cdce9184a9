//! Manifest types and parsing for hookgen.toml files.

mod parse;
mod validate;

use indexmap::IndexMap;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{
    Directories, Entity, GenerationSettings, IdentityFields, MessageBrokerConfig, PluginSpec,
    ServiceConfig,
};

/// Root manifest for hookgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Service metadata
    pub service: ServiceConfig,

    /// Output directory layout
    #[serde(default)]
    pub directories: Directories,

    /// Identity field names; presence enables the auth stage
    pub auth: Option<IdentityFields>,

    /// Entities in declaration order
    #[serde(default)]
    pub entities: IndexMap<String, Entity>,

    /// Message broker; presence enables the broker stages
    pub message_broker: Option<MessageBrokerConfig>,

    /// Extra server environment variables
    #[serde(default)]
    pub env: IndexMap<String, String>,

    #[serde(default)]
    pub generation: GenerationSettings,

    /// Plugins in load order
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

impl Manifest {
    /// Plugins that are enabled, in load order.
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &PluginSpec> {
        self.plugins.iter().filter(|p| p.enabled)
    }
}
