use std::path::PathBuf;

use indexmap::IndexMap;

use crate::{
    Directories, Dtos, Entity, EntityDtos, IdentityFields, Manifest, MessageBrokerConfig,
    ServiceConfig,
};

/// Read-only input of one generation run.
///
/// Built from a [`Manifest`]; the pipeline shares it between stages and never
/// mutates it.
#[derive(Debug, Clone)]
pub struct ResourceData {
    pub service: ServiceConfig,
    /// Entities in manifest order
    pub entities: IndexMap<String, Entity>,
    pub dtos: Dtos,
    pub directories: Directories,
    pub identity: IdentityFields,
    /// Whether `[auth]` was declared
    pub auth_enabled: bool,
    pub message_broker: Option<MessageBrokerConfig>,
    /// Extra server environment variables
    pub env: IndexMap<String, String>,
    /// Static server files, when configured
    pub static_dir: Option<PathBuf>,
}

impl ResourceData {
    /// Empty input for the given service.
    pub fn new(service: ServiceConfig) -> Self {
        Self {
            service,
            entities: IndexMap::new(),
            dtos: Dtos::new(),
            directories: Directories::default(),
            identity: IdentityFields::default(),
            auth_enabled: false,
            message_broker: None,
            env: IndexMap::new(),
            static_dir: None,
        }
    }

    /// Add an entity and derive its DTO names.
    pub fn with_entity(mut self, name: impl Into<String>, entity: Entity) -> Self {
        let name = name.into();
        self.dtos.insert(name.clone(), EntityDtos::for_entity(&name));
        self.entities.insert(name, entity);
        self
    }

    pub fn with_auth(mut self, identity: IdentityFields) -> Self {
        self.identity = identity;
        self.auth_enabled = true;
        self
    }

    pub fn with_message_broker(mut self, broker: MessageBrokerConfig) -> Self {
        self.message_broker = Some(broker);
        self
    }

    /// The user entity, if declared.
    pub fn user_entity(&self) -> Option<&Entity> {
        self.entities.get(&self.identity.user_entity)
    }
}

impl Manifest {
    /// Build the run input described by this manifest.
    pub fn resource(&self) -> ResourceData {
        let mut resource = ResourceData::new(self.service.clone());
        for (name, entity) in &self.entities {
            resource = resource.with_entity(name.clone(), entity.clone());
        }
        resource.directories = self.directories.clone();
        if let Some(auth) = &self.auth {
            resource = resource.with_auth(auth.clone());
        }
        resource.message_broker = self.message_broker.clone();
        resource.env = self.env.clone();
        resource.static_dir = self.generation.static_dir.clone();
        resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_from_manifest() {
        let manifest: Manifest = r#"
[service]
name = "shop"

[auth]
user_entity = "Customer"

[entities.Customer.fields]
username = "string"
password = "password"
roles = "roles"

[entities.Order.fields]
customer = { type = "lookup", target = "Customer" }
"#
        .parse()
        .unwrap();

        let resource = manifest.resource();
        let entities: Vec<&str> = resource.entities.keys().map(String::as_str).collect();
        assert_eq!(entities, vec!["Customer", "Order"]);
        assert_eq!(resource.dtos["Order"].create_input, "OrderCreateInput");
        assert!(resource.auth_enabled);
        assert!(resource.user_entity().is_some());
        assert!(resource.message_broker.is_none());
    }

    #[test]
    fn test_identity_defaults_without_auth() {
        let manifest: Manifest = "[service]\nname = \"shop\"".parse().unwrap();
        let resource = manifest.resource();

        assert!(!resource.auth_enabled);
        assert_eq!(resource.identity, IdentityFields::default());
        assert!(resource.user_entity().is_none());
    }
}
