//! Parsing and validation of `hookgen.toml`.
//!
//! The manifest describes one generation target: service metadata, the
//! entities to generate for, directory layout, identity field names, generation
//! settings, and the ordered list of plugins to load. [`Manifest::resource`]
//! turns it into the read-only [`ResourceData`] a pipeline run consumes.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod auth;
mod dto;
mod entity;
mod error;
mod generation;
mod manifest;
mod resource;
mod service;

pub use auth::IdentityFields;
pub use dto::{Dtos, EntityDtos};
pub use entity::{Entity, FieldKind, FieldSpec};
pub use error::{Error, Result};
pub use generation::{GenerationSettings, PluginSpec};
pub use manifest::{Manifest, ParseContext};
pub use resource::ResourceData;
pub use service::{Directories, MessageBrokerConfig, ServiceConfig};
