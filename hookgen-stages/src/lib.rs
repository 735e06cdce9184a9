//! The hookgen stage catalogue.
//!
//! - [`events`]: the 34 stage marker types and their names
//! - [`params`]: the parameter type each stage threads through its hooks
//! - [`generators`]: the default behavior of every stage
//! - [`standard_pipeline`]: the stage sequence derived from a manifest
//! - [`plugins`]: built-in plugins selectable from `[[plugins]]`

pub mod events;
pub mod generators;
pub mod params;
pub mod plugins;
mod sequence;
mod writer;

pub use events::ALL_STAGES;
pub use plugins::{BUILTIN_PLUGINS, builtin_plugin, with_plugins};
pub use sequence::{standard_pipeline, standard_stages};
pub use writer::CodeWriter;
