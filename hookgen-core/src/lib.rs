//! Core types for the hookgen code generator.
//!
//! This crate holds the pieces every other hookgen crate agrees on: the
//! [`Module`] output unit, the [`BuildLogger`] capability, static module
//! import, and a few naming helpers used by generators.

mod logger;
mod module;
mod static_files;
mod utils;
mod version;

// Build log capability
pub use logger::{BuildLogger, LogLevel, LogParams, LogRecord, MemoryLogger, TracingLogger};
// Output modules
pub use module::{Module, PrintResult, WriteResult};
// Static module import
pub use static_files::{FsStaticImporter, StaticModuleImporter};
// String utilities
pub use utils::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
pub use version::Version;
