//! Generation context shared by every hook of one run.

use std::{fmt, path::Path, sync::Arc};

use eyre::Result;
use hookgen_core::{BuildLogger, FsStaticImporter, Module, StaticModuleImporter, TracingLogger};
use hookgen_manifest::{Directories, Dtos, Entity, IdentityFields, ResourceData, ServiceConfig};
use indexmap::IndexMap;

use crate::HookRegistry;

/// Control flags hooks use to steer the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFlags {
    skip_default_behavior: bool,
    /// Set once by the first abort request; the message is its payload.
    abort: Option<String>,
}

impl ControlFlags {
    /// Whether the current stage's default behavior will be skipped.
    pub fn skip_default_behavior(&self) -> bool {
        self.skip_default_behavior
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    pub fn abort_message(&self) -> Option<&str> {
        self.abort.as_deref()
    }
}

/// The mutable record of one generation run.
///
/// Each run owns exactly one context. Hooks read the run input and the
/// accumulated modules through it and steer the run through its control
/// flags. The module list is only replaced by the stage runner, with the
/// result of a completed after-chain.
pub struct GenerationContext {
    modules: Vec<Module>,
    resource: Arc<ResourceData>,
    hooks: Arc<HookRegistry>,
    control: ControlFlags,
    logger: Arc<dyn BuildLogger>,
    importer: Arc<dyn StaticModuleImporter>,
}

impl GenerationContext {
    /// Create a context for a run over `resource`, logging through `tracing`
    /// and importing static files from the local filesystem.
    pub fn new(resource: Arc<ResourceData>, hooks: Arc<HookRegistry>) -> Self {
        Self {
            modules: Vec::new(),
            resource,
            hooks,
            control: ControlFlags::default(),
            logger: Arc::new(TracingLogger),
            importer: Arc::new(FsStaticImporter),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn BuildLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_importer(mut self, importer: Arc<dyn StaticModuleImporter>) -> Self {
        self.importer = importer;
        self
    }

    /// Modules accumulated by completed stages, in order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn resource(&self) -> &ResourceData {
        &self.resource
    }

    pub fn entities(&self) -> &IndexMap<String, Entity> {
        &self.resource.entities
    }

    pub fn dtos(&self) -> &Dtos {
        &self.resource.dtos
    }

    pub fn directories(&self) -> &Directories {
        &self.resource.directories
    }

    pub fn identity(&self) -> &IdentityFields {
        &self.resource.identity
    }

    pub fn service(&self) -> &ServiceConfig {
        &self.resource.service
    }

    /// The hooks registered for this run.
    pub fn plugin_hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    pub fn control(&self) -> &ControlFlags {
        &self.control
    }

    pub fn logger(&self) -> &dyn BuildLogger {
        self.logger.as_ref()
    }

    pub fn skip_default_behavior(&self) -> bool {
        self.control.skip_default_behavior
    }

    /// Skip (or un-skip) the default behavior of the current stage.
    ///
    /// Takes effect when the before-chain completes and is reset at the
    /// start of the next stage.
    pub fn set_skip_default_behavior(&mut self, skip: bool) {
        self.control.skip_default_behavior = skip;
    }

    /// Request that the run stop at the next gate.
    ///
    /// The flag never resets within a run; the first message is kept.
    pub fn abort_generation(&mut self, message: impl Into<String>) {
        if self.control.abort.is_none() {
            self.control.abort = Some(message.into());
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.control.is_aborted()
    }

    pub fn abort_message(&self) -> Option<&str> {
        self.control.abort_message()
    }

    /// Load static files under `source` as modules rooted at `base_path`.
    ///
    /// The modules are returned, not added; an after-hook adds them by
    /// returning them with its input.
    pub async fn import_static_modules(&self, source: &Path, base_path: &str) -> Result<Vec<Module>> {
        self.importer.import(source, base_path).await
    }

    pub(crate) fn reset_skip_default_behavior(&mut self) {
        self.control.skip_default_behavior = false;
    }

    pub(crate) fn replace_modules(&mut self, modules: Vec<Module>) {
        self.modules = modules;
    }

    pub(crate) fn into_modules(self) -> Vec<Module> {
        self.modules
    }
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("modules", &self.modules.len())
            .field("service", &self.resource.service.name)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}
