//! Per-stage hook storage.

use std::{
    any::{Any, type_name},
    sync::Arc,
};

use indexmap::IndexMap;

use crate::{AfterHook, BeforeHook, PipelineError, Stage};

/// A hook together with the plugin that registered it.
pub struct RegisteredHook<H: ?Sized> {
    plugin: Arc<str>,
    hook: Arc<H>,
}

impl<H: ?Sized> RegisteredHook<H> {
    pub fn new(plugin: Arc<str>, hook: Arc<H>) -> Self {
        Self { plugin, hook }
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<H: ?Sized> Clone for RegisteredHook<H> {
    fn clone(&self) -> Self {
        Self {
            plugin: Arc::clone(&self.plugin),
            hook: Arc::clone(&self.hook),
        }
    }
}

/// Ordered before- and after-hooks of one stage.
pub struct StageHooks<S: Stage> {
    before: Vec<RegisteredHook<dyn BeforeHook<S>>>,
    after: Vec<RegisteredHook<dyn AfterHook<S>>>,
}

impl<S: Stage> Default for StageHooks<S> {
    fn default() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

impl<S: Stage> StageHooks<S> {
    pub fn before(&self) -> &[RegisteredHook<dyn BeforeHook<S>>] {
        &self.before
    }

    pub fn after(&self) -> &[RegisteredHook<dyn AfterHook<S>>] {
        &self.after
    }
}

trait AnyStageHooks: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn stage_type(&self) -> &'static str;
    fn hook_count(&self) -> usize;
    fn summary(&self) -> StageHookSummary;
}

impl<S: Stage> AnyStageHooks for StageHooks<S> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn stage_type(&self) -> &'static str {
        type_name::<S>()
    }

    fn hook_count(&self) -> usize {
        self.before.len() + self.after.len()
    }

    fn summary(&self) -> StageHookSummary {
        StageHookSummary {
            stage: S::NAME,
            before: self.before.iter().map(|h| h.plugin().to_string()).collect(),
            after: self.after.iter().map(|h| h.plugin().to_string()).collect(),
        }
    }
}

/// Plugin names registered on one stage, in chain order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageHookSummary {
    pub stage: &'static str,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Registry of hooks keyed by stage.
///
/// Hooks are appended in registration order and never reordered, deduplicated
/// or removed; the order is the order the chains apply them in. The registry
/// is populated while the pipeline is built and shared read-only afterwards.
#[derive(Default)]
pub struct HookRegistry {
    stages: IndexMap<&'static str, Box<dyn AnyStageHooks>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn stage_mut<S: Stage>(&mut self) -> Result<&mut StageHooks<S>, PipelineError> {
        let entry = self
            .stages
            .entry(S::NAME)
            .or_insert_with(|| Box::new(StageHooks::<S>::default()));
        let existing = entry.stage_type();
        entry
            .as_any_mut()
            .downcast_mut::<StageHooks<S>>()
            .ok_or(PipelineError::StageConflict {
                stage: S::NAME,
                existing,
                requested: type_name::<S>(),
            })
    }

    fn stage<S: Stage>(&self) -> Option<&StageHooks<S>> {
        self.stages
            .get(S::NAME)
            .and_then(|hooks| hooks.as_any().downcast_ref::<StageHooks<S>>())
    }

    /// Append a before-hook for stage `S`.
    pub fn register_before<S: Stage>(
        &mut self,
        plugin: Arc<str>,
        hook: Arc<dyn BeforeHook<S>>,
    ) -> Result<(), PipelineError> {
        tracing::trace!(stage = S::NAME, plugin = %plugin, "registered before-hook");
        self.stage_mut::<S>()?
            .before
            .push(RegisteredHook::new(plugin, hook));
        Ok(())
    }

    /// Append an after-hook for stage `S`.
    pub fn register_after<S: Stage>(
        &mut self,
        plugin: Arc<str>,
        hook: Arc<dyn AfterHook<S>>,
    ) -> Result<(), PipelineError> {
        tracing::trace!(stage = S::NAME, plugin = %plugin, "registered after-hook");
        self.stage_mut::<S>()?
            .after
            .push(RegisteredHook::new(plugin, hook));
        Ok(())
    }

    /// Before-hooks of stage `S` in registration order (possibly empty).
    pub fn before<S: Stage>(&self) -> &[RegisteredHook<dyn BeforeHook<S>>] {
        self.stage::<S>().map(StageHooks::before).unwrap_or(&[])
    }

    /// After-hooks of stage `S` in registration order (possibly empty).
    pub fn after<S: Stage>(&self) -> &[RegisteredHook<dyn AfterHook<S>>] {
        self.stage::<S>().map(StageHooks::after).unwrap_or(&[])
    }

    /// Append every hook a plugin registered, in the order the plugin
    /// listed them.
    pub fn merge(&mut self, plugin: &str, events: crate::Events) -> Result<(), PipelineError> {
        let plugin: Arc<str> = Arc::from(plugin);
        events.install(&plugin, self)
    }

    /// Stages with at least one registered hook, in first-registration order.
    pub fn summary(&self) -> Vec<StageHookSummary> {
        self.stages.values().map(|hooks| hooks.summary()).collect()
    }

    /// Total number of registered hooks.
    pub fn len(&self) -> usize {
        self.stages.values().map(|hooks| hooks.hook_count()).sum()
    }

    /// Type registered under stage name `name`, if any hook claimed it.
    pub fn stage_type(&self, name: &str) -> Option<&'static str> {
        self.stages.get(name).map(|hooks| hooks.stage_type())
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.summary()).finish()
    }
}
