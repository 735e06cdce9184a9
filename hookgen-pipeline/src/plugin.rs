//! Plugin contract and hook registration.

use std::{fmt, sync::Arc};

use eyre::Result;
use hookgen_core::{Module, Version};

use crate::{
    AfterFn, AfterHook, BeforeFn, BeforeHook, GenerationContext, HookPhase, HookRegistry,
    PipelineError, Stage,
};

/// A plugin that hooks into generation stages.
///
/// Plugins are loaded in a fixed order when the pipeline is built: `init` is
/// called first, then `register`, whose hooks are appended to the registry
/// in the order they are listed.
///
/// # Example
///
/// ```ignore
/// struct NoSeed;
///
/// impl Plugin for NoSeed {
///     fn register(&self) -> Events {
///         Events::new().before_fn::<CreateSeed, _>(|ctx, params| {
///             ctx.set_skip_default_behavior(true);
///             Ok(params)
///         })
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Called once with the name and version the plugin was loaded under.
    ///
    /// # Errors
    ///
    /// Return an error to stop the pipeline from being built.
    #[allow(unused_variables)]
    fn init(&mut self, name: &str, version: &Version) -> Result<()> {
        Ok(())
    }

    /// The hooks this plugin contributes, per stage.
    fn register(&self) -> Events;
}

type Installer = Box<dyn FnOnce(&Arc<str>, &mut HookRegistry) -> Result<(), PipelineError> + Send>;

struct EventEntry {
    stage: &'static str,
    phase: HookPhase,
    install: Installer,
}

/// Hooks returned by [`Plugin::register`], in the order they were listed.
///
/// Hooks are typed by stage: a hook for `S` must accept `S::Params`.
#[derive(Default)]
pub struct Events {
    entries: Vec<EventEntry>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a before-hook for stage `S`.
    pub fn before<S: Stage>(self, hook: impl BeforeHook<S> + 'static) -> Self {
        let hook: Arc<dyn BeforeHook<S>> = Arc::new(hook);
        self.push(
            S::NAME,
            HookPhase::Before,
            Box::new(move |plugin: &Arc<str>, registry: &mut HookRegistry| {
                registry.register_before::<S>(Arc::clone(plugin), hook)
            }),
        )
    }

    /// Add an after-hook for stage `S`.
    pub fn after<S: Stage>(self, hook: impl AfterHook<S> + 'static) -> Self {
        let hook: Arc<dyn AfterHook<S>> = Arc::new(hook);
        self.push(
            S::NAME,
            HookPhase::After,
            Box::new(move |plugin: &Arc<str>, registry: &mut HookRegistry| {
                registry.register_after::<S>(Arc::clone(plugin), hook)
            }),
        )
    }

    /// Add a synchronous before-hook for stage `S`.
    pub fn before_fn<S, F>(self, hook: F) -> Self
    where
        S: Stage,
        F: Fn(&mut GenerationContext, S::Params) -> Result<S::Params> + Send + Sync + 'static,
    {
        self.before::<S>(BeforeFn(hook))
    }

    /// Add a synchronous after-hook for stage `S`.
    pub fn after_fn<S, F>(self, hook: F) -> Self
    where
        S: Stage,
        F: Fn(&mut GenerationContext, &S::Params, Vec<Module>) -> Result<Vec<Module>>
            + Send
            + Sync
            + 'static,
    {
        self.after::<S>(AfterFn(hook))
    }

    fn push(mut self, stage: &'static str, phase: HookPhase, install: Installer) -> Self {
        self.entries.push(EventEntry {
            stage,
            phase,
            install,
        });
        self
    }

    /// `(stage, phase)` of every hook, in listed order.
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, HookPhase)> + '_ {
        self.entries.iter().map(|e| (e.stage, e.phase))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn install(
        self,
        plugin: &Arc<str>,
        registry: &mut HookRegistry,
    ) -> Result<(), PipelineError> {
        for entry in self.entries {
            (entry.install)(plugin, registry)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.hooks()).finish()
    }
}
