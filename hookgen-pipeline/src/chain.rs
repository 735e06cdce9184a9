//! Sequential composition of a stage's hooks.
//!
//! Both chains thread their state strictly left to right: each hook sees
//! exactly what the previous one returned. The abort flag is checked before
//! every hook; once set, no further hook of the chain runs. A hook failure
//! stops the chain and is reported with the hook's position.

use std::{future::Future, sync::Arc, time::Duration};

use hookgen_core::Module;

use crate::{
    AfterHook, BeforeHook, GenerationContext, HookPhase, PipelineError, Stage,
    registry::RegisteredHook,
};

/// Result of a chain that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome<T> {
    /// Every hook ran; carries the last hook's output.
    Completed(T),
    /// The abort flag stopped the chain before a hook could run.
    Aborted,
}

/// Run the before-chain of stage `S` starting from `params`.
pub async fn run_before_chain<S: Stage>(
    hooks: &[RegisteredHook<dyn BeforeHook<S>>],
    ctx: &mut GenerationContext,
    mut params: S::Params,
    timeout: Option<Duration>,
) -> Result<ChainOutcome<S::Params>, PipelineError> {
    for (index, hook) in hooks.iter().enumerate() {
        if ctx.is_aborted() {
            return Ok(ChainOutcome::Aborted);
        }
        let site = HookSite::new(S::NAME, HookPhase::Before, index, hook);
        tracing::trace!(stage = S::NAME, index, plugin = hook.plugin(), "before-hook");
        params = site
            .guard(hook.hook().before(ctx, params), timeout)
            .await?;
    }
    Ok(ChainOutcome::Completed(params))
}

/// Run the after-chain of stage `S` starting from `modules`.
pub async fn run_after_chain<S: Stage>(
    hooks: &[RegisteredHook<dyn AfterHook<S>>],
    ctx: &mut GenerationContext,
    params: &S::Params,
    mut modules: Vec<Module>,
    timeout: Option<Duration>,
) -> Result<ChainOutcome<Vec<Module>>, PipelineError> {
    for (index, hook) in hooks.iter().enumerate() {
        if ctx.is_aborted() {
            return Ok(ChainOutcome::Aborted);
        }
        let site = HookSite::new(S::NAME, HookPhase::After, index, hook);
        tracing::trace!(stage = S::NAME, index, plugin = hook.plugin(), "after-hook");
        modules = site
            .guard(hook.hook().after(ctx, params, modules), timeout)
            .await?;
    }
    Ok(ChainOutcome::Completed(modules))
}

/// Position of a hook, for error attribution.
struct HookSite {
    stage: &'static str,
    phase: HookPhase,
    index: usize,
    plugin: Arc<str>,
}

impl HookSite {
    fn new<H: ?Sized>(
        stage: &'static str,
        phase: HookPhase,
        index: usize,
        hook: &RegisteredHook<H>,
    ) -> Self {
        Self {
            stage,
            phase,
            index,
            plugin: Arc::from(hook.plugin()),
        }
    }

    /// Await a hook, applying the optional timeout and attributing errors.
    async fn guard<T>(
        self,
        fut: impl Future<Output = eyre::Result<T>>,
        timeout: Option<Duration>,
    ) -> Result<T, PipelineError> {
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(PipelineError::HookTimedOut {
                        stage: self.stage,
                        phase: self.phase,
                        index: self.index,
                        plugin: self.plugin.to_string(),
                        timeout: limit,
                    });
                }
            },
            None => fut.await,
        };
        result.map_err(|source| PipelineError::HookFailed {
            stage: self.stage,
            phase: self.phase,
            index: self.index,
            plugin: self.plugin.to_string(),
            source: source.into(),
        })
    }
}
