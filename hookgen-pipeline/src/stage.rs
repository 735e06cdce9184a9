//! Stages and the per-stage state machine.

use std::{fmt, marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use eyre::Result;
use hookgen_core::Module;

use crate::{
    ChainOutcome, GenerationContext, PipelineConfig, PipelineError,
    chain::{run_after_chain, run_before_chain},
};

/// A named generation stage.
///
/// Stages are marker types; the associated `Params` type is the payload the
/// stage's before-chain threads through its hooks. Hooks are registered
/// against the stage type, so a hook for one stage cannot be attached to
/// another stage's parameter shape.
pub trait Stage: Send + Sync + 'static {
    /// Stable stage name, used in logs, diagnostics and the registry.
    const NAME: &'static str;

    type Params: Send + Sync + fmt::Debug + 'static;
}

/// The built-in generation procedure of a stage.
#[async_trait]
pub trait StageGenerator<S: Stage>: Send + Sync {
    /// Initial parameters for the before-chain.
    fn params(&self, ctx: &GenerationContext) -> Result<S::Params>;

    /// Baseline modules for the stage, given the final parameters.
    async fn generate(&self, ctx: &GenerationContext, params: &S::Params) -> Result<Vec<Module>>;
}

/// States of a single stage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageState {
    BeforeRunning,
    DefaultCheck,
    DefaultRunning,
    DefaultSkipped,
    AfterRunning,
    StageComplete,
    StageAborted,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageState::BeforeRunning => "before-running",
            StageState::DefaultCheck => "default-check",
            StageState::DefaultRunning => "default-running",
            StageState::DefaultSkipped => "default-skipped",
            StageState::AfterRunning => "after-running",
            StageState::StageComplete => "complete",
            StageState::StageAborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// How a stage run ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The after-chain result was committed to the context.
    Completed { default_skipped: bool },
    /// The abort flag was observed in state `at`; nothing was committed.
    Aborted { at: StageState },
}

impl StageOutcome {
    /// Terminal state of the stage.
    pub fn state(&self) -> StageState {
        match self {
            StageOutcome::Completed { .. } => StageState::StageComplete,
            StageOutcome::Aborted { .. } => StageState::StageAborted,
        }
    }
}

/// Runs one stage: before-chain, default behavior, after-chain.
pub struct StageRunner<S: Stage> {
    generator: Arc<dyn StageGenerator<S>>,
    _stage: PhantomData<fn() -> S>,
}

impl<S: Stage> StageRunner<S> {
    pub fn new(generator: impl StageGenerator<S> + 'static) -> Self {
        Self::from_arc(Arc::new(generator))
    }

    pub fn from_arc(generator: Arc<dyn StageGenerator<S>>) -> Self {
        Self {
            generator,
            _stage: PhantomData,
        }
    }

    /// Run the stage against `ctx`.
    ///
    /// Every state is entered through an abort gate. The after-chain result
    /// replaces the context's modules only when the stage completes.
    pub async fn run(
        &self,
        ctx: &mut GenerationContext,
        config: &PipelineConfig,
    ) -> Result<StageOutcome, PipelineError> {
        let hooks = Arc::clone(ctx.plugin_hooks());
        ctx.reset_skip_default_behavior();

        if ctx.is_aborted() {
            return Ok(aborted::<S>(StageState::BeforeRunning));
        }
        let initial = self
            .generator
            .params(ctx)
            .map_err(|e| PipelineError::ParamsFailed {
                stage: S::NAME,
                source: e.into(),
            })?;
        let params =
            match run_before_chain::<S>(hooks.before::<S>(), ctx, initial, config.hook_timeout)
                .await?
            {
                ChainOutcome::Completed(params) => params,
                ChainOutcome::Aborted => return Ok(aborted::<S>(StageState::BeforeRunning)),
            };

        if ctx.is_aborted() {
            return Ok(aborted::<S>(StageState::DefaultCheck));
        }
        let default_skipped = ctx.skip_default_behavior();

        let defaults = if default_skipped {
            tracing::debug!(stage = S::NAME, "default behavior skipped");
            Vec::new()
        } else {
            self.generator
                .generate(ctx, &params)
                .await
                .map_err(|e| PipelineError::DefaultFailed {
                    stage: S::NAME,
                    source: e.into(),
                })?
        };

        if ctx.is_aborted() {
            return Ok(aborted::<S>(StageState::AfterRunning));
        }
        let mut initial_modules = ctx.modules().to_vec();
        initial_modules.extend(defaults);
        let modules = match run_after_chain::<S>(
            hooks.after::<S>(),
            ctx,
            &params,
            initial_modules,
            config.hook_timeout,
        )
        .await?
        {
            ChainOutcome::Completed(modules) => modules,
            ChainOutcome::Aborted => return Ok(aborted::<S>(StageState::AfterRunning)),
        };

        if ctx.is_aborted() {
            return Ok(aborted::<S>(StageState::StageComplete));
        }
        ctx.replace_modules(modules);
        Ok(StageOutcome::Completed { default_skipped })
    }
}

fn aborted<S: Stage>(at: StageState) -> StageOutcome {
    tracing::debug!(stage = S::NAME, %at, "abort observed");
    StageOutcome::Aborted { at }
}

/// Type-erased stage runner, so the pipeline can hold a heterogeneous
/// stage sequence.
#[async_trait]
pub(crate) trait DynStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn stage_type(&self) -> &'static str;

    async fn run(
        &self,
        ctx: &mut GenerationContext,
        config: &PipelineConfig,
    ) -> Result<StageOutcome, PipelineError>;
}

#[async_trait]
impl<S: Stage> DynStage for StageRunner<S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn stage_type(&self) -> &'static str {
        std::any::type_name::<S>()
    }

    async fn run(
        &self,
        ctx: &mut GenerationContext,
        config: &PipelineConfig,
    ) -> Result<StageOutcome, PipelineError> {
        StageRunner::run(self, ctx, config).await
    }
}
