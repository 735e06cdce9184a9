//! Hook traits and closure adapters.

use async_trait::async_trait;
use eyre::Result;
use hookgen_core::Module;

use crate::{GenerationContext, Stage};

/// A hook that runs before a stage's default behavior.
///
/// Receives the parameters produced by the previous hook in the chain (or the
/// stage's initial parameters) and returns the parameters for the next one.
/// May set control flags on the context, e.g. to skip the default behavior
/// or abort the run.
#[async_trait]
pub trait BeforeHook<S: Stage>: Send + Sync {
    async fn before(&self, ctx: &mut GenerationContext, params: S::Params) -> Result<S::Params>;
}

/// A hook that runs after a stage's default behavior.
///
/// Receives the full running module list and returns its replacement. A hook
/// that adds a module returns the input with the module appended; one that
/// removes a module returns a filtered list.
#[async_trait]
pub trait AfterHook<S: Stage>: Send + Sync {
    async fn after(
        &self,
        ctx: &mut GenerationContext,
        params: &S::Params,
        modules: Vec<Module>,
    ) -> Result<Vec<Module>>;
}

/// Adapter turning a synchronous closure into a [`BeforeHook`].
pub struct BeforeFn<F>(pub F);

#[async_trait]
impl<S, F> BeforeHook<S> for BeforeFn<F>
where
    S: Stage,
    F: Fn(&mut GenerationContext, S::Params) -> Result<S::Params> + Send + Sync,
{
    async fn before(&self, ctx: &mut GenerationContext, params: S::Params) -> Result<S::Params> {
        (self.0)(ctx, params)
    }
}

/// Adapter turning a synchronous closure into an [`AfterHook`].
pub struct AfterFn<F>(pub F);

#[async_trait]
impl<S, F> AfterHook<S> for AfterFn<F>
where
    S: Stage,
    F: Fn(&mut GenerationContext, &S::Params, Vec<Module>) -> Result<Vec<Module>> + Send + Sync,
{
    async fn after(
        &self,
        ctx: &mut GenerationContext,
        params: &S::Params,
        modules: Vec<Module>,
    ) -> Result<Vec<Module>> {
        (self.0)(ctx, params, modules)
    }
}
