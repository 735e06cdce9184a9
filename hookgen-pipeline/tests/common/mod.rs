//! Stages, generators and plugins shared by the integration tests.

#![allow(dead_code)]

use std::{
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use eyre::Result;
use hookgen_core::Module;
use hookgen_manifest::{ResourceData, ServiceConfig};
use hookgen_pipeline::{Events, GenerationContext, PipelineBuilder, Plugin, Stage, StageGenerator};

macro_rules! test_stage {
    ($($name:ident),*) => {
        $(
            pub struct $name;

            impl Stage for $name {
                const NAME: &'static str = stringify!($name);
                type Params = Vec<String>;
            }
        )*
    };
}

test_stage!(Alpha, Beta, Gamma);

/// Default behavior that emits `<stage>.out` holding the final params.
pub struct Emit<S> {
    calls: Arc<AtomicUsize>,
    _stage: PhantomData<fn() -> S>,
}

impl<S> Emit<S> {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: calls.clone(),
                _stage: PhantomData,
            },
            calls,
        )
    }
}

#[async_trait]
impl<S> StageGenerator<S> for Emit<S>
where
    S: Stage<Params = Vec<String>>,
{
    fn params(&self, _ctx: &GenerationContext) -> Result<S::Params> {
        Ok(vec!["p0".to_string()])
    }

    async fn generate(&self, _ctx: &GenerationContext, params: &S::Params) -> Result<Vec<Module>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Module::new(output_path::<S>(), params.join(","))])
    }
}

pub fn output_path<S: Stage>() -> String {
    format!("{}.out", S::NAME.to_lowercase())
}

/// Default-behavior call counters of the three test stages.
pub struct Calls {
    pub alpha: Arc<AtomicUsize>,
    pub beta: Arc<AtomicUsize>,
    pub gamma: Arc<AtomicUsize>,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// A builder with the sequence Alpha, Beta, Gamma.
pub fn three_stages() -> (PipelineBuilder, Calls) {
    let (alpha, alpha_calls) = Emit::<Alpha>::new();
    let (beta, beta_calls) = Emit::<Beta>::new();
    let (gamma, gamma_calls) = Emit::<Gamma>::new();
    let builder = hookgen_pipeline::Pipeline::builder()
        .stage::<Alpha>(alpha)
        .stage::<Beta>(beta)
        .stage::<Gamma>(gamma);
    (
        builder,
        Calls {
            alpha: alpha_calls,
            beta: beta_calls,
            gamma: gamma_calls,
        },
    )
}

/// Plugin whose registration is a closure.
pub struct FnPlugin<F>(pub F);

impl<F> Plugin for FnPlugin<F>
where
    F: Fn() -> Events + Send + Sync,
{
    fn register(&self) -> Events {
        (self.0)()
    }
}

pub fn resource(service: &str) -> ResourceData {
    ResourceData::new(ServiceConfig::new(service))
}

pub fn paths(modules: &[Module]) -> Vec<&str> {
    modules.iter().map(Module::path).collect()
}

/// Counter shared between a test and a hook.
pub fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

pub fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}
