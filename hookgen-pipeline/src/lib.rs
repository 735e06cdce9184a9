//! Hook dispatch engine for hookgen.
//!
//! A [`Pipeline`] walks a fixed sequence of named stages. For every stage it
//! runs the before-hooks plugins registered for it, the stage's default
//! behavior (unless a hook asked to skip it), then the after-hooks, all
//! against one [`GenerationContext`] per run:
//!
//! - before-hooks thread the stage's parameters left to right
//! - after-hooks replace the full running module list, left to right
//! - an abort requested by any hook stops the run at the next gate
//! - a hook failure ends the run, keeping modules of completed stages
//!
//! # Example
//!
//! ```ignore
//! use hookgen_pipeline::{Events, Pipeline, Plugin};
//!
//! struct RequireEntities;
//!
//! impl Plugin for RequireEntities {
//!     fn register(&self) -> Events {
//!         Events::new().before_fn::<CreateServer, _>(|ctx, params| {
//!             if ctx.entities().is_empty() {
//!                 ctx.abort_generation("no entities defined");
//!             }
//!             Ok(params)
//!         })
//!     }
//! }
//! ```

mod chain;
mod config;
mod context;
mod error;
mod hook;
mod plugin;
mod registry;
mod runner;
mod stage;

pub use chain::{ChainOutcome, run_after_chain, run_before_chain};
pub use config::PipelineConfig;
pub use context::{ControlFlags, GenerationContext};
pub use error::{BoxError, HookPhase, PipelineError};
pub use hook::{AfterFn, AfterHook, BeforeFn, BeforeHook};
pub use plugin::{Events, Plugin};
pub use registry::{HookRegistry, RegisteredHook, StageHookSummary, StageHooks};
pub use runner::{Pipeline, PipelineBuilder, RunFailure, RunOutcome, RunStatus, StageRecord};
pub use stage::{Stage, StageGenerator, StageOutcome, StageRunner, StageState};
