//! Pipeline orchestrator.

use std::sync::Arc;

use hookgen_core::{
    BuildLogger, FsStaticImporter, Module, StaticModuleImporter, TracingLogger, Version,
};
use hookgen_manifest::ResourceData;
use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;
use tracing::Instrument;

use crate::{
    GenerationContext, HookRegistry, PipelineConfig, PipelineError, Plugin, Stage,
    StageGenerator, StageOutcome, StageRunner, stage::DynStage,
};

/// Outcome of one stage within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub stage: &'static str,
    pub outcome: StageOutcome,
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every stage completed.
    Completed,
    /// A hook requested an abort; `stage` is where it was observed.
    Aborted { stage: &'static str, message: String },
}

/// Result of a run that did not fail.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Modules committed by completed stages, in order.
    pub modules: Vec<Module>,
    pub stages: Vec<StageRecord>,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn abort_message(&self) -> Option<&str> {
        match &self.status {
            RunStatus::Completed => None,
            RunStatus::Aborted { message, .. } => Some(message),
        }
    }
}

/// A run that failed in a hook or a stage's default behavior.
///
/// Carries the modules committed by the stages that completed before the
/// failing one.
#[derive(Debug, Error, Diagnostic)]
#[error("generation failed in stage {stage}")]
#[diagnostic(code(hookgen::run_failed))]
pub struct RunFailure {
    pub stage: &'static str,
    #[source]
    #[diagnostic_source]
    pub error: PipelineError,
    pub modules: Vec<Module>,
    pub stages: Vec<StageRecord>,
}

struct LoadedPlugin {
    name: String,
    version: Version,
    plugin: Box<dyn Plugin>,
}

/// Builder for a [`Pipeline`].
///
/// The stage sequence is fixed here, and plugins register their hooks when
/// [`build`](PipelineBuilder::build) runs; the built pipeline accepts no
/// further registrations.
pub struct PipelineBuilder {
    stages: Vec<Box<dyn DynStage>>,
    plugins: Vec<LoadedPlugin>,
    logger: Arc<dyn BuildLogger>,
    importer: Arc<dyn StaticModuleImporter>,
    config: PipelineConfig,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            stages: Vec::new(),
            plugins: Vec::new(),
            logger: Arc::new(TracingLogger),
            importer: Arc::new(FsStaticImporter),
            config: PipelineConfig::default(),
        }
    }
}

impl PipelineBuilder {
    /// Append stage `S` to the sequence, with its default behavior.
    pub fn stage<S: Stage>(self, generator: impl StageGenerator<S> + 'static) -> Self {
        self.runner(StageRunner::<S>::new(generator))
    }

    /// Append a prepared stage runner to the sequence.
    pub fn runner<S: Stage>(mut self, runner: StageRunner<S>) -> Self {
        self.stages.push(Box::new(runner));
        self
    }

    /// Load a plugin. Plugins register in the order they are added.
    pub fn plugin(
        self,
        name: impl Into<String>,
        version: Version,
        plugin: impl Plugin + 'static,
    ) -> Self {
        self.boxed_plugin(name, version, Box::new(plugin))
    }

    pub fn boxed_plugin(
        mut self,
        name: impl Into<String>,
        version: Version,
        plugin: Box<dyn Plugin>,
    ) -> Self {
        self.plugins.push(LoadedPlugin {
            name: name.into(),
            version,
            plugin,
        });
        self
    }

    pub fn logger(mut self, logger: Arc<dyn BuildLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn importer(mut self, importer: Arc<dyn StaticModuleImporter>) -> Self {
        self.importer = importer;
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Initialize every plugin and collect its hooks.
    ///
    /// # Errors
    ///
    /// Fails if a plugin's `init` fails or two stage types share a name,
    /// whether both are in the sequence or one was only named by a hook.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let mut registry = HookRegistry::new();
        for LoadedPlugin {
            name,
            version,
            mut plugin,
        } in self.plugins
        {
            plugin
                .init(&name, &version)
                .map_err(|e| PipelineError::PluginInit {
                    plugin: name.clone(),
                    source: e.into(),
                })?;
            let events = plugin.register();
            tracing::debug!(plugin = %name, %version, hooks = events.len(), "loaded plugin");
            registry.merge(&name, events)?;
        }
        check_stage_types(&self.stages, &registry)?;

        Ok(Pipeline {
            stages: self.stages,
            hooks: Arc::new(registry),
            logger: self.logger,
            importer: self.importer,
            config: self.config,
        })
    }
}

/// Every stage name must map to one type across the sequence and the hooks,
/// otherwise hooks registered under the name would never be found.
fn check_stage_types(
    stages: &[Box<dyn DynStage>],
    registry: &HookRegistry,
) -> Result<(), PipelineError> {
    let mut seen: IndexMap<&'static str, &'static str> = IndexMap::new();
    for stage in stages {
        let (name, requested) = (stage.name(), stage.stage_type());
        let existing = *seen.entry(name).or_insert(requested);
        let conflict = if existing != requested {
            Some(existing)
        } else {
            registry.stage_type(name).filter(|hooked| *hooked != requested)
        };
        if let Some(existing) = conflict {
            return Err(PipelineError::StageConflict {
                stage: name,
                existing,
                requested,
            });
        }
    }
    Ok(())
}

/// The generation pipeline orchestrator.
///
/// Walks a fixed stage sequence, running each stage's hooks and default
/// behavior against a context owned by the run. Runs are independent; one
/// pipeline can serve several runs at once.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::builder()
///     .stage::<CreateServer>(ServerGenerator)
///     .plugin("no-docker", Version::new(1, 0, 0), NoDocker)
///     .build()?;
///
/// match pipeline.run(resource).await {
///     Ok(outcome) if outcome.is_completed() => write(outcome.modules),
///     Ok(RunOutcome { status: RunStatus::Aborted { message, .. }, .. }) => eprintln!("aborted: {}", message),
///     Err(failure) => return Err(failure.into()),
/// }
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn DynStage>>,
    hooks: Arc<HookRegistry>,
    logger: Arc<dyn BuildLogger>,
    importer: Arc<dyn StaticModuleImporter>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Stage names in run order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over `resource`.
    ///
    /// Stops after the first stage that observes an abort. A failing hook or
    /// default behavior ends the run with a [`RunFailure`].
    pub async fn run(&self, resource: ResourceData) -> Result<RunOutcome, RunFailure> {
        self.run_shared(Arc::new(resource)).await
    }

    /// Like [`run`](Pipeline::run), for input shared between runs.
    pub async fn run_shared(&self, resource: Arc<ResourceData>) -> Result<RunOutcome, RunFailure> {
        let span = tracing::info_span!("generation", service = %resource.service.name);
        let ctx = GenerationContext::new(resource, Arc::clone(&self.hooks))
            .with_logger(Arc::clone(&self.logger))
            .with_importer(Arc::clone(&self.importer));
        self.walk(ctx).instrument(span).await
    }

    async fn walk(&self, mut ctx: GenerationContext) -> Result<RunOutcome, RunFailure> {
        let mut records = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let name = stage.name();
            let outcome = match stage.run(&mut ctx, &self.config).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    tracing::error!(stage = name, %error, "stage failed");
                    return Err(RunFailure {
                        stage: name,
                        error,
                        modules: ctx.into_modules(),
                        stages: records,
                    });
                }
            };
            tracing::debug!(stage = name, ?outcome, "stage finished");
            records.push(StageRecord {
                stage: name,
                outcome,
            });

            if let Some(message) = ctx.abort_message().map(str::to_owned) {
                tracing::info!(stage = name, %message, "generation aborted");
                return Ok(RunOutcome {
                    status: RunStatus::Aborted {
                        stage: name,
                        message,
                    },
                    modules: ctx.into_modules(),
                    stages: records,
                });
            }
        }

        tracing::info!(modules = ctx.modules().len(), "generation completed");
        Ok(RunOutcome {
            status: RunStatus::Completed,
            modules: ctx.into_modules(),
            stages: records,
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
