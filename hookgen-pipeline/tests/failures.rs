//! Failure channel, timeouts, capabilities and run isolation.

mod common;

use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use common::*;
use eyre::{Result, eyre};
use hookgen_core::{LogLevel, MemoryLogger, Module, StaticModuleImporter, Version};
use hookgen_pipeline::{
    BeforeHook, Events, GenerationContext, HookPhase, Pipeline, PipelineConfig, PipelineError,
    Plugin, RunStatus, Stage, StageGenerator,
};

fn version() -> Version {
    Version::new(1, 0, 0)
}

#[tokio::test]
async fn test_before_hook_failure_identifies_hook() {
    let (builder, calls) = three_stages();
    let pipeline = builder
        .plugin(
            "fine",
            version(),
            FnPlugin(|| Events::new().before_fn::<Beta, _>(|_, params| Ok(params))),
        )
        .plugin(
            "broken",
            version(),
            FnPlugin(|| Events::new().before_fn::<Beta, _>(|_, _| Err(eyre!("bad input")))),
        )
        .build()
        .unwrap();

    let failure = pipeline.run(resource("shop")).await.unwrap_err();

    assert_eq!(failure.stage, "Beta");
    assert_eq!(failure.error.hook(), Some((HookPhase::Before, 1, "broken")));
    assert_eq!(
        failure.error.to_string(),
        "before-hook #1 of stage Beta (plugin 'broken') failed"
    );
    // Modules of completed stages are kept.
    assert_eq!(paths(&failure.modules), vec!["alpha.out"]);
    assert_eq!(failure.stages.len(), 1);
    assert_eq!(Calls::get(&calls.beta), 0);
    assert_eq!(Calls::get(&calls.gamma), 0);
}

#[tokio::test]
async fn test_after_hook_failure_commits_nothing() {
    let (builder, calls) = three_stages();
    let pipeline = builder
        .plugin(
            "broken",
            version(),
            FnPlugin(|| {
                Events::new().after_fn::<Beta, _>(|_, _, _| Err(eyre!("cannot rewrite")))
            }),
        )
        .build()
        .unwrap();

    let failure = pipeline.run(resource("shop")).await.unwrap_err();

    assert_eq!(Calls::get(&calls.beta), 1);
    assert_eq!(failure.error.hook(), Some((HookPhase::After, 0, "broken")));
    assert_eq!(paths(&failure.modules), vec!["alpha.out"]);
    let source = std::error::Error::source(&failure.error).unwrap();
    assert_eq!(source.to_string(), "cannot rewrite");
}

struct Failing {
    in_params: bool,
}

#[async_trait]
impl StageGenerator<Beta> for Failing {
    fn params(&self, _ctx: &GenerationContext) -> Result<Vec<String>> {
        if self.in_params {
            return Err(eyre!("no params"));
        }
        Ok(Vec::new())
    }

    async fn generate(&self, _ctx: &GenerationContext, _params: &Vec<String>) -> Result<Vec<Module>> {
        Err(eyre!("template missing"))
    }
}

async fn run_failing(in_params: bool) -> PipelineError {
    let (alpha, _) = Emit::<Alpha>::new();
    Pipeline::builder()
        .stage::<Alpha>(alpha)
        .stage::<Beta>(Failing { in_params })
        .build()
        .unwrap()
        .run(resource("shop"))
        .await
        .unwrap_err()
        .error
}

#[tokio::test]
async fn test_default_failure() {
    let error = run_failing(false).await;
    assert!(matches!(error, PipelineError::DefaultFailed { stage: "Beta", .. }));
    assert!(error.hook().is_none());
}

#[tokio::test]
async fn test_params_failure() {
    let error = run_failing(true).await;
    assert!(matches!(error, PipelineError::ParamsFailed { stage: "Beta", .. }));
}

struct Sleepy(Duration);

#[async_trait]
impl BeforeHook<Alpha> for Sleepy {
    async fn before(&self, _ctx: &mut GenerationContext, params: Vec<String>) -> Result<Vec<String>> {
        tokio::time::sleep(self.0).await;
        Ok(params)
    }
}

fn sleepy_pipeline(sleep: Duration, config: PipelineConfig) -> Pipeline {
    let (builder, _) = three_stages();
    builder
        .plugin(
            "sleepy",
            version(),
            FnPlugin(move || Events::new().before::<Alpha>(Sleepy(sleep))),
        )
        .config(config)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_hook_timeout() {
    let config = PipelineConfig::new().with_hook_timeout(Duration::from_millis(20));
    let pipeline = sleepy_pipeline(Duration::from_secs(5), config);

    let failure = pipeline.run(resource("shop")).await.unwrap_err();

    match failure.error {
        PipelineError::HookTimedOut {
            stage,
            phase,
            index,
            ref plugin,
            timeout,
        } => {
            assert_eq!(stage, "Alpha");
            assert_eq!(phase, HookPhase::Before);
            assert_eq!(index, 0);
            assert_eq!(plugin, "sleepy");
            assert_eq!(timeout, Duration::from_millis(20));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(failure.modules.is_empty());
}

#[tokio::test]
async fn test_no_timeout_by_default() {
    let pipeline = sleepy_pipeline(Duration::from_millis(30), PipelineConfig::default());
    let outcome = pipeline.run(resource("shop")).await.unwrap();
    assert!(outcome.is_completed());
}

struct Versioned {
    seen: Option<String>,
}

impl Plugin for Versioned {
    fn init(&mut self, name: &str, version: &Version) -> Result<()> {
        if version.is_prerelease() {
            return Err(eyre!("{} {} is a pre-release", name, version));
        }
        self.seen = Some(format!("{}@{}", name, version));
        Ok(())
    }

    fn register(&self) -> Events {
        let tag = self.seen.clone().unwrap_or_default();
        Events::new().before_fn::<Alpha, _>(move |_, mut params| {
            params.push(tag.clone());
            Ok(params)
        })
    }
}

#[tokio::test]
async fn test_plugin_init_runs_before_register() {
    let (builder, _) = three_stages();
    let pipeline = builder
        .plugin("versioned", Version::new(2, 1, 0), Versioned { seen: None })
        .build()
        .unwrap();

    let outcome = pipeline.run(resource("shop")).await.unwrap();

    assert_eq!(outcome.modules[0].code(), "p0,versioned@2.1.0");
}

#[test]
fn test_plugin_init_failure() {
    let (builder, _) = three_stages();
    let err = builder
        .plugin(
            "versioned",
            Version::new(2, 0, 0).with_pre("rc.1"),
            Versioned { seen: None },
        )
        .build()
        .unwrap_err();

    assert!(matches!(err, PipelineError::PluginInit { ref plugin, .. } if plugin == "versioned"));
}

struct Announce;

#[async_trait]
impl BeforeHook<Gamma> for Announce {
    async fn before(&self, ctx: &mut GenerationContext, params: Vec<String>) -> Result<Vec<String>> {
        ctx.logger()
            .warn(
                "gamma params rewritten",
                None,
                Some("Gamma output was customised"),
            )
            .await?;
        Ok(params)
    }
}

#[tokio::test]
async fn test_hooks_log_through_context() {
    let logger = Arc::new(MemoryLogger::new());
    let (builder, _) = three_stages();
    let pipeline = builder
        .plugin(
            "announce",
            version(),
            FnPlugin(|| Events::new().before::<Gamma>(Announce)),
        )
        .logger(logger.clone())
        .build()
        .unwrap();

    pipeline.run(resource("shop")).await.unwrap();

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Warn);
    assert_eq!(records[0].user_facing(), "Gamma output was customised");
}

struct FixedImporter;

#[async_trait]
impl StaticModuleImporter for FixedImporter {
    async fn import(&self, source: &Path, base_path: &str) -> Result<Vec<Module>> {
        Ok(vec![Module::new(
            format!("{}/{}", base_path, source.display()),
            "static",
        )])
    }
}

struct SeedStatic;

#[async_trait]
impl hookgen_pipeline::AfterHook<Alpha> for SeedStatic {
    async fn after(
        &self,
        ctx: &mut GenerationContext,
        _params: &Vec<String>,
        mut modules: Vec<Module>,
    ) -> Result<Vec<Module>> {
        let imported = ctx
            .import_static_modules(Path::new("health.ts"), "server")
            .await?;
        modules.extend(imported);
        Ok(modules)
    }
}

#[tokio::test]
async fn test_hooks_import_static_modules() {
    let (builder, _) = three_stages();
    let pipeline = builder
        .plugin(
            "static",
            version(),
            FnPlugin(|| Events::new().after::<Alpha>(SeedStatic)),
        )
        .importer(Arc::new(FixedImporter))
        .build()
        .unwrap();

    let outcome = pipeline.run(resource("shop")).await.unwrap();

    assert_eq!(
        paths(&outcome.modules),
        vec!["alpha.out", "server/health.ts", "beta.out", "gamma.out"]
    );
}

#[tokio::test]
async fn test_concurrent_runs_are_isolated() {
    let (builder, _) = three_stages();
    let pipeline = Arc::new(
        builder
            .plugin(
                "per-service",
                version(),
                FnPlugin(|| {
                    Events::new().before_fn::<Beta, _>(|ctx, mut params| {
                        if ctx.service().name == "broken" {
                            ctx.abort_generation("broken service");
                        }
                        params.push(ctx.service().name.clone());
                        Ok(params)
                    })
                }),
            )
            .build()
            .unwrap(),
    );

    let mut handles = Vec::new();
    for service in ["shop", "broken", "billing"] {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            pipeline.run(resource(service)).await.unwrap()
        }));
    }
    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    assert!(outcomes[0].is_completed());
    assert_eq!(outcomes[0].modules[1].code(), "p0,shop");
    assert_eq!(outcomes[1].abort_message(), Some("broken service"));
    assert_eq!(paths(&outcomes[1].modules), vec!["alpha.out"]);
    assert!(outcomes[2].is_completed());
    assert_eq!(outcomes[2].modules[1].code(), "p0,billing");
    assert!(matches!(outcomes[2].status, RunStatus::Completed));
}

struct Clash;

impl Stage for Clash {
    const NAME: &'static str = "Alpha";
    type Params = u8;
}

#[test]
fn test_stage_name_clash_rejected_at_build() {
    let (builder, _) = three_stages();
    let err = builder
        .plugin(
            "clash",
            version(),
            FnPlugin(|| {
                Events::new()
                    .before_fn::<Alpha, _>(|_, params| Ok(params))
                    .before_fn::<Clash, _>(|_, params| Ok(params))
            }),
        )
        .build()
        .unwrap_err();

    assert!(matches!(err, PipelineError::StageConflict { stage: "Alpha", .. }));
}

struct ClashDefault;

#[async_trait]
impl StageGenerator<Clash> for ClashDefault {
    fn params(&self, _ctx: &GenerationContext) -> Result<u8> {
        Ok(0)
    }

    async fn generate(&self, _ctx: &GenerationContext, _params: &u8) -> Result<Vec<Module>> {
        Ok(vec![Module::new("clash.out", "")])
    }
}

#[test]
fn test_hooks_on_same_named_stage_type_rejected_at_build() {
    let err = Pipeline::builder()
        .stage::<Clash>(ClashDefault)
        .plugin(
            "alpha-hooks",
            version(),
            FnPlugin(|| Events::new().before_fn::<Alpha, _>(|_, params| Ok(params))),
        )
        .build()
        .unwrap_err();

    match err {
        PipelineError::StageConflict {
            stage,
            existing,
            requested,
        } => {
            assert_eq!(stage, "Alpha");
            assert!(existing.ends_with("Alpha"));
            assert!(requested.ends_with("Clash"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_sequence_with_same_named_stage_types_rejected_at_build() {
    let (builder, _) = three_stages();
    let err = builder.stage::<Clash>(ClashDefault).build().unwrap_err();

    assert!(matches!(err, PipelineError::StageConflict { stage: "Alpha", .. }));
}

#[test]
fn test_repeated_stage_type_builds() {
    let (alpha, _) = Emit::<Alpha>::new();
    let (builder, _) = three_stages();
    let pipeline = builder
        .stage::<Alpha>(alpha)
        .plugin(
            "alpha-hooks",
            version(),
            FnPlugin(|| Events::new().before_fn::<Alpha, _>(|_, params| Ok(params))),
        )
        .build()
        .unwrap();

    assert_eq!(pipeline.stage_names(), vec!["Alpha", "Beta", "Gamma", "Alpha"]);
    assert_eq!(pipeline.hooks().len(), 1);
}
