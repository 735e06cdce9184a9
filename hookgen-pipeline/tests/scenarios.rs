//! End-to-end scenarios over a three-stage sequence.

mod common;

use common::*;
use hookgen_core::{Module, Version};
use hookgen_pipeline::{Events, RunStatus};

#[tokio::test]
async fn test_no_plugins_concatenates_defaults_in_stage_order() {
    let (builder, calls) = three_stages();
    let pipeline = builder.build().unwrap();

    let outcome = pipeline.run(resource("shop")).await.unwrap();

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(
        outcome.modules,
        vec![
            Module::new("alpha.out", "p0"),
            Module::new("beta.out", "p0"),
            Module::new("gamma.out", "p0"),
        ]
    );
    assert_eq!(Calls::get(&calls.alpha), 1);
    assert_eq!(outcome.stages.len(), 3);
    assert!(pipeline.hooks().is_empty());
}

#[tokio::test]
async fn test_skipped_stage_replaced_by_custom_module() {
    let (builder, calls) = three_stages();
    let pipeline = builder
        .plugin(
            "custom",
            Version::new(0, 1, 0),
            FnPlugin(|| {
                Events::new()
                    .before_fn::<Beta, _>(|ctx, params| {
                        ctx.set_skip_default_behavior(true);
                        Ok(params)
                    })
                    .after_fn::<Beta, _>(|_, _, mut modules| {
                        modules.push(Module::new("custom.out", "custom"));
                        Ok(modules)
                    })
            }),
        )
        .build()
        .unwrap();

    let outcome = pipeline.run(resource("shop")).await.unwrap();

    assert_eq!(Calls::get(&calls.beta), 0);
    assert_eq!(
        paths(&outcome.modules),
        vec!["alpha.out", "custom.out", "gamma.out"]
    );
    let custom: Vec<&Module> = outcome
        .modules
        .iter()
        .filter(|m| m.path() == "custom.out")
        .collect();
    assert_eq!(custom.len(), 1);
}

#[tokio::test]
async fn test_before_hook_abort_reports_message() {
    let (builder, calls) = three_stages();
    let pipeline = builder
        .plugin(
            "config-check",
            Version::new(0, 1, 0),
            FnPlugin(|| {
                Events::new().before_fn::<Beta, _>(|ctx, params| {
                    ctx.abort_generation("missing config");
                    Ok(params)
                })
            }),
        )
        .build()
        .unwrap();

    let outcome = pipeline.run(resource("shop")).await.unwrap();

    assert!(!outcome.is_completed());
    assert_eq!(outcome.abort_message(), Some("missing config"));
    assert_eq!(
        outcome.status,
        RunStatus::Aborted {
            stage: "Beta",
            message: "missing config".into()
        }
    );
    assert_eq!(Calls::get(&calls.gamma), 0);
    assert_eq!(paths(&outcome.modules), vec!["alpha.out"]);
}
