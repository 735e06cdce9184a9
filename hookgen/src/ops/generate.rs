//! Generate operation - run the pipeline and write its modules.

use std::{path::Path, sync::Arc};

use eyre::{Context, Result};
use hookgen_core::{MemoryLogger, Module, WriteResult};
use hookgen_manifest::Manifest;
use hookgen_pipeline::{RunStatus, StageOutcome, StageRecord};

use crate::reports::{
    GenerateReport, GenerationResult, PreviewFile, PreviewResult, RunResult, StageLine,
    WrittenResult,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Path of the manifest, used to resolve relative paths in it.
    pub config_path: &'a Path,
    /// Output directory for generated files.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Files are only written when every stage completed.
pub async fn generate(manifest: &Manifest, opts: GenerateOptions<'_>) -> Result<GenerateReport> {
    let resource = super::load_resource(manifest, opts.config_path);
    let logger = Arc::new(MemoryLogger::new());
    let pipeline = super::build_pipeline(manifest, &resource, Some(logger.clone()))
        .wrap_err("Failed to build the pipeline")?;

    let (run, stages, modules) = match pipeline.run(resource).await {
        Ok(outcome) => {
            let run = match outcome.status {
                RunStatus::Completed => RunResult::Completed,
                RunStatus::Aborted { stage, message } => RunResult::Aborted { stage, message },
            };
            (run, outcome.stages, outcome.modules)
        }
        Err(mut failure) => {
            let stages = std::mem::take(&mut failure.stages);
            let modules = std::mem::take(&mut failure.modules);
            let run = RunResult::Failed {
                stage: failure.stage,
                diagnostic: format!("{:?}", miette::Report::new(failure)),
            };
            (run, stages, modules)
        }
    };

    let result = match (&run, opts.dry_run) {
        (RunResult::Completed, true) => GenerationResult::Preview(preview(&modules)),
        (RunResult::Completed, false) => {
            GenerationResult::Written(write(&modules, opts.output_dir)?)
        }
        _ => GenerationResult::Discarded {
            modules: modules.len(),
        },
    };

    Ok(GenerateReport {
        service_name: manifest.service.name.clone(),
        service_version: manifest.service.version.to_string(),
        service_description: manifest.service.description.clone(),
        stages: stages.iter().map(stage_line).collect(),
        build_log: logger.records(),
        run,
        result,
    })
}

fn stage_line(record: &StageRecord) -> StageLine {
    let outcome = match record.outcome {
        StageOutcome::Completed {
            default_skipped: false,
        } => "completed".to_string(),
        StageOutcome::Completed {
            default_skipped: true,
        } => "completed, default skipped".to_string(),
        StageOutcome::Aborted { at } => format!("aborted at {}", at),
    };
    StageLine {
        stage: record.stage,
        outcome,
    }
}

fn preview(modules: &[Module]) -> PreviewResult {
    PreviewResult {
        files: modules
            .iter()
            .map(|m| PreviewFile {
                path: m.path().to_string(),
                content: m.code().to_string(),
            })
            .collect(),
    }
}

fn write(modules: &[Module], output_dir: &Path) -> Result<WrittenResult> {
    // Refuse the whole batch before any file is touched.
    for module in modules {
        module.full_path(output_dir)?;
    }
    let mut written = Vec::new();
    let mut unchanged = 0;
    for module in modules {
        match module.write(output_dir)? {
            WriteResult::Written => written.push(module.path().to_string()),
            WriteResult::Unchanged => unchanged += 1,
        }
    }
    tracing::info!(written = written.len(), unchanged, "wrote modules");
    Ok(WrittenResult {
        output_dir: output_dir.to_path_buf(),
        written,
        unchanged,
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use tempfile::TempDir;

    use super::*;

    const MANIFEST: &str = r#"
[service]
name = "shop"

[entities.Order.fields]
id = "id"
total = "float"

[[plugins]]
name = "no-docker"
"#;

    fn options<'a>(config: &'a Path, output: &'a Path, dry_run: bool) -> GenerateOptions<'a> {
        GenerateOptions {
            config_path: config,
            output_dir: output,
            dry_run,
        }
    }

    #[tokio::test]
    async fn test_generate_writes_files() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let config = temp.path().join("hookgen.toml");

        let report = generate(&manifest, options(&config, temp.path(), false))
            .await
            .unwrap();

        assert!(report.is_completed());
        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written result");
        };
        assert!(written.written.contains(&"server/src/order/order.module.ts".to_string()));
        assert!(temp.path().join("server/src/main.ts").is_file());
        assert!(!temp.path().join("server/docker-compose.yml").exists());

        // second run leaves everything in place
        let again = generate(&manifest, options(&config, temp.path(), false))
            .await
            .unwrap();
        let GenerationResult::Written(written) = &again.result else {
            panic!("expected written result");
        };
        assert!(written.written.is_empty());
        assert!(written.unchanged > 0);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let config = temp.path().join("hookgen.toml");

        let report = generate(&manifest, options(&config, temp.path(), true))
            .await
            .unwrap();

        assert!(matches!(report.result, GenerationResult::Preview(ref p) if !p.files.is_empty()));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_abort_discards_output() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(
            "[service]\nname = \"shop\"\n\n[[plugins]]\nname = \"require-entities\"\n",
        )
        .unwrap();
        let config = temp.path().join("hookgen.toml");

        let report = generate(&manifest, options(&config, temp.path(), false))
            .await
            .unwrap();

        assert!(!report.is_completed());
        assert!(matches!(
            report.run,
            RunResult::Aborted { stage: "CreateServer", ref message } if message == "no entities defined"
        ));
        assert!(matches!(report.result, GenerationResult::Discarded { modules: 0 }));
        assert_eq!(report.stages[0].outcome, "aborted at default-check");
    }

    #[tokio::test]
    async fn test_failure_reports_diagnostic() {
        let temp = TempDir::new().unwrap();
        let mut manifest = Manifest::from_str(MANIFEST).unwrap();
        manifest.generation.static_dir = Some("missing".into());
        let config = temp.path().join("hookgen.toml");

        let report = generate(&manifest, options(&config, temp.path(), false))
            .await
            .unwrap();

        let RunResult::Failed { stage, diagnostic } = &report.run else {
            panic!("expected failure");
        };
        assert_eq!(*stage, "LoadStaticFiles");
        assert!(diagnostic.contains("LoadStaticFiles"));
        // CreateServer had completed
        assert!(matches!(report.result, GenerationResult::Discarded { modules: 1 }));
    }

    #[test]
    fn test_escaping_module_blocks_whole_write() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let modules = vec![
            Module::new("server/.env", "PORT=3000\n"),
            Module::new("../outside.txt", "x"),
        ];

        let err = write(&modules, &out).unwrap_err();

        assert!(err.to_string().contains("../outside.txt"));
        assert!(!out.join("server/.env").exists());
        assert!(!temp.path().join("outside.txt").exists());
    }
}
