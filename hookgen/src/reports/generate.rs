//! Generate command report data structures.

use std::path::PathBuf;

use hookgen_core::{LogLevel, LogRecord};

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Service name from manifest.
    pub service_name: String,

    /// Service version from manifest.
    pub service_version: String,

    /// Service description from manifest.
    pub service_description: Option<String>,

    /// Outcome of every stage that ran.
    pub stages: Vec<StageLine>,

    /// Entries hooks and generators wrote to the build log.
    pub build_log: Vec<LogRecord>,

    /// How the run ended.
    pub run: RunResult,

    /// What happened to the generated modules.
    pub result: GenerationResult,
}

impl GenerateReport {
    pub fn is_completed(&self) -> bool {
        matches!(self.run, RunResult::Completed)
    }
}

/// One stage of the run.
#[derive(Debug)]
pub struct StageLine {
    pub stage: &'static str,
    pub outcome: String,
}

/// How the run ended.
#[derive(Debug)]
pub enum RunResult {
    Completed,
    /// A hook aborted the run.
    Aborted { stage: &'static str, message: String },
    /// A hook or default behavior failed; `diagnostic` is the rendered report.
    Failed {
        stage: &'static str,
        diagnostic: String,
    },
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
    /// The run did not complete; its modules were not written.
    Discarded { modules: usize },
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Paths of files whose content changed.
    pub written: Vec<String>,
    /// Number of files that already had identical content.
    pub unchanged: usize,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if let GenerationResult::Preview(preview) = &self.result {
            self.render_preview(out, preview);
            return;
        }

        out.preformatted(&format!("{} v{}", self.service_name, self.service_version));
        if let Some(desc) = &self.service_description {
            out.preformatted(desc);
        }
        out.newline();

        out.section(&format!("Stages ({})", self.stages.len()));
        for line in &self.stages {
            out.list_item(&format!("{}: {}", line.stage, line.outcome));
        }

        self.render_build_log(out);

        out.newline();
        match &self.run {
            RunResult::Completed => {}
            RunResult::Aborted { stage, message } => {
                out.warning(&format!("generation aborted in {}: {}", stage, message));
            }
            RunResult::Failed { stage, diagnostic } => {
                out.error(&format!("error: stage {} failed", stage));
                out.error(diagnostic);
            }
        }

        match &self.result {
            GenerationResult::Written(written) => {
                out.key_value(
                    "Generated",
                    &format!(
                        "{} ({} written, {} unchanged)",
                        written.output_dir.display(),
                        written.written.len(),
                        written.unchanged
                    ),
                );
                for path in &written.written {
                    out.added_item(path);
                }
            }
            GenerationResult::Discarded { modules } => {
                out.preformatted(&format!("Nothing written ({} modules discarded)", modules));
            }
            GenerationResult::Preview(_) => {}
        }
    }
}

impl GenerateReport {
    fn render_build_log(&self, out: &mut dyn Output) {
        if self.build_log.is_empty() {
            return;
        }
        out.newline();
        out.section("Build log");
        for record in &self.build_log {
            let line = format!("{}: {}", record.level, record.user_facing());
            match record.level {
                LogLevel::Info => out.list_item(&line),
                LogLevel::Warn | LogLevel::Error => out.warning(record.user_facing()),
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report(run: RunResult, result: GenerationResult) -> GenerateReport {
        GenerateReport {
            service_name: "shop".into(),
            service_version: "0.1.0".into(),
            service_description: None,
            stages: vec![StageLine {
                stage: "CreateServer",
                outcome: "aborted at default-check".into(),
            }],
            build_log: vec![
                LogRecord::new(LogLevel::Warn, "seed skipped").with_user_message(Some("No seed")),
            ],
            run,
            result,
        }
    }

    #[test]
    fn test_render_aborted() {
        let mut out = RecordingOutput::default();
        report(
            RunResult::Aborted {
                stage: "CreateServer",
                message: "no entities defined".into(),
            },
            GenerationResult::Discarded { modules: 0 },
        )
        .render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "shop v0.1.0",
                "",
                "Stages (1):",
                "  - CreateServer: aborted at default-check",
                "",
                "Build log:",
                "warning: No seed",
                "",
                "warning: generation aborted in CreateServer: no entities defined",
                "Nothing written (0 modules discarded)",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let mut out = RecordingOutput::default();
        let preview = PreviewResult {
            files: vec![PreviewFile {
                path: "server/.env".into(),
                content: "PORT=3000".into(),
            }],
        };
        report(RunResult::Completed, GenerationResult::Preview(preview)).render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "── server/.env ──",
                "PORT=3000",
                "── Summary ──",
                "1 files would be generated"
            ]
        );
    }
}
