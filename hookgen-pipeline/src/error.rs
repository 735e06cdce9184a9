use std::{fmt, time::Duration};

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error carried as the source of hook and generator failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which chain of a stage a hook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::Before => write!(f, "before"),
            HookPhase::After => write!(f, "after"),
        }
    }
}

/// Errors raised while building or running a pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("stage name '{stage}' is claimed by both {existing} and {requested}")]
    #[diagnostic(
        code(hookgen::stage_conflict),
        help("every stage type needs a unique NAME")
    )]
    StageConflict {
        stage: &'static str,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("plugin '{plugin}' failed to initialize")]
    #[diagnostic(code(hookgen::plugin_init))]
    PluginInit {
        plugin: String,
        #[source]
        source: BoxError,
    },

    #[error("{phase}-hook #{index} of stage {stage} (plugin '{plugin}') failed")]
    #[diagnostic(
        code(hookgen::hook_failed),
        help("the error comes from the plugin; completed stages are kept")
    )]
    HookFailed {
        stage: &'static str,
        phase: HookPhase,
        index: usize,
        plugin: String,
        #[source]
        source: BoxError,
    },

    #[error("{phase}-hook #{index} of stage {stage} (plugin '{plugin}') timed out after {timeout:?}")]
    #[diagnostic(
        code(hookgen::hook_timed_out),
        help("raise [generation].hook_timeout_ms or remove it to wait indefinitely")
    )]
    HookTimedOut {
        stage: &'static str,
        phase: HookPhase,
        index: usize,
        plugin: String,
        timeout: Duration,
    },

    #[error("failed to compute parameters for stage {stage}")]
    #[diagnostic(code(hookgen::params_failed))]
    ParamsFailed {
        stage: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("default generation of stage {stage} failed")]
    #[diagnostic(code(hookgen::default_failed))]
    DefaultFailed {
        stage: &'static str,
        #[source]
        source: BoxError,
    },
}

impl PipelineError {
    /// The stage the error is attributed to, if any.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            PipelineError::StageConflict { stage, .. }
            | PipelineError::HookFailed { stage, .. }
            | PipelineError::HookTimedOut { stage, .. }
            | PipelineError::ParamsFailed { stage, .. }
            | PipelineError::DefaultFailed { stage, .. } => Some(stage),
            PipelineError::PluginInit { .. } => None,
        }
    }

    /// The hook position `(phase, index, plugin)` for hook errors.
    pub fn hook(&self) -> Option<(HookPhase, usize, &str)> {
        match self {
            PipelineError::HookFailed {
                phase,
                index,
                plugin,
                ..
            }
            | PipelineError::HookTimedOut {
                phase,
                index,
                plugin,
                ..
            } => Some((*phase, *index, plugin.as_str())),
            _ => None,
        }
    }
}
