//! Build log capability.
//!
//! Hooks and generators report progress through a [`BuildLogger`] carried by
//! the generation context. Every entry has an internal message, optional
//! structured parameters that never reach the user, and an optional
//! user-facing message shown in the build log instead of the internal one.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use eyre::Result;
use serde::Serialize;

/// Structured parameters attached to a log entry.
pub type LogParams = serde_json::Map<String, serde_json::Value>;

/// Severity of a build log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warning"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// A single build log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Internal message.
    pub message: String,
    /// Internal parameters, not displayed in the build log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<LogParams>,
    /// User-facing message. Falls back to `message` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    /// Rendered error chain, for error entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            params: None,
            user_message: None,
            error: None,
        }
    }

    pub fn with_params(mut self, params: Option<LogParams>) -> Self {
        self.params = params;
        self
    }

    pub fn with_user_message(mut self, user_message: Option<&str>) -> Self {
        self.user_message = user_message.map(str::to_owned);
        self
    }

    pub fn with_error(mut self, error: Option<&(dyn std::error::Error + Send + Sync)>) -> Self {
        self.error = error.map(render_error_chain);
        self
    }

    /// The message to show in the user-facing build log.
    pub fn user_facing(&self) -> &str {
        self.user_message.as_deref().unwrap_or(&self.message)
    }
}

fn render_error_chain(error: &(dyn std::error::Error + Send + Sync)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// Logger capability available to hooks and generators.
///
/// Implementors only provide [`log`](BuildLogger::log); the level-specific
/// methods build the record.
#[async_trait]
pub trait BuildLogger: Send + Sync {
    /// Record a fully built entry.
    async fn log(&self, record: LogRecord) -> Result<()>;

    /// Log an info message.
    async fn info(
        &self,
        message: &str,
        params: Option<LogParams>,
        user_message: Option<&str>,
    ) -> Result<()> {
        let record = LogRecord::new(LogLevel::Info, message)
            .with_params(params)
            .with_user_message(user_message);
        self.log(record).await
    }

    /// Log a warning message.
    async fn warn(
        &self,
        message: &str,
        params: Option<LogParams>,
        user_message: Option<&str>,
    ) -> Result<()> {
        let record = LogRecord::new(LogLevel::Warn, message)
            .with_params(params)
            .with_user_message(user_message);
        self.log(record).await
    }

    /// Log an error message, optionally with the error that caused it.
    async fn error(
        &self,
        message: &str,
        params: Option<LogParams>,
        user_message: Option<&str>,
        error: Option<&(dyn std::error::Error + Send + Sync)>,
    ) -> Result<()> {
        let record = LogRecord::new(LogLevel::Error, message)
            .with_params(params)
            .with_user_message(user_message)
            .with_error(error);
        self.log(record).await
    }
}

/// Logger that forwards build log entries to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[async_trait]
impl BuildLogger for TracingLogger {
    async fn log(&self, record: LogRecord) -> Result<()> {
        let user = record.user_facing();
        let params = record.params.as_ref().map(|p| serde_json::Value::Object(p.clone()));
        match record.level {
            LogLevel::Info => {
                tracing::info!(target: "hookgen::build", user, ?params, "{}", record.message)
            }
            LogLevel::Warn => {
                tracing::warn!(target: "hookgen::build", user, ?params, "{}", record.message)
            }
            LogLevel::Error => tracing::error!(
                target: "hookgen::build",
                user,
                ?params,
                error = record.error.as_deref(),
                "{}",
                record.message
            ),
        }
        Ok(())
    }
}

/// Logger that keeps every entry in memory.
///
/// Used by the CLI to render the build log after a run, and by tests to
/// assert on what hooks reported.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries recorded so far, in order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl BuildLogger for MemoryLogger {
    async fn log(&self, record: LogRecord) -> Result<()> {
        tracing::debug!(target: "hookgen::build", level = %record.level, "{}", record.message);
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        Ok(())
    }
}
