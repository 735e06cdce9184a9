use std::{path::PathBuf, time::Duration};

use hookgen_core::Version;
use serde::Deserialize;

/// `[generation]` settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationSettings {
    /// Directory of static server files imported by `LoadStaticFiles`,
    /// relative to the manifest
    pub static_dir: Option<PathBuf>,

    /// Per-hook timeout in milliseconds; unset means hooks may run indefinitely
    pub hook_timeout_ms: Option<u64>,
}

impl GenerationSettings {
    pub fn hook_timeout(&self) -> Option<Duration> {
        self.hook_timeout_ms.map(Duration::from_millis)
    }
}

/// A `[[plugins]]` entry. Plugins load in the order they are listed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginSpec {
    pub name: String,

    #[serde(default = "default_plugin_version")]
    pub version: Version,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Plugin-specific settings, passed through untouched
    #[serde(default)]
    pub settings: toml::Table,
}

fn default_plugin_version() -> Version {
    Version::new(0, 0, 0)
}

fn default_enabled() -> bool {
    true
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_plugin_version(),
            enabled: true,
            settings: toml::Table::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// String setting lookup.
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(toml::Value::as_str)
    }
}
