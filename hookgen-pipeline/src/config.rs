use std::time::Duration;

use hookgen_manifest::GenerationSettings;

/// Run-time settings of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound for a single hook invocation. `None` waits indefinitely.
    pub hook_timeout: Option<Duration>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout = Some(timeout);
        self
    }
}

impl From<&GenerationSettings> for PipelineConfig {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            hook_timeout: settings.hook_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = GenerationSettings {
            static_dir: None,
            hook_timeout_ms: Some(250),
        };
        assert_eq!(
            PipelineConfig::from(&settings),
            PipelineConfig::new().with_hook_timeout(Duration::from_millis(250))
        );
        assert_eq!(PipelineConfig::from(&GenerationSettings::default()).hook_timeout, None);
    }
}
