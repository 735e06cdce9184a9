//! Built-in plugins, loaded by name from `[[plugins]]`.

mod dotenv_vars;
mod license_header;
mod no_docker;
mod require_entities;

use eyre::{Result, eyre};
use hookgen_manifest::PluginSpec;
use hookgen_pipeline::{PipelineBuilder, Plugin};

pub use dotenv_vars::DotEnvVars;
pub use license_header::LicenseHeader;
pub use no_docker::NoDocker;
pub use require_entities::RequireEntities;

/// Names accepted in `[[plugins]]`.
pub const BUILTIN_PLUGINS: &[&str] = &["dotenv-vars", "license-header", "no-docker", "require-entities"];

/// Instantiate the built-in plugin named by `spec`.
///
/// # Errors
///
/// Fails if no built-in plugin has that name or its settings are malformed.
pub fn builtin_plugin(spec: &PluginSpec) -> Result<Box<dyn Plugin>> {
    let plugin: Box<dyn Plugin> = match spec.name.as_str() {
        "dotenv-vars" => Box::new(DotEnvVars::from_settings(&spec.settings)?),
        "license-header" => Box::new(LicenseHeader::new(spec.setting_str("header"))),
        "no-docker" => Box::new(NoDocker),
        "require-entities" => Box::new(RequireEntities),
        other => {
            return Err(eyre!(
                "unknown plugin '{}', expected one of: {}",
                other,
                BUILTIN_PLUGINS.join(", ")
            ));
        }
    };
    Ok(plugin)
}

/// Add every plugin in `specs` to `builder`, in order.
pub fn with_plugins<'a>(
    mut builder: PipelineBuilder,
    specs: impl IntoIterator<Item = &'a PluginSpec>,
) -> Result<PipelineBuilder> {
    for spec in specs {
        let plugin = builtin_plugin(spec)?;
        tracing::debug!(plugin = %spec.name, version = %spec.version, "adding built-in plugin");
        builder = builder.boxed_plugin(&spec.name, spec.version.clone(), plugin);
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_plugin() {
        let err = builtin_plugin(&PluginSpec::new("prettier")).err().unwrap();

        assert_eq!(
            err.to_string(),
            "unknown plugin 'prettier', expected one of: dotenv-vars, license-header, no-docker, require-entities"
        );
    }

    #[test]
    fn test_every_builtin_loads() {
        for name in BUILTIN_PLUGINS {
            assert!(builtin_plugin(&PluginSpec::new(*name)).is_ok(), "{}", name);
        }
    }
}
