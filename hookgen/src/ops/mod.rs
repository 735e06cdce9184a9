//! Core operations.
//!
//! This module contains the business logic for hookgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

use std::{path::Path, sync::Arc};

use eyre::Result;
use hookgen_core::BuildLogger;
use hookgen_manifest::{Manifest, ResourceData};
use hookgen_pipeline::{Pipeline, PipelineConfig};

pub use check::check;
pub use generate::{GenerateOptions, generate};

/// Build the run input, resolving a relative static directory against the
/// manifest's directory.
pub fn load_resource(manifest: &Manifest, config_path: &Path) -> ResourceData {
    let mut resource = manifest.resource();
    if let Some(dir) = resource.static_dir.take() {
        let resolved = match config_path.parent() {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        };
        resource.static_dir = Some(resolved);
    }
    resource
}

/// Build the standard pipeline for `resource` with the manifest's plugins.
pub fn build_pipeline(
    manifest: &Manifest,
    resource: &ResourceData,
    logger: Option<Arc<dyn BuildLogger>>,
) -> Result<Pipeline> {
    let mut builder = hookgen_stages::with_plugins(
        hookgen_stages::standard_pipeline(resource),
        manifest.enabled_plugins(),
    )?
    .config(PipelineConfig::from(&manifest.generation));
    if let Some(logger) = logger {
        builder = builder.logger(logger);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, str::FromStr};

    use super::*;

    #[test]
    fn test_static_dir_relative_to_manifest() {
        let manifest = Manifest::from_str(
            "[service]\nname = \"shop\"\n\n[generation]\nstatic_dir = \"static/server\"\n",
        )
        .unwrap();

        let resource = load_resource(&manifest, Path::new("project/hookgen.toml"));
        assert_eq!(
            resource.static_dir,
            Some(PathBuf::from("project/static/server"))
        );
    }

    #[test]
    fn test_absolute_static_dir_kept() {
        let manifest = Manifest::from_str(
            "[service]\nname = \"shop\"\n\n[generation]\nstatic_dir = \"/srv/static\"\n",
        )
        .unwrap();

        let resource = load_resource(&manifest, Path::new("hookgen.toml"));
        assert_eq!(resource.static_dir, Some(PathBuf::from("/srv/static")));
    }

    #[test]
    fn test_build_pipeline_rejects_unknown_plugin() {
        let manifest = Manifest::from_str(
            "[service]\nname = \"shop\"\n\n[[plugins]]\nname = \"prettier\"\n",
        )
        .unwrap();
        let resource = manifest.resource();

        let err = build_pipeline(&manifest, &resource, None).unwrap_err();
        assert!(err.to_string().starts_with("unknown plugin 'prettier'"));
    }
}
