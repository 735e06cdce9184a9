//! Check operation - manifest validation and hook summary.

use std::path::Path;

use eyre::{Context, Result};
use hookgen_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Builds the pipeline, which loads every plugin, and summarizes the hooks
/// they registered.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let resource = super::load_resource(manifest, config_path);
    let pipeline = super::build_pipeline(manifest, &resource, None)
        .wrap_err("Failed to load plugins")?;

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        service_name: manifest.service.name.clone(),
        service_version: manifest.service.version.to_string(),
        entity_count: manifest.entities.len(),
        stage_count: pipeline.stage_names().len(),
        plugins: manifest
            .enabled_plugins()
            .map(|p| format!("{} {}", p.name, p.version))
            .collect(),
        hooks: pipeline.hooks().summary(),
    })
}
