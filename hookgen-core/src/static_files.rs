//! Static module import.
//!
//! Some stages seed their output from files shipped alongside the generator
//! rather than from generation logic. An importer turns a source directory
//! into modules rooted at a base path.

use std::path::Path;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use walkdir::WalkDir;

use crate::Module;

/// Capability that loads static files as modules.
#[async_trait]
pub trait StaticModuleImporter: Send + Sync {
    /// Import every file under `source` as a module whose path is the file's
    /// path relative to `source`, prefixed with `base_path`.
    ///
    /// Modules are returned in a deterministic order.
    async fn import(&self, source: &Path, base_path: &str) -> Result<Vec<Module>>;
}

/// Importer that reads static files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStaticImporter;

#[async_trait]
impl StaticModuleImporter for FsStaticImporter {
    async fn import(&self, source: &Path, base_path: &str) -> Result<Vec<Module>> {
        if !source.is_dir() {
            return Err(eyre!(
                "static source '{}' is not a directory",
                source.display()
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.wrap_err_with(|| format!("failed to walk '{}'", source.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        let mut modules = Vec::with_capacity(files.len());
        for file in files {
            let relative = file.strip_prefix(source).wrap_err("static file outside source")?;
            let code = tokio::fs::read_to_string(&file)
                .await
                .wrap_err_with(|| format!("failed to read '{}'", file.display()))?;
            modules.push(Module::new(join_module_path(base_path, relative), code));
        }

        tracing::debug!(
            source = %source.display(),
            count = modules.len(),
            "imported static modules"
        );
        Ok(modules)
    }
}

/// Join a base path and a relative file path using `/` separators.
fn join_module_path(base_path: &str, relative: &Path) -> String {
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        relative
    } else {
        format!("{}/{}", base, relative)
    }
}
