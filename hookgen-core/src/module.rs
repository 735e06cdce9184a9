use std::path::{Component, Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};

/// One generated output unit.
///
/// A module names its destination path (relative to the output directory)
/// and carries the generated code plus an optional source map. Modules are
/// immutable: hooks that want a different module build a new one and return
/// it in place of the old.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    path: String,
    code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_map: Option<String>,
}

/// Explicit serialization of a [`Module`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintResult {
    /// The printed code.
    pub code: String,
    /// The source map, as JSON text, when the generator produced one.
    pub map: Option<String>,
}

/// Result of writing a module to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content
    Unchanged,
}

impl Module {
    /// Create a module with the given destination path and code.
    pub fn new(path: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            source_map: None,
        }
    }

    /// Return a copy of this module carrying the given source map.
    pub fn with_source_map(mut self, map: impl Into<String>) -> Self {
        self.source_map = Some(map.into());
        self
    }

    /// Return a copy of this module with its code replaced.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Destination path, relative to the output directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Generated code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Source map as JSON text, if any.
    pub fn source_map(&self) -> Option<&str> {
        self.source_map.as_deref()
    }

    /// Print the module into its code and optional source map.
    pub fn print(&self) -> PrintResult {
        PrintResult {
            code: self.code.clone(),
            map: self.source_map.clone(),
        }
    }

    /// Full path of this module under `base`.
    ///
    /// Fails if the module path is absolute or climbs out of `base`.
    pub fn full_path(&self, base: &Path) -> Result<PathBuf> {
        let relative = Path::new(&self.path);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(eyre!(
                        "module path '{}' must stay inside the output directory",
                        self.path
                    ));
                }
            }
        }
        Ok(base.join(relative))
    }

    /// Write the module under `base`, plus a sibling `.map` file when a
    /// source map is present.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.full_path(base)?;
        let printed = self.print();

        if let Some(map) = &printed.map {
            let mut map_path = path.clone().into_os_string();
            map_path.push(".map");
            write_file(Path::new(&map_path), map)?;
        }

        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == printed.code) {
            return Ok(WriteResult::Unchanged);
        }

        write_file(&path, &printed.code)?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_print_without_map() {
        let module = Module::new("server/.env", "PORT=3000\n");
        let printed = module.print();

        assert_eq!(printed.code, "PORT=3000\n");
        assert!(printed.map.is_none());
    }

    #[test]
    fn test_with_source_map_keeps_original() {
        let original = Module::new("a.ts", "export {};\n");
        let mapped = original.clone().with_source_map("{\"version\":3}");

        assert!(original.source_map().is_none());
        assert_eq!(mapped.source_map(), Some("{\"version\":3}"));
        assert_eq!(mapped.path(), "a.ts");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let module = Module::new("server/src/user/user.service.ts", "export class UserService {}\n");

        let result = module.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        let written = fs::read_to_string(temp.path().join("server/src/user/user.service.ts")).unwrap();
        assert_eq!(written, "export class UserService {}\n");
    }

    #[test]
    fn test_write_unchanged_content() {
        let temp = TempDir::new().unwrap();
        let module = Module::new("README.md", "# orders\n");

        assert_eq!(module.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(module.write(temp.path()).unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "old").unwrap();

        let result = Module::new("a.txt", "new").write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "new");
    }

    #[test]
    fn test_write_source_map_sibling() {
        let temp = TempDir::new().unwrap();
        let module = Module::new("dist/app.js", "console.log(1);\n").with_source_map("{}");

        module.write(temp.path()).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("dist/app.js.map")).unwrap(), "{}");
    }

    #[test]
    fn test_write_rejects_absolute_path() {
        let out = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let target = elsewhere.path().join("escaped.txt");

        let err = Module::new(target.to_string_lossy(), "x")
            .write(out.path())
            .unwrap_err();

        assert!(err.to_string().contains("escaped.txt"));
        assert!(!target.exists());
    }

    #[test]
    fn test_write_rejects_parent_segments() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let result = Module::new("server/../../sibling.txt", "x").write(&out);

        assert!(result.is_err());
        assert!(!temp.path().join("sibling.txt").exists());
    }

    #[test]
    fn test_full_path_allows_current_dir_segments() {
        let module = Module::new("./server/src/main.ts", "");
        let path = module.full_path(Path::new("out")).unwrap();

        assert_eq!(path, Path::new("out").join("./server/src/main.ts"));
    }
}
