use hookgen_core::Version;
use serde::Deserialize;

/// Service metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service name, used for package names and titles
    pub name: String,

    /// Version
    #[serde(default = "default_version")]
    pub version: Version,

    /// Human-readable description
    pub description: Option<String>,
}

fn default_version() -> Version {
    Version::new(0, 1, 0)
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            description: None,
        }
    }
}

/// Output directory layout, relative to the generation root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Directories {
    /// Server code directory
    #[serde(default = "default_server_dir")]
    pub server: String,

    /// Admin UI directory
    #[serde(default = "default_admin_dir")]
    pub admin: String,
}

fn default_server_dir() -> String {
    "server".to_string()
}

fn default_admin_dir() -> String {
    "admin-ui".to_string()
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            server: default_server_dir(),
            admin: default_admin_dir(),
        }
    }
}

impl Directories {
    /// Join a path under the server directory.
    pub fn server_path(&self, relative: &str) -> String {
        join(&self.server, relative)
    }

    /// Join a path under the admin UI directory.
    pub fn admin_path(&self, relative: &str) -> String {
        join(&self.admin, relative)
    }
}

fn join(dir: &str, relative: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        relative.to_string()
    } else {
        format!("{}/{}", dir, relative)
    }
}

/// Message broker settings (enables the broker stages)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageBrokerConfig {
    /// Topic names the service publishes to or consumes from
    #[serde(default)]
    pub topics: Vec<String>,
}
