use eyre::{Result, eyre};
use hookgen_pipeline::{Events, Plugin};
use indexmap::IndexMap;

use crate::events::CreateServerDotEnv;

/// Adds the plugin's `settings` to the server `.env` file.
///
/// String values are used as is; numbers and booleans are rendered with
/// their TOML representation.
#[derive(Debug, Clone, Default)]
pub struct DotEnvVars {
    vars: IndexMap<String, String>,
}

impl DotEnvVars {
    pub fn new(vars: IndexMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn from_settings(settings: &toml::Table) -> Result<Self> {
        let mut vars = IndexMap::new();
        for (key, value) in settings {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(_) | toml::Value::Float(_) | toml::Value::Boolean(_) => {
                    value.to_string()
                }
                other => {
                    return Err(eyre!(
                        "dotenv-vars: '{}' must be a string, number or boolean, got {}",
                        key,
                        other.type_str()
                    ));
                }
            };
            vars.insert(key.clone(), value);
        }
        Ok(Self { vars })
    }
}

impl Plugin for DotEnvVars {
    fn register(&self) -> Events {
        let vars = self.vars.clone();
        Events::new().before_fn::<CreateServerDotEnv, _>(move |_ctx, mut params| {
            for (key, value) in &vars {
                params.env_variables.insert(key.clone(), value.clone());
            }
            Ok(params)
        })
    }
}
