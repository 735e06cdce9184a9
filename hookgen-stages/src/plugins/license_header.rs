use std::sync::Arc;

use async_trait::async_trait;
use eyre::{Result, eyre};
use hookgen_core::{Module, Version};
use hookgen_pipeline::{AfterHook, Events, GenerationContext, Plugin};

use crate::{
    events::{CreateEntityController, CreateEntityService},
    generators::{EntityFile, Names},
};

/// Prepends a comment header to the entity service and controller files.
///
/// The header comes from the `header` setting; each line becomes a `//`
/// comment. Files that already start with it are left alone.
#[derive(Debug, Clone, Default)]
pub struct LicenseHeader {
    header: Option<String>,
}

impl LicenseHeader {
    pub fn new(header: Option<&str>) -> Self {
        Self {
            header: header.map(str::to_owned),
        }
    }
}

impl Plugin for LicenseHeader {
    fn init(&mut self, name: &str, _version: &Version) -> Result<()> {
        match &self.header {
            Some(header) if !header.trim().is_empty() => Ok(()),
            _ => Err(eyre!("plugin '{}' requires a non-empty 'header' setting", name)),
        }
    }

    fn register(&self) -> Events {
        let hook = HeaderHook {
            comment: Arc::from(render_comment(self.header.as_deref().unwrap_or_default())),
        };
        Events::new()
            .after::<CreateEntityService>(hook.clone())
            .after::<CreateEntityController>(hook)
    }
}

fn render_comment(header: &str) -> String {
    header
        .lines()
        .map(|line| {
            if line.is_empty() {
                "//\n".to_string()
            } else {
                format!("// {}\n", line)
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
struct HeaderHook {
    comment: Arc<str>,
}

#[async_trait]
impl<S: EntityFile> AfterHook<S> for HeaderHook {
    async fn after(
        &self,
        ctx: &mut GenerationContext,
        params: &S::Params,
        modules: Vec<Module>,
    ) -> Result<Vec<Module>> {
        let names = Names::new(&params.entity_name);
        let target = format!("{}/{}", params.directory, S::file_name(&names.kebab));
        let mut stamped = 0;
        let modules = modules
            .into_iter()
            .map(|module| {
                let applies =
                    module.path() == target && !module.code().starts_with(&*self.comment);
                if applies {
                    stamped += 1;
                    let code = format!("{}{}", self.comment, module.code());
                    module.with_code(code)
                } else {
                    module
                }
            })
            .collect();

        if stamped > 0 {
            ctx.logger()
                .info(
                    &format!("added license header to {}", target),
                    None,
                    None,
                )
                .await?;
        }
        Ok(modules)
    }
}
