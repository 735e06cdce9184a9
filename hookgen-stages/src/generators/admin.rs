//! Admin UI stage.

use async_trait::async_trait;
use eyre::Result;
use hookgen_core::{Module, to_kebab_case};
use hookgen_pipeline::{GenerationContext, StageGenerator};

use crate::{CodeWriter, events::CreateAdminUI, params::AdminUiParams};

/// `CreateAdminUI`: a react-admin app with one resource per entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminUiGenerator;

#[async_trait]
impl StageGenerator<CreateAdminUI> for AdminUiGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<AdminUiParams> {
        Ok(AdminUiParams {
            directory: ctx.directories().admin.clone(),
            title: ctx.service().name.clone(),
            entities: ctx.entities().keys().cloned().collect(),
        })
    }

    async fn generate(&self, ctx: &GenerationContext, params: &AdminUiParams) -> Result<Vec<Module>> {
        let code = CodeWriter::new()
            .line(r#"import { Admin, ListGuesser, Resource } from "react-admin";"#)
            .line(r#"import simpleRestProvider from "ra-data-simple-rest";"#)
            .blank()
            .line(r#"const dataProvider = simpleRestProvider("/api");"#)
            .blank()
            .block_with_close("export const App = () => (", ");", |w| {
                w.line(&format!(
                    "<Admin title={:?} dataProvider={{dataProvider}}>",
                    params.title
                ))
                .indent()
                .each(&params.entities, |w, entity| {
                    w.line(&format!(
                        r#"<Resource name="{}s" options={{{{ label: "{}" }}}} list={{ListGuesser}} />"#,
                        to_kebab_case(entity),
                        entity
                    ))
                })
                .dedent()
                .line("</Admin>")
            })
            .build();
        let path = ctx.directories().admin_path("src/App.tsx");
        Ok(vec![Module::new(path, code)])
    }
}
