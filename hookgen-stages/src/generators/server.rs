//! Server-wide stages: entry point, static files, package manifest, DTOs,
//! auth, swagger, app module, prisma schema and seed.

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use hookgen_core::{Module, to_camel_case, to_kebab_case, to_pascal_case};
use hookgen_manifest::FieldKind;
use hookgen_pipeline::{GenerationContext, StageGenerator};
use serde_json::{Map, Value, json};

use crate::{CodeWriter, events::*, params::*};

/// `CreateServer`: the server entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerGenerator;

#[async_trait]
impl StageGenerator<CreateServer> for ServerGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<ServerParams> {
        Ok(ServerParams {
            server_directory: ctx.directories().server.clone(),
            port: 3000,
        })
    }

    async fn generate(&self, ctx: &GenerationContext, params: &ServerParams) -> Result<Vec<Module>> {
        let code = CodeWriter::new()
            .line(r#"import { NestFactory } from "@nestjs/core";"#)
            .line(r#"import { AppModule } from "./app.module";"#)
            .blank()
            .line(&format!("const {{ PORT = {} }} = process.env;", params.port))
            .blank()
            .block_with_close("async function main() {", "}", |w| {
                w.line("const app = await NestFactory.create(AppModule, { cors: true });")
                    .line("await app.listen(PORT);")
            })
            .blank()
            .line("main();")
            .build();
        Ok(vec![Module::new(
            ctx.directories().server_path("src/main.ts"),
            code,
        )])
    }
}

/// `LoadStaticFiles`: imports the configured static directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFilesGenerator;

#[async_trait]
impl StageGenerator<LoadStaticFiles> for StaticFilesGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<StaticFilesParams> {
        Ok(StaticFilesParams {
            source: ctx.resource().static_dir.clone(),
            base_path: ctx.directories().server.clone(),
        })
    }

    async fn generate(
        &self,
        ctx: &GenerationContext,
        params: &StaticFilesParams,
    ) -> Result<Vec<Module>> {
        let Some(source) = &params.source else {
            tracing::debug!("no static directory configured");
            return Ok(Vec::new());
        };
        let modules = ctx
            .import_static_modules(source, &params.base_path)
            .await
            .wrap_err("failed to load static server files")?;
        ctx.logger()
            .info(
                &format!("loaded {} static files", modules.len()),
                None,
                None,
            )
            .await?;
        Ok(modules)
    }
}

/// `CreateServerPackageJson` and `CreateAdminUIPackageJson`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonGenerator;

#[async_trait]
impl StageGenerator<CreateServerPackageJson> for PackageJsonGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<PackageJsonParams> {
        Ok(PackageJsonParams {
            path: ctx.directories().server_path("package.json"),
            name: format!("@{}/server", to_kebab_case(&ctx.service().name)),
            version: ctx.service().version.to_string(),
            update_properties: vec![server_package_defaults()],
        })
    }

    async fn generate(
        &self,
        _ctx: &GenerationContext,
        params: &PackageJsonParams,
    ) -> Result<Vec<Module>> {
        render_package_json(params)
    }
}

#[async_trait]
impl StageGenerator<CreateAdminUIPackageJson> for PackageJsonGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<PackageJsonParams> {
        Ok(PackageJsonParams {
            path: ctx.directories().admin_path("package.json"),
            name: format!("@{}/admin", to_kebab_case(&ctx.service().name)),
            version: ctx.service().version.to_string(),
            update_properties: vec![admin_package_defaults()],
        })
    }

    async fn generate(
        &self,
        _ctx: &GenerationContext,
        params: &PackageJsonParams,
    ) -> Result<Vec<Module>> {
        render_package_json(params)
    }
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn server_package_defaults() -> Map<String, Value> {
    as_object(json!({
        "scripts": {
            "start": "nest start",
            "build": "nest build",
            "test": "jest"
        },
        "dependencies": {
            "@nestjs/common": "^10.0.0",
            "@nestjs/core": "^10.0.0",
            "@nestjs/swagger": "^7.0.0",
            "@prisma/client": "^5.0.0"
        }
    }))
}

fn admin_package_defaults() -> Map<String, Value> {
    as_object(json!({
        "scripts": {
            "start": "react-scripts start",
            "build": "react-scripts build"
        },
        "dependencies": {
            "react": "^18.0.0",
            "react-admin": "^4.0.0"
        }
    }))
}

fn render_package_json(params: &PackageJsonParams) -> Result<Vec<Module>> {
    let mut package = as_object(json!({
        "name": params.name,
        "version": params.version,
        "private": true
    }));
    for update in &params.update_properties {
        merge_json(&mut package, update);
    }
    let code = serde_json::to_string_pretty(&Value::Object(package))
        .wrap_err_with(|| format!("failed to serialize {}", params.path))?;
    Ok(vec![Module::new(&params.path, code + "\n")])
}

/// Deep-merge `update` into `target`. Objects merge key by key, `null`
/// removes a key, anything else replaces.
pub(crate) fn merge_json(target: &mut Map<String, Value>, update: &Map<String, Value>) {
    for (key, value) in update {
        match (target.get_mut(key), value) {
            (_, Value::Null) => {
                target.remove(key);
            }
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_json(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// `CreateDTOs`: one DTO file per entity plus a barrel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtosGenerator;

#[async_trait]
impl StageGenerator<CreateDTOs> for DtosGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<DtosParams> {
        Ok(DtosParams {
            dtos: ctx.dtos().clone(),
        })
    }

    async fn generate(&self, ctx: &GenerationContext, params: &DtosParams) -> Result<Vec<Module>> {
        let dir = ctx.directories().server_path("src/dto");
        let mut modules = Vec::with_capacity(params.dtos.len() + 1);
        let mut barrel = CodeWriter::new();

        for (name, dtos) in &params.dtos {
            let Some(entity) = ctx.entities().get(name) else {
                continue;
            };
            let file = to_kebab_case(name);
            barrel = barrel.line(&format!(r#"export * from "./{}.dto";"#, file));

            let fields: Vec<(String, String)> = entity
                .fields
                .iter()
                .map(|(field, spec)| {
                    let ts = match (spec.kind, spec.many) {
                        (FieldKind::Lookup, true) => "{ id: string }[]".to_string(),
                        (FieldKind::Lookup, false) => "{ id: string }".to_string(),
                        (kind, _) => kind.ts_type().to_string(),
                    };
                    let optional = if spec.required { "" } else { "?" };
                    (format!("{}{}", field, optional), ts)
                })
                .collect();

            let code = CodeWriter::new()
                .block_with_close(&format!("export interface {} {{", dtos.entity), "}", |w| {
                    w.each(&fields, |w, (field, ts)| w.line(&format!("{}: {};", field, ts)))
                })
                .blank()
                .line(&format!(
                    "export type {} = Omit<{}, \"id\">;",
                    dtos.create_input, dtos.entity
                ))
                .line(&format!(
                    "export type {} = Partial<{}>;",
                    dtos.update_input, dtos.create_input
                ))
                .line(&format!(
                    "export type {} = Partial<{}>;",
                    dtos.where_input, dtos.entity
                ))
                .line(&format!(
                    "export type {} = {{ id: string }};",
                    dtos.where_unique_input
                ))
                .line(&format!(
                    "export type {} = {{ [K in keyof {}]?: \"asc\" | \"desc\" }};",
                    dtos.order_by_input, dtos.entity
                ))
                .block_with_close(&format!("export interface {} {{", dtos.find_many_args), "}", |w| {
                    w.line(&format!("where?: {};", dtos.where_input))
                        .line(&format!("orderBy?: {}[];", dtos.order_by_input))
                        .line("skip?: number;")
                        .line("take?: number;")
                })
                .build();
            modules.push(Module::new(format!("{}/{}.dto.ts", dir, file), code));
        }

        modules.push(Module::new(format!("{}/index.ts", dir), barrel.build()));
        Ok(modules)
    }
}

/// `CreateServerAuth`: auth module and service built on the identity fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGenerator;

#[async_trait]
impl StageGenerator<CreateServerAuth> for AuthGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<AuthParams> {
        Ok(AuthParams {
            identity: ctx.identity().clone(),
            directory: ctx.directories().server_path("src/auth"),
        })
    }

    async fn generate(&self, _ctx: &GenerationContext, params: &AuthParams) -> Result<Vec<Module>> {
        let identity = &params.identity;
        let user = to_pascal_case(&identity.user_entity);
        let user_file = to_kebab_case(&identity.user_entity);
        let user_service = format!("{}Service", user);
        let user_service_var = to_camel_case(&user_service);

        let service = CodeWriter::new()
            .line(r#"import { Injectable } from "@nestjs/common";"#)
            .line(&format!(
                r#"import {{ {} }} from "../{}/{}.service";"#,
                user_service, user_file, user_file
            ))
            .blank()
            .line("@Injectable()")
            .block_with_close("export class AuthService {", "}", |w| {
                w.line(&format!(
                    "constructor(private readonly {}: {}) {{}}",
                    user_service_var, user_service
                ))
                .blank()
                .block_with_close(
                    "async validateUser(username: string, password: string) {",
                    "}",
                    |w| {
                        w.line(&format!(
                            "const user = await this.{}.findOne({{ {}: username }});",
                            user_service_var, identity.username_field
                        ))
                        .block_with_close(
                            &format!("if (user && user.{} === password) {{", identity.password_field),
                            "}",
                            |w| {
                                w.line(&format!(
                                    "return {{ username: user.{}, roles: user.{} }};",
                                    identity.username_field, identity.roles_field
                                ))
                            },
                        )
                        .line("return null;")
                    },
                )
            })
            .build();

        let module = CodeWriter::new()
            .line(r#"import { Module } from "@nestjs/common";"#)
            .line(r#"import { AuthService } from "./auth.service";"#)
            .line(&format!(
                r#"import {{ {}Module }} from "../{}/{}.module";"#,
                user, user_file, user_file
            ))
            .blank()
            .block_with_close("@Module({", "})", |w| {
                w.line(&format!("imports: [{}Module],", user))
                    .line("providers: [AuthService],")
                    .line("exports: [AuthService],")
            })
            .line("export class AuthModule {}")
            .build();

        Ok(vec![
            Module::new(format!("{}/auth.module.ts", params.directory), module),
            Module::new(format!("{}/auth.service.ts", params.directory), service),
        ])
    }
}

/// `CreateSwagger`: OpenAPI document options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerGenerator;

#[async_trait]
impl StageGenerator<CreateSwagger> for SwaggerGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<SwaggerParams> {
        let service = ctx.service();
        Ok(SwaggerParams {
            path: ctx.directories().server_path("src/swagger.ts"),
            title: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            version: service.version.to_string(),
        })
    }

    async fn generate(&self, _ctx: &GenerationContext, params: &SwaggerParams) -> Result<Vec<Module>> {
        let code = CodeWriter::new()
            .line(r#"import { DocumentBuilder } from "@nestjs/swagger";"#)
            .blank()
            .line(r#"export const swaggerPath = "api";"#)
            .blank()
            .line("export const swaggerDocumentOptions = new DocumentBuilder()")
            .indent()
            .line(&format!(".setTitle({:?})", params.title))
            .line(&format!(".setDescription({:?})", params.description))
            .line(&format!(".setVersion({:?})", params.version))
            .line(".build();")
            .build();
        Ok(vec![Module::new(&params.path, code)])
    }
}

/// `CreateServerAppModule`: root module importing every feature module.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppModuleGenerator;

#[async_trait]
impl StageGenerator<CreateServerAppModule> for AppModuleGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<AppModuleParams> {
        let mut modules: Vec<(String, String)> = ctx
            .entities()
            .keys()
            .map(|name| {
                let file = to_kebab_case(name);
                (
                    format!("{}Module", to_pascal_case(name)),
                    format!("./{}/{}.module", file, file),
                )
            })
            .collect();
        if ctx.resource().auth_enabled {
            modules.push(("AuthModule".into(), "./auth/auth.module".into()));
        }
        if ctx.resource().message_broker.is_some() {
            modules.push(("KafkaModule".into(), "./kafka/kafka.module".into()));
        }
        Ok(AppModuleParams {
            path: ctx.directories().server_path("src/app.module.ts"),
            modules,
        })
    }

    async fn generate(
        &self,
        _ctx: &GenerationContext,
        params: &AppModuleParams,
    ) -> Result<Vec<Module>> {
        let names: Vec<&str> = params.modules.iter().map(|(name, _)| name.as_str()).collect();
        let code = CodeWriter::new()
            .line(r#"import { Module } from "@nestjs/common";"#)
            .each(&params.modules, |w, (name, path)| {
                w.line(&format!(r#"import {{ {} }} from "{}";"#, name, path))
            })
            .blank()
            .block_with_close("@Module({", "})", |w| {
                w.line(&format!("imports: [{}],", names.join(", ")))
            })
            .line("export class AppModule {}")
            .build();
        Ok(vec![Module::new(&params.path, code)])
    }
}

/// `CreatePrismaSchema`: data model of every entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismaSchemaGenerator;

#[async_trait]
impl StageGenerator<CreatePrismaSchema> for PrismaSchemaGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<PrismaSchemaParams> {
        Ok(PrismaSchemaParams {
            path: ctx.directories().server_path("prisma/schema.prisma"),
            provider: "postgresql".into(),
            url_env: "DB_URL".into(),
            entities: ctx.entities().clone(),
        })
    }

    async fn generate(
        &self,
        _ctx: &GenerationContext,
        params: &PrismaSchemaParams,
    ) -> Result<Vec<Module>> {
        let mut writer = CodeWriter::new()
            .block_with_close("datasource db {", "}", |w| {
                w.line(&format!("provider = {:?}", params.provider))
                    .line(&format!("url      = env({:?})", params.url_env))
            })
            .blank()
            .block_with_close("generator client {", "}", |w| {
                w.line(r#"provider = "prisma-client-js""#)
            });

        for (name, entity) in &params.entities {
            writer = writer
                .blank()
                .block_with_close(&format!("model {} {{", name), "}", |w| {
                    w.each(&entity.fields, |w, (field, spec)| {
                        let optional = if spec.required { "" } else { "?" };
                        match (spec.kind, &spec.target) {
                            (FieldKind::Id, _) => {
                                w.line(&format!("{} String @id @default(cuid())", field))
                            }
                            (FieldKind::Lookup, Some(target)) if spec.many => {
                                w.line(&format!("{} {}[]", field, target))
                            }
                            (FieldKind::Lookup, Some(target)) => w
                                .line(&format!(
                                    "{} {}{} @relation(fields: [{}Id], references: [id])",
                                    field, target, optional, field
                                ))
                                .line(&format!("{}Id String{}", field, optional)),
                            (kind, _) => {
                                w.line(&format!("{} {}{}", field, kind.prisma_type(), optional))
                            }
                        }
                    })
                });
        }

        Ok(vec![Module::new(&params.path, writer.build())])
    }
}

/// `CreateSeed`: script creating an initial user.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedGenerator;

#[async_trait]
impl StageGenerator<CreateSeed> for SeedGenerator {
    fn params(&self, ctx: &GenerationContext) -> Result<SeedParams> {
        let user = ctx
            .resource()
            .user_entity()
            .map(|_| ctx.identity().clone());
        Ok(SeedParams {
            path: ctx.directories().server_path("scripts/seed.ts"),
            user,
            roles: vec!["user".into()],
        })
    }

    async fn generate(&self, ctx: &GenerationContext, params: &SeedParams) -> Result<Vec<Module>> {
        let Some(identity) = &params.user else {
            ctx.logger()
                .warn(
                    "seed skipped: no user entity",
                    None,
                    Some("Seed script was not generated because there is no user entity"),
                )
                .await?;
            return Ok(Vec::new());
        };
        let delegate = to_camel_case(&identity.user_entity);
        let roles: Vec<String> = params.roles.iter().map(|r| format!("{:?}", r)).collect();

        let code = CodeWriter::new()
            .line(r#"import { PrismaClient } from "@prisma/client";"#)
            .blank()
            .block_with_close("async function seed() {", "}", |w| {
                w.line("const client = new PrismaClient();")
                    .block_with_close(&format!("await client.{}.upsert({{", delegate), "});", |w| {
                        w.line(&format!(
                            r#"where: {{ {}: "admin" }},"#,
                            identity.username_field
                        ))
                        .line("update: {},")
                        .block_with_close("create: {", "},", |w| {
                            w.line(&format!(r#"{}: "admin","#, identity.username_field))
                                .line(&format!(r#"{}: "admin","#, identity.password_field))
                                .line(&format!("{}: [{}],", identity.roles_field, roles.join(", ")))
                        })
                    })
                    .line("await client.$disconnect();")
            })
            .blank()
            .line("seed();")
            .build();

        Ok(vec![Module::new(&params.path, code)])
    }
}
