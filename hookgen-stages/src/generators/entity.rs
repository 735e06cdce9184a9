//! Per-entity stages.
//!
//! Each of these stages runs once per entity. The generator is constructed
//! with the entity name and derives the stage parameters from the context.

use std::{fmt, marker::PhantomData};

use async_trait::async_trait;
use eyre::{Result, eyre};
use hookgen_core::{Module, to_camel_case, to_kebab_case, to_pascal_case};
use hookgen_manifest::FieldSpec;
use hookgen_pipeline::{GenerationContext, Stage, StageGenerator};

use crate::{CodeWriter, events::*, params::*};

/// A file rendered from an entity's [`EntityParams`].
pub trait EntityFile: Stage<Params = EntityParams> {
    /// Path relative to the entity directory.
    fn file_name(kebab: &str) -> String;

    fn render(names: &Names, params: &EntityParams) -> String;
}

/// A file rendered from an entity's relation fields.
pub trait RelationFile: Stage<Params = RelationParams> {
    /// Path relative to the entity directory.
    fn file_name(kebab: &str) -> String;

    /// Relations this file covers.
    fn relations(params: &EntityParams) -> Vec<RelationField>;

    fn render(names: &Names, params: &RelationParams) -> String;
}

/// Derived identifiers for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// `OrderItem`
    pub pascal: String,
    /// `orderItem`
    pub camel: String,
    /// `order-item`
    pub kebab: String,
}

impl Names {
    pub fn new(entity: &str) -> Self {
        Self {
            pascal: to_pascal_case(entity),
            camel: to_camel_case(entity),
            kebab: to_kebab_case(entity),
        }
    }
}

fn entity_params(ctx: &GenerationContext, entity_name: &str) -> Result<EntityParams> {
    let entity = ctx
        .entities()
        .get(entity_name)
        .ok_or_else(|| eyre!("entity '{}' is not defined", entity_name))?;
    let dtos = ctx
        .dtos()
        .get(entity_name)
        .ok_or_else(|| eyre!("no DTOs derived for entity '{}'", entity_name))?;
    Ok(EntityParams {
        entity_name: entity_name.to_string(),
        entity: entity.clone(),
        dtos: dtos.clone(),
        directory: ctx
            .directories()
            .server_path(&format!("src/{}", to_kebab_case(entity_name))),
    })
}

/// Default behavior of the [`EntityFile`] stages.
pub struct EntityGenerator<S> {
    entity: String,
    _stage: PhantomData<fn() -> S>,
}

impl<S> EntityGenerator<S> {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            _stage: PhantomData,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl<S: Stage> fmt::Debug for EntityGenerator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityGenerator")
            .field("stage", &S::NAME)
            .field("entity", &self.entity)
            .finish()
    }
}

#[async_trait]
impl<S: EntityFile> StageGenerator<S> for EntityGenerator<S> {
    fn params(&self, ctx: &GenerationContext) -> Result<EntityParams> {
        entity_params(ctx, &self.entity)
    }

    async fn generate(&self, _ctx: &GenerationContext, params: &EntityParams) -> Result<Vec<Module>> {
        let names = Names::new(&params.entity_name);
        let path = format!("{}/{}", params.directory, S::file_name(&names.kebab));
        Ok(vec![Module::new(path, S::render(&names, params))])
    }
}

/// Default behavior of the [`RelationFile`] stages. Emits nothing for an
/// entity without matching relations.
pub struct RelationGenerator<S> {
    entity: String,
    _stage: PhantomData<fn() -> S>,
}

impl<S> RelationGenerator<S> {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            _stage: PhantomData,
        }
    }
}

impl<S: Stage> fmt::Debug for RelationGenerator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationGenerator")
            .field("stage", &S::NAME)
            .field("entity", &self.entity)
            .finish()
    }
}

#[async_trait]
impl<S: RelationFile> StageGenerator<S> for RelationGenerator<S> {
    fn params(&self, ctx: &GenerationContext) -> Result<RelationParams> {
        let params = entity_params(ctx, &self.entity)?;
        Ok(RelationParams {
            relations: S::relations(&params),
            entity_name: params.entity_name,
            directory: params.directory,
        })
    }

    async fn generate(
        &self,
        _ctx: &GenerationContext,
        params: &RelationParams,
    ) -> Result<Vec<Module>> {
        if params.relations.is_empty() {
            return Ok(Vec::new());
        }
        let names = Names::new(&params.entity_name);
        let path = format!("{}/{}", params.directory, S::file_name(&names.kebab));
        Ok(vec![Module::new(path, S::render(&names, params))])
    }
}

fn relation_fields<'a>(iter: impl Iterator<Item = (&'a str, &'a FieldSpec)>) -> Vec<RelationField> {
    iter.map(|(name, spec)| RelationField {
        name: name.to_string(),
        spec: spec.clone(),
    })
    .collect()
}

fn dto_import(dtos: &[&str]) -> String {
    format!(r#"import {{ {} }} from "../../dto";"#, dtos.join(", "))
}

impl EntityFile for CreateEntityModule {
    fn file_name(kebab: &str) -> String {
        format!("{}.module.ts", kebab)
    }

    fn render(n: &Names, _params: &EntityParams) -> String {
        CodeWriter::new()
            .line(r#"import { Module } from "@nestjs/common";"#)
            .line(&format!(
                r#"import {{ {}ModuleBase }} from "./base/{}.module.base";"#,
                n.pascal, n.kebab
            ))
            .line(&format!(r#"import {{ {}Service }} from "./{}.service";"#, n.pascal, n.kebab))
            .line(&format!(
                r#"import {{ {}Controller }} from "./{}.controller";"#,
                n.pascal, n.kebab
            ))
            .line(&format!(r#"import {{ {}Resolver }} from "./{}.resolver";"#, n.pascal, n.kebab))
            .blank()
            .block_with_close("@Module({", "})", |w| {
                w.line(&format!("imports: [{}ModuleBase],", n.pascal))
                    .line(&format!("controllers: [{}Controller],", n.pascal))
                    .line(&format!("providers: [{0}Service, {0}Resolver],", n.pascal))
                    .line(&format!("exports: [{}Service],", n.pascal))
            })
            .line(&format!("export class {}Module {{}}", n.pascal))
            .build()
    }
}

impl EntityFile for CreateEntityModuleBase {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.module.base.ts", kebab)
    }

    fn render(n: &Names, _params: &EntityParams) -> String {
        CodeWriter::new()
            .line(r#"import { Module } from "@nestjs/common";"#)
            .line(r#"import { PrismaModule } from "../../prisma/prisma.module";"#)
            .blank()
            .block_with_close("@Module({", "})", |w| {
                w.line("imports: [PrismaModule],")
                    .line("exports: [PrismaModule],")
            })
            .line(&format!("export class {}ModuleBase {{}}", n.pascal))
            .build()
    }
}

impl EntityFile for CreateEntityService {
    fn file_name(kebab: &str) -> String {
        format!("{}.service.ts", kebab)
    }

    fn render(n: &Names, _params: &EntityParams) -> String {
        CodeWriter::new()
            .line(r#"import { Injectable } from "@nestjs/common";"#)
            .line(r#"import { PrismaService } from "../prisma/prisma.service";"#)
            .line(&format!(
                r#"import {{ {}ServiceBase }} from "./base/{}.service.base";"#,
                n.pascal, n.kebab
            ))
            .blank()
            .line("@Injectable()")
            .block_with_close(
                &format!("export class {0}Service extends {0}ServiceBase {{", n.pascal),
                "}",
                |w| {
                    w.block_with_close("constructor(protected readonly prisma: PrismaService) {", "}", |w| {
                        w.line("super(prisma);")
                    })
                },
            )
            .build()
    }
}

impl EntityFile for CreateEntityServiceBase {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.service.base.ts", kebab)
    }

    fn render(n: &Names, params: &EntityParams) -> String {
        let d = &params.dtos;
        let delegate = format!("this.prisma.{}", n.camel);
        CodeWriter::new()
            .line(r#"import { PrismaService } from "../../prisma/prisma.service";"#)
            .line(&dto_import(&[
                d.entity.as_str(),
                d.create_input.as_str(),
                d.update_input.as_str(),
                d.where_unique_input.as_str(),
                d.find_many_args.as_str(),
            ]))
            .blank()
            .block_with_close(&format!("export class {}ServiceBase {{", n.pascal), "}", |w| {
                w.line("constructor(protected readonly prisma: PrismaService) {}")
                    .blank()
                    .block_with_close(
                        &format!("async count(args: {}): Promise<number> {{", d.find_many_args),
                        "}",
                        |w| w.line(&format!("return {}.count(args);", delegate)),
                    )
                    .blank()
                    .block_with_close(
                        &format!("async findMany(args: {}): Promise<{}[]> {{", d.find_many_args, d.entity),
                        "}",
                        |w| w.line(&format!("return {}.findMany(args);", delegate)),
                    )
                    .blank()
                    .block_with_close(
                        &format!(
                            "async findOne(where: {}): Promise<{} | null> {{",
                            d.where_unique_input, d.entity
                        ),
                        "}",
                        |w| w.line(&format!("return {}.findUnique({{ where }});", delegate)),
                    )
                    .blank()
                    .block_with_close(
                        &format!("async create(data: {}): Promise<{}> {{", d.create_input, d.entity),
                        "}",
                        |w| w.line(&format!("return {}.create({{ data }});", delegate)),
                    )
                    .blank()
                    .block_with_close(
                        &format!(
                            "async update(where: {}, data: {}): Promise<{}> {{",
                            d.where_unique_input, d.update_input, d.entity
                        ),
                        "}",
                        |w| w.line(&format!("return {}.update({{ where, data }});", delegate)),
                    )
                    .blank()
                    .block_with_close(
                        &format!("async delete(where: {}): Promise<{}> {{", d.where_unique_input, d.entity),
                        "}",
                        |w| w.line(&format!("return {}.delete({{ where }});", delegate)),
                    )
            })
            .build()
    }
}

impl EntityFile for CreateEntityController {
    fn file_name(kebab: &str) -> String {
        format!("{}.controller.ts", kebab)
    }

    fn render(n: &Names, _params: &EntityParams) -> String {
        CodeWriter::new()
            .line(r#"import { Controller } from "@nestjs/common";"#)
            .line(&format!(r#"import {{ {}Service }} from "./{}.service";"#, n.pascal, n.kebab))
            .line(&format!(
                r#"import {{ {}ControllerBase }} from "./base/{}.controller.base";"#,
                n.pascal, n.kebab
            ))
            .blank()
            .line(&format!(r#"@Controller("{}s")"#, n.kebab))
            .block_with_close(
                &format!("export class {0}Controller extends {0}ControllerBase {{", n.pascal),
                "}",
                |w| {
                    w.block_with_close(
                        &format!("constructor(protected readonly service: {}Service) {{", n.pascal),
                        "}",
                        |w| w.line("super(service);"),
                    )
                },
            )
            .build()
    }
}

impl EntityFile for CreateEntityControllerBase {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.controller.base.ts", kebab)
    }

    fn render(n: &Names, params: &EntityParams) -> String {
        let d = &params.dtos;
        CodeWriter::new()
            .line(r#"import { Body, Delete, Get, Param, Patch, Post, Query } from "@nestjs/common";"#)
            .line(&format!(r#"import {{ {}Service }} from "../{}.service";"#, n.pascal, n.kebab))
            .line(&dto_import(&[
                d.create_input.as_str(),
                d.update_input.as_str(),
                d.where_unique_input.as_str(),
                d.find_many_args.as_str(),
            ]))
            .blank()
            .block_with_close(&format!("export class {}ControllerBase {{", n.pascal), "}", |w| {
                w.line(&format!(
                    "constructor(protected readonly service: {}Service) {{}}",
                    n.pascal
                ))
                .blank()
                .line("@Post()")
                .block_with_close(&format!("async create(@Body() data: {}) {{", d.create_input), "}", |w| {
                    w.line("return this.service.create(data);")
                })
                .blank()
                .line("@Get()")
                .block_with_close(&format!("async findMany(@Query() args: {}) {{", d.find_many_args), "}", |w| {
                    w.line("return this.service.findMany(args);")
                })
                .blank()
                .line(r#"@Get("/:id")"#)
                .block_with_close(
                    &format!("async findOne(@Param() where: {}) {{", d.where_unique_input),
                    "}",
                    |w| w.line("return this.service.findOne(where);"),
                )
                .blank()
                .line(r#"@Patch("/:id")"#)
                .block_with_close(
                    &format!(
                        "async update(@Param() where: {}, @Body() data: {}) {{",
                        d.where_unique_input, d.update_input
                    ),
                    "}",
                    |w| w.line("return this.service.update(where, data);"),
                )
                .blank()
                .line(r#"@Delete("/:id")"#)
                .block_with_close(
                    &format!("async delete(@Param() where: {}) {{", d.where_unique_input),
                    "}",
                    |w| w.line("return this.service.delete(where);"),
                )
            })
            .build()
    }
}

impl EntityFile for CreateEntityControllerSpec {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.controller.base.spec.ts", kebab)
    }

    fn render(n: &Names, _params: &EntityParams) -> String {
        CodeWriter::new()
            .line(&format!(
                r#"import {{ {}ControllerBase }} from "./{}.controller.base";"#,
                n.pascal, n.kebab
            ))
            .blank()
            .block_with_close(&format!(r#"describe("{}", () => {{"#, n.pascal), "});", |w| {
                w.block_with_close(r#"it("delegates findMany to the service", async () => {"#, "});", |w| {
                    w.line("const service = { findMany: jest.fn().mockResolvedValue([]) };")
                        .line(&format!(
                            "const controller = new {}ControllerBase(service as any);",
                            n.pascal
                        ))
                        .line("await expect(controller.findMany({})).resolves.toEqual([]);")
                        .line("expect(service.findMany).toHaveBeenCalledWith({});")
                })
            })
            .build()
    }
}

impl EntityFile for CreateEntityResolver {
    fn file_name(kebab: &str) -> String {
        format!("{}.resolver.ts", kebab)
    }

    fn render(n: &Names, params: &EntityParams) -> String {
        CodeWriter::new()
            .line(r#"import { Resolver } from "@nestjs/graphql";"#)
            .line(&format!(r#"import {{ {} }} from "../dto";"#, params.dtos.entity))
            .line(&format!(r#"import {{ {}Service }} from "./{}.service";"#, n.pascal, n.kebab))
            .line(&format!(
                r#"import {{ {}ResolverBase }} from "./base/{}.resolver.base";"#,
                n.pascal, n.kebab
            ))
            .blank()
            .line(&format!("@Resolver(() => {})", params.dtos.entity))
            .block_with_close(
                &format!("export class {0}Resolver extends {0}ResolverBase {{", n.pascal),
                "}",
                |w| {
                    w.block_with_close(
                        &format!("constructor(protected readonly service: {}Service) {{", n.pascal),
                        "}",
                        |w| w.line("super(service);"),
                    )
                },
            )
            .build()
    }
}

impl EntityFile for CreateEntityResolverBase {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.resolver.base.ts", kebab)
    }

    fn render(n: &Names, params: &EntityParams) -> String {
        let d = &params.dtos;
        CodeWriter::new()
            .line(r#"import { Args, Mutation, Query } from "@nestjs/graphql";"#)
            .line(&format!(r#"import {{ {}Service }} from "../{}.service";"#, n.pascal, n.kebab))
            .line(&dto_import(&[
                d.entity.as_str(),
                d.create_input.as_str(),
                d.where_unique_input.as_str(),
                d.find_many_args.as_str(),
            ]))
            .blank()
            .block_with_close(&format!("export class {}ResolverBase {{", n.pascal), "}", |w| {
                w.line(&format!(
                    "constructor(protected readonly service: {}Service) {{}}",
                    n.pascal
                ))
                .blank()
                .line(&format!("@Query(() => [{}])", d.entity))
                .block_with_close(
                    &format!("async {}s(@Args() args: {}) {{", n.camel, d.find_many_args),
                    "}",
                    |w| w.line("return this.service.findMany(args);"),
                )
                .blank()
                .line(&format!("@Query(() => {}, {{ nullable: true }})", d.entity))
                .block_with_close(
                    &format!("async {}(@Args(\"where\") where: {}) {{", n.camel, d.where_unique_input),
                    "}",
                    |w| w.line("return this.service.findOne(where);"),
                )
                .blank()
                .line(&format!("@Mutation(() => {})", d.entity))
                .block_with_close(
                    &format!("async create{}(@Args(\"data\") data: {}) {{", n.pascal, d.create_input),
                    "}",
                    |w| w.line("return this.service.create(data);"),
                )
            })
            .build()
    }
}

impl RelationFile for CreateEntityControllerToManyRelationMethods {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.controller.relations.base.ts", kebab)
    }

    fn relations(params: &EntityParams) -> Vec<RelationField> {
        relation_fields(params.entity.to_many_relations())
    }

    fn render(n: &Names, params: &RelationParams) -> String {
        CodeWriter::new()
            .line(r#"import { Get, Param, Query } from "@nestjs/common";"#)
            .line(&format!(r#"import {{ {}Service }} from "../{}.service";"#, n.pascal, n.kebab))
            .blank()
            .block_with_close(
                &format!("export class {}ControllerRelationsBase {{", n.pascal),
                "}",
                |w| {
                    w.line(&format!(
                        "constructor(protected readonly service: {}Service) {{}}",
                        n.pascal
                    ))
                    .each(&params.relations, |w, relation| {
                        let field = &relation.name;
                        w.blank()
                            .line(&format!(r#"@Get("/:id/{}")"#, field))
                            .block_with_close(
                                &format!(
                                    "async find{}(@Param(\"id\") id: string, @Query() query: object) {{",
                                    to_pascal_case(field)
                                ),
                                "}",
                                |w| {
                                    w.line(&format!(
                                        "return this.service.findMany({{ where: {{ id }}, select: {{ {}: query }} }});",
                                        field
                                    ))
                                },
                            )
                    })
                },
            )
            .build()
    }
}

impl RelationFile for CreateEntityResolverToManyRelationMethods {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.resolver.to-many.base.ts", kebab)
    }

    fn relations(params: &EntityParams) -> Vec<RelationField> {
        relation_fields(params.entity.to_many_relations())
    }

    fn render(n: &Names, params: &RelationParams) -> String {
        render_resolve_fields(n, params, "ToMany", true)
    }
}

impl RelationFile for CreateEntityResolverToOneRelationMethods {
    fn file_name(kebab: &str) -> String {
        format!("base/{}.resolver.to-one.base.ts", kebab)
    }

    fn relations(params: &EntityParams) -> Vec<RelationField> {
        relation_fields(params.entity.to_one_relations())
    }

    fn render(n: &Names, params: &RelationParams) -> String {
        render_resolve_fields(n, params, "ToOne", false)
    }
}

fn render_resolve_fields(n: &Names, params: &RelationParams, suffix: &str, many: bool) -> String {
    CodeWriter::new()
        .line(r#"import { Parent, ResolveField } from "@nestjs/graphql";"#)
        .line(&format!(r#"import {{ {}Service }} from "../{}.service";"#, n.pascal, n.kebab))
        .blank()
        .block_with_close(
            &format!("export class {}Resolver{}Base {{", n.pascal, suffix),
            "}",
            |w| {
                w.line(&format!(
                    "constructor(protected readonly service: {}Service) {{}}",
                    n.pascal
                ))
                .each(&params.relations, |w, relation| {
                    let target = relation.spec.target.as_deref().unwrap_or("Object");
                    let shape = if many {
                        format!("[{}]", target)
                    } else {
                        target.to_string()
                    };
                    w.blank()
                        .line(&format!(
                            "@ResolveField(() => {}, {{ nullable: {} }})",
                            shape, !relation.spec.required
                        ))
                        .block_with_close(
                            &format!("async {}(@Parent() parent: {{ id: string }}) {{", relation.name),
                            "}",
                            |w| {
                                w.line(&format!(
                                    "return this.service.findOne({{ id: parent.id }}).then((found) => found?.{});",
                                    relation.name
                                ))
                            },
                        )
                })
            },
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hookgen_manifest::{Entity, FieldKind, ResourceData, ServiceConfig};
    use hookgen_pipeline::HookRegistry;

    use super::*;

    fn context() -> GenerationContext {
        let mut order = Entity::default();
        order.fields.insert("id".into(), FieldSpec::new(FieldKind::Id));
        order.fields.insert("total".into(), FieldSpec::new(FieldKind::Float));
        order
            .fields
            .insert("items".into(), FieldSpec::lookup("OrderItem", true));
        order
            .fields
            .insert("customer".into(), FieldSpec::lookup("Customer", false));

        let resource = ResourceData::new(ServiceConfig::new("shop"))
            .with_entity("Order", order)
            .with_entity("OrderItem", Entity::default())
            .with_entity("Customer", Entity::default());
        GenerationContext::new(Arc::new(resource), Arc::new(HookRegistry::new()))
    }

    #[tokio::test]
    async fn test_entity_module() {
        let ctx = context();
        let generator = EntityGenerator::<CreateEntityModule>::new("Order");
        let params = StageGenerator::<CreateEntityModule>::params(&generator, &ctx).unwrap();
        let modules = generator.generate(&ctx, &params).await.unwrap();

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].path(), "server/src/order/order.module.ts");
        insta::assert_snapshot!(modules[0].code(), @r#"
        import { Module } from "@nestjs/common";
        import { OrderModuleBase } from "./base/order.module.base";
        import { OrderService } from "./order.service";
        import { OrderController } from "./order.controller";
        import { OrderResolver } from "./order.resolver";

        @Module({
          imports: [OrderModuleBase],
          controllers: [OrderController],
          providers: [OrderService, OrderResolver],
          exports: [OrderService],
        })
        export class OrderModule {}
        "#);
    }

    #[tokio::test]
    async fn test_kebab_directory() {
        let ctx = context();
        let generator = EntityGenerator::<CreateEntityServiceBase>::new("OrderItem");
        let params = StageGenerator::<CreateEntityServiceBase>::params(&generator, &ctx).unwrap();
        let modules = generator.generate(&ctx, &params).await.unwrap();

        assert_eq!(params.directory, "server/src/order-item");
        assert_eq!(
            modules[0].path(),
            "server/src/order-item/base/order-item.service.base.ts"
        );
        assert!(modules[0].code().contains("this.prisma.orderItem.findMany(args)"));
        assert!(modules[0].code().contains("OrderItemFindManyArgs"));
    }

    #[tokio::test]
    async fn test_unknown_entity() {
        let ctx = context();
        let generator = EntityGenerator::<CreateEntityService>::new("Invoice");
        let err = StageGenerator::<CreateEntityService>::params(&generator, &ctx).unwrap_err();

        assert_eq!(err.to_string(), "entity 'Invoice' is not defined");
    }

    #[tokio::test]
    async fn test_relation_selection() {
        let ctx = context();

        let to_many = RelationGenerator::<CreateEntityResolverToManyRelationMethods>::new("Order");
        let params = StageGenerator::<CreateEntityResolverToManyRelationMethods>::params(&to_many, &ctx)
            .unwrap();
        let names: Vec<&str> = params.relations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["items"]);

        let to_one = RelationGenerator::<CreateEntityResolverToOneRelationMethods>::new("Order");
        let params =
            StageGenerator::<CreateEntityResolverToOneRelationMethods>::params(&to_one, &ctx).unwrap();
        let modules = to_one.generate(&ctx, &params).await.unwrap();
        assert_eq!(modules[0].path(), "server/src/order/base/order.resolver.to-one.base.ts");
        assert!(modules[0].code().contains("@ResolveField(() => Customer, { nullable: false })"));
    }

    #[tokio::test]
    async fn test_no_relations_emits_nothing() {
        let ctx = context();
        let generator =
            RelationGenerator::<CreateEntityControllerToManyRelationMethods>::new("Customer");
        let params =
            StageGenerator::<CreateEntityControllerToManyRelationMethods>::params(&generator, &ctx)
                .unwrap();

        assert!(params.relations.is_empty());
        assert!(generator.generate(&ctx, &params).await.unwrap().is_empty());
    }
}
