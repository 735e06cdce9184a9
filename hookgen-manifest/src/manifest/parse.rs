//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, FieldKind, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "hookgen.toml")
    }
}

impl Manifest {
    /// Parse a hookgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a hookgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if manifest.service.name.trim().is_empty() {
        return Err(ctx
            .source_context()
            .validation_error("service name cannot be empty", ctx.find_key_span("name")));
    }

    for (name, entity) in &manifest.entities {
        ctx.validate_name(name, "entity")?;

        let entity_ctx = ctx.push(name);
        for (field_name, field) in &entity.fields {
            entity_ctx.validate_name(field_name, "field")?;

            match (&field.kind, &field.target) {
                (FieldKind::Lookup, None) => {
                    return Err(ctx.source_context().validation_error(
                        format!("lookup field '{}.{}' needs a target entity", name, field_name),
                        ctx.find_span(field_name),
                    ));
                }
                (FieldKind::Lookup, Some(target)) if !manifest.entities.contains_key(target) => {
                    return Err(ctx.source_context().unknown_entity_error(
                        target,
                        format!("field '{}.{}'", name, field_name),
                        ctx.find_quoted_span(target),
                    ));
                }
                (kind, Some(_)) if *kind != FieldKind::Lookup => {
                    return Err(ctx.source_context().validation_error(
                        format!(
                            "field '{}.{}' is of type '{}' and cannot declare a target",
                            name, field_name, kind
                        ),
                        ctx.find_span(field_name),
                    ));
                }
                _ => {}
            }
        }
    }

    if let Some(auth) = &manifest.auth {
        let Some(user) = manifest.entities.get(&auth.user_entity) else {
            return Err(ctx.source_context().unknown_entity_error(
                &auth.user_entity,
                "[auth].user_entity",
                ctx.find_quoted_span(&auth.user_entity),
            ));
        };
        for (role, field) in auth.fields() {
            if !user.fields.contains_key(field) {
                return Err(ctx.source_context().missing_identity_field_error(
                    &auth.user_entity,
                    field,
                    role,
                    ctx.find_key_span(role),
                ));
            }
        }
    }

    if let Some(broker) = &manifest.message_broker {
        for topic in &broker.topics {
            if topic.trim().is_empty() {
                return Err(ctx
                    .source_context()
                    .validation_error("message broker topic cannot be empty", ctx.find_key_span("topics")));
            }
        }
    }

    for plugin in &manifest.plugins {
        if plugin.name.trim().is_empty() {
            return Err(ctx
                .source_context()
                .validation_error("plugin name cannot be empty", ctx.find_key_span("name")));
        }
    }

    Ok(())
}
