use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// An entity the generator produces a module, service, controller and
/// resolver for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entity {
    /// Human-readable name, defaults to the entity key
    pub display_name: Option<String>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

impl Entity {
    /// Relation fields (`lookup`) in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields
            .iter()
            .filter(|(_, f)| f.kind == FieldKind::Lookup)
            .map(|(name, f)| (name.as_str(), f))
    }

    /// Relation fields pointing at many records.
    pub fn to_many_relations(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.relations().filter(|(_, f)| f.many)
    }

    /// Relation fields pointing at a single record.
    pub fn to_one_relations(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.relations().filter(|(_, f)| !f.many)
    }
}

/// Data type of an entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Id,
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Json,
    Password,
    Roles,
    Lookup,
}

impl FieldKind {
    /// TypeScript type used in generated DTOs.
    pub fn ts_type(&self) -> &'static str {
        match self {
            FieldKind::Id | FieldKind::String | FieldKind::Password => "string",
            FieldKind::Integer | FieldKind::Float => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Datetime => "Date",
            FieldKind::Json => "JsonValue",
            FieldKind::Roles => "string[]",
            FieldKind::Lookup => "string",
        }
    }

    /// Prisma scalar type used in the generated schema.
    pub fn prisma_type(&self) -> &'static str {
        match self {
            FieldKind::Id | FieldKind::String | FieldKind::Password => "String",
            FieldKind::Integer => "Int",
            FieldKind::Float => "Float",
            FieldKind::Boolean => "Boolean",
            FieldKind::Datetime => "DateTime",
            FieldKind::Json | FieldKind::Roles => "Json",
            FieldKind::Lookup => "String",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Id => "id",
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Datetime => "datetime",
            FieldKind::Json => "json",
            FieldKind::Password => "password",
            FieldKind::Roles => "roles",
            FieldKind::Lookup => "lookup",
        };
        write!(f, "{}", name)
    }
}

/// A field declaration.
///
/// Accepts a short form (`name = "string"`) or a table form
/// (`customer = { type = "lookup", target = "Customer" }`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawField")]
pub struct FieldSpec {
    pub kind: FieldKind,
    /// Related entity, for `lookup` fields
    pub target: Option<String>,
    /// Whether a `lookup` points at many records
    pub many: bool,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            target: None,
            many: false,
            required: true,
        }
    }

    pub fn lookup(target: impl Into<String>, many: bool) -> Self {
        Self {
            kind: FieldKind::Lookup,
            target: Some(target.into()),
            many,
            required: !many,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Short(FieldKind),
    Full {
        #[serde(rename = "type")]
        kind: FieldKind,
        target: Option<String>,
        #[serde(default)]
        many: bool,
        required: Option<bool>,
    },
}

impl From<RawField> for FieldSpec {
    fn from(raw: RawField) -> Self {
        match raw {
            RawField::Short(kind) => FieldSpec::new(kind),
            RawField::Full {
                kind,
                target,
                many,
                required,
            } => FieldSpec {
                kind,
                target,
                many,
                // To-many relations are optional unless stated otherwise
                required: required.unwrap_or(!many),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_full_forms() {
        let entity: Entity = toml::from_str(
            r#"
display_name = "Order"

[fields]
id = "id"
total = "float"
customer = { type = "lookup", target = "Customer" }
items = { type = "lookup", target = "OrderItem", many = true }
note = { type = "string", required = false }
"#,
        )
        .unwrap();

        let names: Vec<&str> = entity.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "total", "customer", "items", "note"]);
        assert_eq!(entity.fields["total"], FieldSpec::new(FieldKind::Float));
        assert_eq!(entity.fields["customer"], FieldSpec::lookup("Customer", false));
        assert!(!entity.fields["items"].required);
        assert!(!entity.fields["note"].required);
    }

    #[test]
    fn test_relations() {
        let entity: Entity = toml::from_str(
            r#"
[fields]
customer = { type = "lookup", target = "Customer" }
items = { type = "lookup", target = "OrderItem", many = true }
"#,
        )
        .unwrap();

        let to_many: Vec<&str> = entity.to_many_relations().map(|(n, _)| n).collect();
        let to_one: Vec<&str> = entity.to_one_relations().map(|(n, _)| n).collect();
        assert_eq!(to_many, vec!["items"]);
        assert_eq!(to_one, vec!["customer"]);
    }

    #[test]
    fn test_unknown_kind() {
        let result: Result<Entity, _> = toml::from_str("[fields]\nsize = \"bigint\"");
        assert!(result.is_err());
    }
}
