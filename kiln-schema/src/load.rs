//! Loading entity schemas from JSON or TOML sources.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use kiln_core::{ScalarType, to_pascal_case};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    EntitySchema, EnumType, Error, FieldOptions, FieldSpec, ItemSchema, Relationship, Result,
    attribute::{infer_relationship, parse_attribute},
    error::SourceContext,
    validate::Validator,
};

/// Source format of an entity schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    /// Detect the format from a file extension (`.json` / `.toml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawEntity {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    table: Option<String>,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Shorthand(String),
    Detailed(Box<RawFieldDef>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawFieldDef {
    name: String,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    array: bool,
    #[serde(default)]
    relationship: Option<Relationship>,
    #[serde(default)]
    item_schema: Option<IndexMap<String, String>>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_value: Option<Value>,
    #[serde(rename = "enum", default)]
    enum_def: Option<RawEnum>,
    #[serde(default)]
    min_array_size: Option<u32>,
    #[serde(default)]
    max_array_size: Option<u32>,
    #[serde(default)]
    options: FieldOptions,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnum {
    #[serde(default)]
    name: Option<String>,
    values: Vec<String>,
}

impl FromStr for EntitySchema {
    type Err = Box<Error>;

    /// Parse a JSON entity schema.
    fn from_str(s: &str) -> Result<Self> {
        parse_entity(s, "entity.json", SchemaFormat::Json)
    }
}

impl EntitySchema {
    /// Load an entity schema file, picking the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        let format = SchemaFormat::from_path(path).unwrap_or(SchemaFormat::Json);
        parse_entity(&content, &filename, format)
    }

    /// Parse an entity schema with a custom filename for error reporting.
    pub fn from_str_with_filename(
        content: &str,
        filename: &str,
        format: SchemaFormat,
    ) -> Result<Self> {
        parse_entity(content, filename, format)
    }
}

/// Parse and validate an entity schema.
///
/// Fails fast: the first malformed field or invalid name aborts the entity.
pub fn parse_entity(content: &str, filename: &str, format: SchemaFormat) -> Result<EntitySchema> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawEntity = match format {
        SchemaFormat::Json => serde_json::from_str(content).map_err(|e| ctx.json_error(&e))?,
        SchemaFormat::Toml => toml::from_str(content).map_err(|e| ctx.toml_error(&e))?,
    };

    let entity = lower_entity(raw, &ctx)?;
    Validator::new(&ctx).validate_entity(&entity)?;
    tracing::debug!(entity = %entity.name, fields = entity.fields.len(), "loaded entity schema");
    Ok(entity)
}

/// Validate an entity built in code (no source text to point at).
pub fn validate_entity(entity: &EntitySchema) -> Result<()> {
    let ctx = SourceContext::new("", format!("{}.json", entity.name));
    Validator::new(&ctx).validate_entity(entity)
}

fn lower_entity(raw: RawEntity, ctx: &SourceContext) -> Result<EntitySchema> {
    let mut entity = EntitySchema::new(raw.name);
    entity.description = raw.description;
    entity.table = raw.table;

    for raw_field in raw.fields {
        let mut field = match raw_field {
            RawField::Shorthand(text) => parse_attribute(&text)
                .map_err(|e| ctx.invalid_shorthand_error(&text, e.to_string()))?,
            RawField::Detailed(def) => lower_field(*def, ctx)?,
        };
        if field.field_type == ScalarType::Enum {
            let default_name = default_enum_name(&entity.name, &field.name);
            match &mut field.enum_type {
                Some(enum_type) if enum_type.name.is_empty() => enum_type.name = default_name,
                Some(_) => {}
                None => field.enum_type = Some(EnumType::new(default_name, Vec::<String>::new())),
            }
        }
        entity.fields.push(field);
    }
    Ok(entity)
}

fn lower_field(def: RawFieldDef, ctx: &SourceContext) -> Result<FieldSpec> {
    let type_name = def.field_type.as_deref().unwrap_or("string").trim();
    let (type_name, array_suffix) = match type_name.strip_suffix("[]") {
        Some(element) => (element, true),
        None => (type_name, false),
    };

    let item_schema = match def.item_schema {
        Some(map) => Some(lower_item_schema(&def.name, map, ctx)?),
        None => None,
    };

    let mut field = FieldSpec {
        name: def.name,
        field_type: ScalarType::from_name(type_name),
        required: def.required.unwrap_or(false),
        array: def.array || array_suffix,
        relationship: def.relationship,
        item_schema,
        key: def.key,
        description: def.description,
        default_value: def.default_value,
        enum_type: None,
        min_array_size: def.min_array_size,
        max_array_size: def.max_array_size,
        options: def.options,
    };

    if let Some(raw_enum) = def.enum_def {
        field.enum_type = Some(EnumType {
            name: raw_enum.name.unwrap_or_default(),
            values: raw_enum.values,
        });
    }

    infer_relationship(&mut field);
    Ok(field)
}

fn lower_item_schema(
    field: &str,
    map: IndexMap<String, String>,
    ctx: &SourceContext,
) -> Result<ItemSchema> {
    let mut properties = Vec::with_capacity(map.len());
    for (name, ty) in map {
        let shorthand = format!("{}:{}", name, ty);
        let property = parse_attribute(&shorthand).map_err(|e| {
            ctx.invalid_shorthand_error(&name, format!("item property of '{}': {}", field, e))
        })?;
        properties.push(property);
    }
    Ok(ItemSchema::new(properties))
}

/// `<Entity><Field>` in PascalCase, e.g. `PostStatus`.
fn default_enum_name(entity: &str, field: &str) -> String {
    format!("{}{}", entity, to_pascal_case(field))
}
