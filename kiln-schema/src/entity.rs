//! Normalized entity schema model.

use std::fmt;

use kiln_core::{ScalarType, has_id_suffix, strip_id_suffix, with_id_suffix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A parsed entity: a PascalCase name and its ordered fields.
///
/// Immutable once loaded; generators only read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySchema {
    pub name: String,
    pub description: Option<String>,
    /// Explicit table name; generators derive one from the name otherwise.
    pub table: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            table: None,
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One declared field of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: ScalarType,
    pub required: bool,
    pub array: bool,
    pub relationship: Option<Relationship>,
    /// Element shape for JSON array columns.
    pub item_schema: Option<ItemSchema>,
    /// Override for the generated property name.
    pub key: Option<String>,
    pub description: Option<String>,
    pub default_value: Option<Value>,
    pub enum_type: Option<EnumType>,
    pub min_array_size: Option<u32>,
    pub max_array_size: Option<u32>,
    pub options: FieldOptions,
}

impl FieldSpec {
    /// A required scalar field with no modifiers.
    pub fn new(name: impl Into<String>, field_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            array: false,
            relationship: None,
            item_schema: None,
            key: None,
            description: None,
            default_value: None,
            enum_type: None,
            min_array_size: None,
            max_array_size: None,
            options: FieldOptions::default(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn array(mut self, array: bool) -> Self {
        self.array = array;
        self
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn item_schema(mut self, item_schema: ItemSchema) -> Self {
        self.item_schema = Some(item_schema);
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn enum_type(mut self, enum_type: EnumType) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Name of the generated property (explicit key wins).
    pub fn property_name(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }

    /// Foreign key column name.
    ///
    /// Explicit key wins; a name already ending in `Id` is kept; otherwise
    /// `Id` is appended. Applying this to its own output is a no-op.
    pub fn foreign_key_name(&self) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => with_id_suffix(&self.name),
        }
    }

    /// Name of the relation navigation property (`authorId` -> `author`).
    pub fn relation_property_name(&self) -> &str {
        strip_id_suffix(&self.name)
    }

    /// `(id, type)` column names of a polymorphic relationship.
    pub fn polymorphic_names(&self) -> (String, String) {
        let base = strip_id_suffix(&self.name);
        let id = match &self.key {
            Some(key) => key.clone(),
            None => format!("{}Id", base),
        };
        (id, format!("{}Type", base))
    }

    /// Whether the foreign key strategy claims this field.
    pub fn has_foreign_key(&self) -> bool {
        self.relationship.as_ref().is_some_and(|r| {
            !r.polymorphic && r.kind.is_owning() && self.options.foreign_key
        })
    }

    pub fn is_polymorphic(&self) -> bool {
        self.relationship.as_ref().is_some_and(|r| r.polymorphic)
    }

    /// Every property name this field contributes to the generated entity.
    pub fn generated_names(&self) -> Vec<String> {
        if self.options.skip {
            return Vec::new();
        }
        match &self.relationship {
            Some(rel) if rel.polymorphic => {
                let (id, ty) = self.polymorphic_names();
                vec![id, ty]
            }
            Some(_) if self.has_foreign_key() => {
                let fk = self.foreign_key_name();
                let property = self.relation_property_name();
                if property == fk {
                    vec![fk]
                } else {
                    vec![fk, property.to_string()]
                }
            }
            Some(_) => vec![self.relation_property_name().to_string()],
            None => vec![self.property_name().to_string()],
        }
    }
}

/// Field-level generation switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FieldOptions {
    /// Generate a foreign key column for owning relationships.
    pub foreign_key: bool,
    /// Expose the field in the API; `None` defers to the project default.
    pub expose: Option<bool>,
    /// Omit the field from every artifact.
    pub skip: bool,
    /// Include the field in create/update inputs.
    pub input: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            foreign_key: true,
            expose: None,
            skip: false,
            input: true,
        }
    }
}

/// Relationship cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    ManyToOne,
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    /// Accepts kebab, snake, camel and Pascal spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "manytoone" => Some(Self::ManyToOne),
            "onetoone" => Some(Self::OneToOne),
            "onetomany" => Some(Self::OneToMany),
            "manytomany" => Some(Self::ManyToMany),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManyToOne => "many-to-one",
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToMany => "many-to-many",
        }
    }

    /// Whether this side stores the foreign key column.
    pub fn is_owning(&self) -> bool {
        matches!(self, Self::ManyToOne | Self::OneToOne)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RelationKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown relationship kind '{}', expected one of: \
                 many-to-one, one-to-one, one-to-many, many-to-many",
                name
            ))
        })
    }
}

/// A reference from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Relationship {
    pub kind: RelationKind,
    #[serde(default)]
    pub target: String,
    /// The target type is data-dependent (id + discriminator columns).
    #[serde(default)]
    pub polymorphic: bool,
    /// Allowed discriminator values of a polymorphic relationship.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    /// Property on the target that points back at this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
}

impl Relationship {
    pub fn new(kind: RelationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            polymorphic: false,
            targets: Vec::new(),
            inverse: None,
        }
    }

    pub fn many_to_one(target: impl Into<String>) -> Self {
        Self::new(RelationKind::ManyToOne, target)
    }

    pub fn polymorphic(targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            polymorphic: true,
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::new(RelationKind::ManyToOne, "")
        }
    }

    pub fn inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }
}

/// An explicitly declared enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumType {
    pub fn new(
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_member(&self, member: &str) -> bool {
        self.values.iter().any(|v| v == member)
    }
}

/// Ordered element shape of a JSON array column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSchema {
    pub properties: Vec<FieldSpec>,
}

impl ItemSchema {
    pub fn new(properties: Vec<FieldSpec>) -> Self {
        Self { properties }
    }
}

/// Whether the field name suggests an implicit reference (`userId`).
pub(crate) fn looks_like_reference(field: &FieldSpec) -> bool {
    has_id_suffix(&field.name)
        && matches!(field.field_type, ScalarType::String | ScalarType::Integer)
}
