//! Scalar type tags shared by the schema and the generators.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declared type of a schema field.
///
/// Parsing is permissive: unknown names degrade to [`ScalarType::String`]
/// instead of failing, so schema authors can use loose spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarType {
    #[default]
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    Json,
    Jsonb,
    Enum,
}

impl ScalarType {
    /// Resolve a schema type name (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "number" | "integer" | "int" => Self::Integer,
            "float" => Self::Float,
            "decimal" => Self::Decimal,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            "datetime" | "timestamp" => Self::Timestamp,
            "json" => Self::Json,
            "jsonb" => Self::Jsonb,
            "enum" => Self::Enum,
            _ => Self::String,
        }
    }

    /// Canonical schema name for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "number",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Timestamp => "datetime",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Enum => "enum",
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::Jsonb)
    }

    /// Primitive types that can be stored as elements of a JSON array column.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Text
                | Self::Integer
                | Self::Float
                | Self::Decimal
                | Self::Boolean
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ScalarType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScalarType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Persistence column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Varchar,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Timestamp,
    Json,
    Jsonb,
    Enum,
}

impl ColumnKind {
    /// Column type name as understood by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API scalar kind exposed by the generated schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKind {
    Id,
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Json,
    Enum,
}

impl ApiKind {
    /// Identifier of the API scalar in generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::DateTime => "Date",
            Self::Json => "GraphQLJSON",
            Self::Enum => "String",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ScalarType::from_name("STRING"), ScalarType::String);
        assert_eq!(ScalarType::from_name("Number"), ScalarType::Integer);
        assert_eq!(ScalarType::from_name("int"), ScalarType::Integer);
        assert_eq!(ScalarType::from_name("DateTime"), ScalarType::Timestamp);
        assert_eq!(ScalarType::from_name("JSONB"), ScalarType::Jsonb);
        assert_eq!(ScalarType::from_name("bool"), ScalarType::Boolean);
    }

    #[test]
    fn test_unknown_names_degrade_to_string() {
        assert_eq!(ScalarType::from_name("uuid"), ScalarType::String);
        assert_eq!(ScalarType::from_name(""), ScalarType::String);
    }

    #[test]
    fn test_primitive_classification() {
        assert!(ScalarType::Boolean.is_primitive());
        assert!(ScalarType::Decimal.is_primitive());
        assert!(!ScalarType::Json.is_primitive());
        assert!(!ScalarType::Enum.is_primitive());
        assert!(!ScalarType::Timestamp.is_primitive());
    }
}
