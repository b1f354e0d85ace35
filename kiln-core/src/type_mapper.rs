//! Type mapping between schema types and generated declarations.

use crate::types::{ApiKind, ColumnKind, ScalarType};

/// Result of mapping one scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Target-language type of the declared property.
    pub language_type: &'static str,
    /// Persistence column kind.
    pub column_kind: ColumnKind,
    /// API scalar kind.
    pub api_kind: ApiKind,
}

impl TypeMapping {
    const fn new(language_type: &'static str, column_kind: ColumnKind, api_kind: ApiKind) -> Self {
        Self {
            language_type,
            column_kind,
            api_kind,
        }
    }
}

/// Trait for mapping schema types to language-specific type strings.
///
/// The default methods implement the shared lookup table; implementors only
/// name their language unless the target needs a different spelling.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a scalar type. Never fails: every tag has an entry.
    fn map_type(&self, field_type: ScalarType) -> TypeMapping {
        map_scalar(field_type)
    }

    /// Wrap an element type in the language's array syntax.
    fn map_array_type(&self, element: &str) -> String {
        wrap_array(element)
    }
}

/// The lookup table behind [`TypeMapper::map_type`].
pub fn map_scalar(field_type: ScalarType) -> TypeMapping {
    use ApiKind as A;
    use ColumnKind as C;

    match field_type {
        ScalarType::String => TypeMapping::new("string", C::Varchar, A::String),
        ScalarType::Text => TypeMapping::new("string", C::Text, A::String),
        ScalarType::Integer => TypeMapping::new("number", C::Integer, A::Int),
        ScalarType::Float => TypeMapping::new("number", C::Float, A::Float),
        ScalarType::Decimal => TypeMapping::new("number", C::Decimal, A::Float),
        ScalarType::Boolean => TypeMapping::new("boolean", C::Boolean, A::Boolean),
        ScalarType::Date | ScalarType::Timestamp => {
            TypeMapping::new("Date", C::Timestamp, A::DateTime)
        }
        ScalarType::Json => TypeMapping::new("Record<string, unknown>", C::Json, A::Json),
        ScalarType::Jsonb => TypeMapping::new("Record<string, unknown>", C::Jsonb, A::Json),
        ScalarType::Enum => TypeMapping::new("string", C::Enum, A::Enum),
    }
}

/// `T[]` for plain type names, `Array<T>` for anything compound.
pub fn wrap_array(element: &str) -> String {
    let simple = element
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if simple {
        format!("{}[]", element)
    } else {
        format!("Array<{}>", element)
    }
}

/// TypeScript mapper used by the generators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> &'static str {
        "typescript"
    }
}
