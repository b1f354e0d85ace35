//! Generation-side error types.

use thiserror::Error;

/// A default value a metadata builder cannot render deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    #[error("default value nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("'{member}' is not a member of enum {enum_name}")]
    UnknownEnumMember { enum_name: String, member: String },

    #[error("default for enum {enum_name} must name a member, found {found}")]
    InvalidEnumDefault {
        enum_name: String,
        found: &'static str,
    },

    #[error("default value for a {expected} field cannot be {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Failure while preparing or rendering an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// No strategy claimed the field and the registry has no fallback.
    #[error("no strategy matches field '{field}' and no fallback is registered")]
    Classification { field: String },

    #[error("field '{field}': {source}")]
    Serialization {
        field: String,
        #[source]
        source: SerializationError,
    },

    #[error("enum {name} is declared twice with different members")]
    EnumConflict { name: String },

    #[error("field '{field}' uses enum {name}, which was never registered")]
    UnregisteredEnum { field: String, name: String },
}

impl GenerateError {
    pub fn serialization(field: impl Into<String>, source: SerializationError) -> Self {
        Self::Serialization {
            field: field.into(),
            source,
        }
    }

    /// Field-level errors omit one field; everything else aborts the phase.
    pub fn is_field_level(&self) -> bool {
        matches!(self, Self::Serialization { .. } | Self::UnregisteredEnum { .. })
    }
}

/// Invalid strategy registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("strategies '{first}' and '{second}' share priority {priority}")]
    DuplicatePriority {
        first: &'static str,
        second: &'static str,
        priority: u16,
    },
}
