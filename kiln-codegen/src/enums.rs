//! Enum registration, run once per entity before any field is rendered.

use indexmap::IndexMap;
use kiln_core::ScalarType;
use kiln_schema::{EntitySchema, EnumType};

use crate::error::GenerateError;

/// Lookup table of the enums an entity declares, in first-declaration order.
///
/// Field preparation only reads from it; declaring the same enum twice is
/// fine as long as the members agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
    enums: IndexMap<String, EnumType>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every enum used by the entity's rendered fields.
    pub fn from_entity(entity: &EntitySchema) -> Result<Self, GenerateError> {
        let mut registry = Self::new();
        for field in &entity.fields {
            if field.options.skip || field.field_type != ScalarType::Enum {
                continue;
            }
            if let Some(enum_type) = &field.enum_type {
                registry.register(enum_type)?;
            }
        }
        Ok(registry)
    }

    /// Returns `false` when an identical enum is already registered.
    pub fn register(&mut self, enum_type: &EnumType) -> Result<bool, GenerateError> {
        match self.enums.get(&enum_type.name) {
            Some(existing) if existing.values == enum_type.values => Ok(false),
            Some(_) => Err(GenerateError::EnumConflict {
                name: enum_type.name.clone(),
            }),
            None => {
                tracing::debug!(
                    name = %enum_type.name,
                    members = enum_type.values.len(),
                    "registered enum"
                );
                self.enums.insert(enum_type.name.clone(), enum_type.clone());
                Ok(true)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumType> {
        self.enums.values()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
