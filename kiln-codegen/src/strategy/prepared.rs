//! Output record of field preparation.

use crate::ast::{ImportCollector, Property};

/// One declaration produced from a schema field.
///
/// A field may expand to several of these (a foreign key and its relation,
/// or a polymorphic id and discriminator).
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedField {
    pub name: String,
    pub ts_type: String,
    pub nullable: bool,
    pub decorators: Vec<String>,
    pub is_foreign_key: bool,
    pub is_polymorphic_id: bool,
    pub is_polymorphic_type: bool,
    pub is_relation: bool,
    /// Symbols the declaration needs.
    pub imports: ImportCollector,
}

impl PreparedField {
    pub fn new(name: impl Into<String>, ts_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ts_type: ts_type.into(),
            nullable: false,
            decorators: Vec::new(),
            is_foreign_key: false,
            is_polymorphic_id: false,
            is_polymorphic_type: false,
            is_relation: false,
            imports: ImportCollector::new(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn decorators(mut self, decorators: Vec<String>) -> Self {
        self.decorators = decorators;
        self
    }

    pub fn foreign_key(mut self) -> Self {
        self.is_foreign_key = true;
        self
    }

    pub fn polymorphic_id(mut self) -> Self {
        self.is_polymorphic_id = true;
        self
    }

    pub fn polymorphic_type(mut self) -> Self {
        self.is_polymorphic_type = true;
        self
    }

    pub fn relation(mut self) -> Self {
        self.is_relation = true;
        self
    }

    pub fn import(mut self, module: &str, symbol: &str) -> Self {
        self.imports.add(module, symbol);
        self
    }

    pub fn import_if(self, condition: bool, module: &str, symbol: &str) -> Self {
        if condition { self.import(module, symbol) } else { self }
    }

    /// Relations are lazily loaded, so they are always optional.
    pub fn to_property(&self) -> Property {
        Property::new(&self.name, &self.ts_type)
            .optional(self.nullable || self.is_relation)
            .decorators(self.decorators.iter().cloned())
    }
}
