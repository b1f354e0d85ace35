//! Identifier and entity validation.

use std::collections::HashSet;

use kiln_core::ScalarType;

use crate::{EntitySchema, FieldSpec, Result, error::SourceContext};

/// Words that cannot name a generated TypeScript property or type.
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with",
    // Strict mode
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
];

/// Property names every generated entity already declares.
pub const GENERATED_COLUMNS: &[&str] = &["id", "createdAt", "updatedAt"];

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Whether `name` matches `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_error(name).is_none()
}

/// Returns None if valid, Some(reason) if invalid
pub(crate) fn identifier_error(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some("name cannot be empty");
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return Some("name must start with a letter, '_' or '$'");
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        return Some("name contains an invalid character");
    }
    None
}

/// Validation context for one entity source.
pub(crate) struct Validator<'a> {
    ctx: &'a SourceContext,
}

impl<'a> Validator<'a> {
    pub fn new(ctx: &'a SourceContext) -> Self {
        Self { ctx }
    }

    /// Validate that a name is a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = identifier_error(name) {
            return Err(self.ctx.invalid_identifier_error(name, kind, reason));
        }
        if is_reserved_word(name) {
            return Err(self.ctx.reserved_keyword_error(name, kind));
        }
        Ok(())
    }

    pub fn validate_entity(&self, entity: &EntitySchema) -> Result<()> {
        self.validate_name(&entity.name, "entity")?;
        if !entity.name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(self.ctx.invalid_identifier_error(
                &entity.name,
                "entity",
                "entity names must be PascalCase",
            ));
        }

        let mut seen: HashSet<String> = GENERATED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut declared: HashSet<&str> = HashSet::new();

        for field in &entity.fields {
            if !declared.insert(&field.name) {
                return Err(self.ctx.duplicate_field_error(&field.name, &entity.name));
            }
            self.validate_field(field)?;

            for name in field.generated_names() {
                if GENERATED_COLUMNS.contains(&name.as_str()) {
                    return Err(self.ctx.validation_error_at(
                        format!("'{}' is generated for every entity and cannot be declared", name),
                        &field.name,
                    ));
                }
                if !seen.insert(name.clone()) {
                    return Err(self.ctx.duplicate_field_error(&name, &entity.name));
                }
            }
        }
        Ok(())
    }

    fn validate_field(&self, field: &FieldSpec) -> Result<()> {
        self.validate_name(&field.name, "field")?;
        if let Some(key) = &field.key {
            self.validate_name(key, "field key")?;
        }

        if field.field_type == ScalarType::Enum && field.enum_type.is_none() {
            return Err(self.ctx.missing_enum_values_error(&field.name));
        }
        if let Some(enum_type) = &field.enum_type {
            self.validate_name(&enum_type.name, "enum")?;
            if enum_type.values.is_empty() {
                return Err(self.ctx.missing_enum_values_error(&field.name));
            }
            for member in &enum_type.values {
                self.validate_name(member, "enum member")?;
            }
        }

        if let Some(rel) = &field.relationship {
            if rel.polymorphic {
                for target in &rel.targets {
                    self.validate_name(target, "polymorphic target")?;
                }
            } else if rel.target.is_empty() {
                return Err(self.ctx.validation_error_at(
                    format!("relationship field '{}' has no target entity", field.name),
                    &field.name,
                ));
            } else {
                self.validate_name(&rel.target, "relationship target")?;
            }
            if let Some(inverse) = &rel.inverse {
                self.validate_name(inverse, "inverse property")?;
            }
        }

        if let Some(items) = &field.item_schema {
            for property in &items.properties {
                self.validate_name(&property.name, "item property")?;
            }
        }

        if let (Some(min), Some(max)) = (field.min_array_size, field.max_array_size) {
            if min > max {
                return Err(self.ctx.validation_error_at(
                    format!(
                        "field '{}' has minArraySize {} greater than maxArraySize {}",
                        field.name, min, max
                    ),
                    &field.name,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumType, Error, Relationship};

    fn validate(entity: &EntitySchema) -> Result<()> {
        let ctx = SourceContext::new("", "test.json");
        Validator::new(&ctx).validate_entity(entity)
    }

    #[test]
    fn test_identifier_syntax() {
        assert!(is_valid_identifier("title"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("$ref"));
        assert!(is_valid_identifier("field2"));
        assert!(!is_valid_identifier("2field"));
        assert!(!is_valid_identifier("my-field"));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved_word("class"));
        assert!(is_reserved_word("delete"));
        assert!(!is_reserved_word("title"));
    }

    #[test]
    fn test_valid_entity() {
        let entity = EntitySchema::new("Post")
            .field(FieldSpec::new("title", ScalarType::String))
            .field(
                FieldSpec::new("authorId", ScalarType::String)
                    .relationship(Relationship::many_to_one("Author")),
            );
        assert!(validate(&entity).is_ok());
    }

    #[test]
    fn test_entity_name_must_be_pascal_case() {
        let entity = EntitySchema::new("post");
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_invalid_field_name() {
        let entity =
            EntitySchema::new("Post").field(FieldSpec::new("my-title", ScalarType::String));
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { ref name, .. } if name == "my-title"));
    }

    #[test]
    fn test_reserved_field_name() {
        let entity = EntitySchema::new("Post").field(FieldSpec::new("class", ScalarType::String));
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_duplicate_field() {
        let entity = EntitySchema::new("Post")
            .field(FieldSpec::new("title", ScalarType::String))
            .field(FieldSpec::new("title", ScalarType::Text));
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::DuplicateField { .. }));
    }

    #[test]
    fn test_derived_foreign_key_collision() {
        let entity = EntitySchema::new("Post")
            .field(FieldSpec::new("authorId", ScalarType::String))
            .field(
                FieldSpec::new("author", ScalarType::String)
                    .relationship(Relationship::many_to_one("Author")),
            );
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::DuplicateField { ref name, .. } if name == "authorId"));
    }

    #[test]
    fn test_generated_column_cannot_be_declared() {
        let entity = EntitySchema::new("Post").field(FieldSpec::new("id", ScalarType::String));
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_enum_without_values() {
        let entity = EntitySchema::new("Post").field(
            FieldSpec::new("status", ScalarType::Enum)
                .enum_type(EnumType::new("PostStatus", Vec::<String>::new())),
        );
        let err = validate(&entity).unwrap_err();
        assert!(matches!(*err, Error::MissingEnumValues { .. }));
    }

    #[test]
    fn test_array_bounds() {
        let mut field = FieldSpec::new("tags", ScalarType::String).array(true);
        field.min_array_size = Some(5);
        field.max_array_size = Some(2);
        let entity = EntitySchema::new("Post").field(field);
        assert!(validate(&entity).is_err());
    }
}
