//! Compact `name:type` field shorthand.
//!
//! ```text
//! title:string        required string
//! views:number?       optional integer
//! tags:string[]       required string array
//! authorId:string     implicit many-to-one reference to `Author`
//! ```

use kiln_core::{ScalarType, strip_id_suffix, upper_first};
use thiserror::Error;

use crate::entity::{FieldSpec, Relationship, looks_like_reference};

/// Why a shorthand string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
    #[error("field shorthand is empty")]
    Empty,
    #[error("field shorthand has no name")]
    MissingName,
    #[error("field shorthand has more than one ':' separator")]
    TooManySegments,
}

/// Parse a `name:type[?]` shorthand into a field.
///
/// A trailing `?` makes the field optional, a trailing `[]` on the type makes
/// it an array, and a missing type defaults to `string`. Unknown type names
/// degrade to `string`. Name validity is checked separately by
/// [`is_valid_identifier`](crate::is_valid_identifier).
pub fn parse_attribute(raw: &str) -> Result<FieldSpec, ShorthandError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShorthandError::Empty);
    }

    let (body, required) = match trimmed.strip_suffix('?') {
        Some(rest) => (rest.trim_end(), false),
        None => (trimmed, true),
    };

    let (name, type_name) = match body.split_once(':') {
        Some((name, ty)) => {
            if ty.contains(':') {
                return Err(ShorthandError::TooManySegments);
            }
            (name.trim(), ty.trim())
        }
        None => (body, ""),
    };

    if name.is_empty() {
        return Err(ShorthandError::MissingName);
    }

    let (type_name, array) = match type_name.strip_suffix("[]") {
        Some(element) => (element.trim(), true),
        None => (type_name, false),
    };
    let field_type = if type_name.is_empty() {
        ScalarType::String
    } else {
        ScalarType::from_name(type_name)
    };

    let mut field = FieldSpec::new(name, field_type)
        .required(required)
        .array(array);
    infer_relationship(&mut field);
    Ok(field)
}

/// Infer a many-to-one reference from an `<entity>Id` name.
///
/// Only applies to string or number fields without an explicit
/// relationship: `userId` becomes a reference to `User`.
pub fn infer_relationship(field: &mut FieldSpec) {
    if field.relationship.is_some() || !looks_like_reference(field) {
        return;
    }
    let target = upper_first(strip_id_suffix(&field.name));
    tracing::debug!(field = %field.name, %target, "inferred relationship from field name");
    field.relationship = Some(Relationship::many_to_one(target));
}
