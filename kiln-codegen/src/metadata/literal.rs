//! Structural serialization of default values into TypeScript literals.

use kiln_core::ScalarType;
use kiln_schema::is_valid_identifier;
use serde_json::Value;

use crate::error::SerializationError;

/// Nesting limit for structural defaults.
pub const MAX_DEPTH: usize = 32;

/// Single-quoted TypeScript string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a JSON value as a TypeScript literal.
///
/// Object keys keep their declared order and are quoted only when they are
/// not plain identifiers.
///
/// ```
/// use kiln_codegen::metadata::to_ts_literal;
/// use serde_json::json;
///
/// let literal = to_ts_literal(&json!({ "theme": "dark", "max-items": 3 })).unwrap();
/// assert_eq!(literal, "{ theme: 'dark', 'max-items': 3 }");
/// ```
pub fn to_ts_literal(value: &Value) -> Result<String, SerializationError> {
    write_literal(value, 0)
}

fn write_literal(value: &Value, depth: usize) -> Result<String, SerializationError> {
    if depth > MAX_DEPTH {
        return Err(SerializationError::TooDeep { max: MAX_DEPTH });
    }
    let literal = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| write_literal(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(key, value)| {
                    let key = if is_valid_identifier(key) {
                        key.clone()
                    } else {
                        quote(key)
                    };
                    Ok(format!("{}: {}", key, write_literal(value, depth + 1)?))
                })
                .collect::<Result<Vec<_>, SerializationError>>()?;
            format!("{{ {} }}", entries.join(", "))
        }
    };
    Ok(literal)
}

/// Article-qualified name of a value's shape, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check that a default value fits the declared field shape.
///
/// JSON columns accept any value; `null` is accepted everywhere.
pub fn check_default(
    field_type: ScalarType,
    array: bool,
    value: &Value,
) -> Result<(), SerializationError> {
    if value.is_null() || field_type.is_json() {
        return Ok(());
    }
    if array {
        let Value::Array(items) = value else {
            return Err(SerializationError::TypeMismatch {
                expected: "array",
                found: value_kind(value),
            });
        };
        return items
            .iter()
            .try_for_each(|item| check_scalar(field_type, item));
    }
    check_scalar(field_type, value)
}

fn check_scalar(field_type: ScalarType, value: &Value) -> Result<(), SerializationError> {
    let fits = match field_type {
        ScalarType::Boolean => value.is_boolean(),
        ScalarType::Integer => value.is_i64() || value.is_u64(),
        ScalarType::Float | ScalarType::Decimal => value.is_number(),
        ScalarType::Json | ScalarType::Jsonb => true,
        ScalarType::String
        | ScalarType::Text
        | ScalarType::Date
        | ScalarType::Timestamp
        | ScalarType::Enum => value.is_string(),
    };
    if fits {
        Ok(())
    } else {
        Err(SerializationError::TypeMismatch {
            expected: field_type.as_str(),
            found: value_kind(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
        assert_eq!(quote("line\nbreak"), r"'line\nbreak'");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_ts_literal(&json!(null)).unwrap(), "null");
        assert_eq!(to_ts_literal(&json!(true)).unwrap(), "true");
        assert_eq!(to_ts_literal(&json!(42)).unwrap(), "42");
        assert_eq!(to_ts_literal(&json!(0.5)).unwrap(), "0.5");
        assert_eq!(to_ts_literal(&json!("draft")).unwrap(), "'draft'");
    }

    #[test]
    fn test_structures() {
        assert_eq!(to_ts_literal(&json!([])).unwrap(), "[]");
        assert_eq!(to_ts_literal(&json!({})).unwrap(), "{}");
        assert_eq!(
            to_ts_literal(&json!([{ "label": "a", "tags": ["x"] }])).unwrap(),
            "[{ label: 'a', tags: ['x'] }]"
        );
    }

    #[test]
    fn test_object_key_order_is_preserved() {
        let value: Value = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        assert_eq!(to_ts_literal(&value).unwrap(), "{ z: 1, a: 2 }");
    }

    #[test]
    fn test_depth_limit() {
        let mut value = json!(1);
        for _ in 0..=MAX_DEPTH {
            value = json!([value]);
        }
        assert_eq!(
            to_ts_literal(&value),
            Err(SerializationError::TooDeep { max: MAX_DEPTH })
        );
    }

    #[test]
    fn test_check_default() {
        assert!(check_default(ScalarType::Integer, false, &json!(3)).is_ok());
        assert!(check_default(ScalarType::Integer, false, &json!(3.5)).is_err());
        assert!(check_default(ScalarType::Boolean, false, &json!("yes")).is_err());
        assert!(check_default(ScalarType::String, true, &json!(["a", "b"])).is_ok());
        assert!(check_default(ScalarType::String, true, &json!("a")).is_err());
        assert!(check_default(ScalarType::Json, false, &json!({ "a": [1] })).is_ok());
        assert!(check_default(ScalarType::Float, false, &json!(null)).is_ok());
    }
}
