//! `@EnumField` annotations for entity columns and input fields.

use kiln_schema::EnumType;
use serde_json::Value;

use super::{
    literal::value_kind,
    options::{MetadataOptions, WithMetadata, decorator},
};
use crate::error::SerializationError;

/// Builds `@EnumField(() => Enum, { ... })`.
///
/// Defaults render as qualified member references (`Status.DRAFT`), wrapped
/// in a list for array fields.
#[derive(Debug, Clone)]
pub struct EnumFieldBuilder<'a> {
    enum_type: &'a EnumType,
    options: MetadataOptions,
}

impl<'a> EnumFieldBuilder<'a> {
    pub fn new(enum_type: &'a EnumType) -> Self {
        Self {
            enum_type,
            options: MetadataOptions::new(),
        }
    }

    pub fn build(&self) -> Result<String, SerializationError> {
        let default = self
            .options
            .get_default_value()
            .map(|value| self.render_default(value))
            .transpose()?;
        let entries = self.options.entries(default, true);
        Ok(decorator(
            "EnumField",
            &[format!("() => {}", self.enum_type.name)],
            &entries,
        ))
    }

    fn render_default(&self, value: &Value) -> Result<String, SerializationError> {
        match value {
            Value::String(member) => {
                let reference = self.member_ref(member)?;
                if self.options.is_array() {
                    Ok(format!("[{reference}]"))
                } else {
                    Ok(reference)
                }
            }
            Value::Array(items) if self.options.is_array() => {
                let refs = items
                    .iter()
                    .map(|item| match item {
                        Value::String(member) => self.member_ref(member),
                        other => Err(self.invalid(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", refs.join(", ")))
            }
            other => Err(self.invalid(other)),
        }
    }

    fn member_ref(&self, member: &str) -> Result<String, SerializationError> {
        if !self.enum_type.has_member(member) {
            return Err(SerializationError::UnknownEnumMember {
                enum_name: self.enum_type.name.clone(),
                member: member.to_string(),
            });
        }
        Ok(format!("{}.{}", self.enum_type.name, member))
    }

    fn invalid(&self, value: &Value) -> SerializationError {
        SerializationError::InvalidEnumDefault {
            enum_name: self.enum_type.name.clone(),
            found: value_kind(value),
        }
    }
}

impl WithMetadata for EnumFieldBuilder<'_> {
    fn options(&self) -> &MetadataOptions {
        &self.options
    }

    fn with_options(self, options: MetadataOptions) -> Self {
        Self { options, ..self }
    }
}
