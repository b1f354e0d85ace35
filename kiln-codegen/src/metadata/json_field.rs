//! `@JsonField` annotations for JSON columns and JSON-backed arrays.

use super::{
    literal::to_ts_literal,
    options::{MetadataOptions, WithMetadata, decorator},
};
use crate::error::SerializationError;

/// Builds `@JsonField({ ... })`.
///
/// Never emits `array: true`; array-ness is carried by the property type and
/// the default value.
#[derive(Debug, Clone, Default)]
pub struct JsonFieldBuilder {
    jsonb: bool,
    options: MetadataOptions,
}

impl JsonFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store as `jsonb` instead of `json`.
    pub fn jsonb(mut self, jsonb: bool) -> Self {
        self.jsonb = jsonb;
        self
    }

    pub fn build(&self) -> Result<String, SerializationError> {
        let default = self
            .options
            .get_default_value()
            .map(to_ts_literal)
            .transpose()?;
        let entries = self.options.entries(default, false);
        let args = if self.jsonb && self.options.get_input_type().is_none() {
            vec!["'jsonb'".to_string()]
        } else {
            Vec::new()
        };
        Ok(decorator("JsonField", &args, &entries))
    }
}

impl WithMetadata for JsonFieldBuilder {
    fn options(&self) -> &MetadataOptions {
        &self.options
    }

    fn with_options(self, options: MetadataOptions) -> Self {
        Self { options, ..self }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::metadata::InputKind;

    #[test]
    fn test_bare() {
        assert_eq!(JsonFieldBuilder::new().build().unwrap(), "@JsonField()");
    }

    #[test]
    fn test_array_flag_is_suppressed() {
        let built = JsonFieldBuilder::new()
            .array(true)
            .required(false)
            .default_value(json!([]))
            .build()
            .unwrap();
        assert_eq!(built, "@JsonField({ nullable: true, defaultValue: [] })");
        assert!(!built.contains("array"));
    }

    #[test]
    fn test_structural_default() {
        let built = JsonFieldBuilder::new()
            .default_value(json!({ "theme": "dark", "sizes": [1, 2] }))
            .build()
            .unwrap();
        assert_eq!(
            built,
            "@JsonField({ defaultValue: { theme: 'dark', sizes: [1, 2] } })"
        );
    }

    #[test]
    fn test_description_quotes_are_escaped() {
        let built = JsonFieldBuilder::new()
            .description("Author's notes")
            .build()
            .unwrap();
        assert_eq!(built, r"@JsonField({ description: 'Author\'s notes' })");
    }

    #[test]
    fn test_jsonb_column_and_sizes() {
        let built = JsonFieldBuilder::new()
            .jsonb(true)
            .min_array_size(1)
            .max_array_size(10)
            .build()
            .unwrap();
        assert_eq!(
            built,
            "@JsonField('jsonb', { minArraySize: 1, maxArraySize: 10 })"
        );
    }

    #[test]
    fn test_input_context_omits_column_type() {
        let built = JsonFieldBuilder::new()
            .jsonb(true)
            .input_type(InputKind::Update)
            .build()
            .unwrap();
        assert_eq!(built, "@JsonField({ inputType: 'update' })");
    }
}
