//! `@Field` / `@Column` annotations for plain scalar fields.

use kiln_core::TypeMapping;

use super::{
    literal::{quote, to_ts_literal},
    options::{MetadataOptions, WithMetadata, decorator},
};
use crate::error::SerializationError;

/// Builds the native type-graphql and TypeORM annotations of a scalar.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    mapping: TypeMapping,
    expose: bool,
    options: MetadataOptions,
}

impl ColumnBuilder {
    pub fn new(mapping: TypeMapping) -> Self {
        Self {
            mapping,
            expose: true,
            options: MetadataOptions::new(),
        }
    }

    pub fn expose(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    /// `() => Int` or `() => [Int]`.
    fn api_type(&self) -> String {
        let api = self.mapping.api_kind.as_str();
        if self.options.is_array() {
            format!("() => [{api}]")
        } else {
            format!("() => {api}")
        }
    }

    fn api_entries(&self, default: Option<&String>) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(description) = self.options.get_description() {
            entries.push(("description", quote(description)));
        }
        if self.options.is_nullable() {
            entries.push(("nullable", "true".to_string()));
        }
        if let Some(default) = default {
            entries.push(("defaultValue", default.clone()));
        }
        entries
    }

    pub fn build(&self) -> Result<Vec<String>, SerializationError> {
        let default = self
            .options
            .get_default_value()
            .map(to_ts_literal)
            .transpose()?;

        if self.options.get_input_type().is_some() {
            let entries = self.api_entries(default.as_ref());
            return Ok(vec![decorator("Field", &[self.api_type()], &entries)]);
        }

        let mut out = Vec::with_capacity(2);
        if self.expose {
            out.push(decorator("Field", &[self.api_type()], &self.api_entries(None)));
        }

        let mut column = vec![("type", quote(self.mapping.column_kind.as_str()))];
        if self.options.is_nullable() {
            column.push(("nullable", "true".to_string()));
        }
        if self.options.is_array() {
            column.push(("array", "true".to_string()));
        }
        if let Some(default) = default {
            column.push(("default", default));
        }
        out.push(decorator("Column", &[], &column));
        Ok(out)
    }
}

impl WithMetadata for ColumnBuilder {
    fn options(&self) -> &MetadataOptions {
        &self.options
    }

    fn with_options(self, options: MetadataOptions) -> Self {
        Self { options, ..self }
    }
}
