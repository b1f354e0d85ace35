//! Foreign key column annotations.

use super::options::{MetadataOptions, WithMetadata, decorator};

/// Builds the annotations of a `<relation>Id` column.
///
/// The API annotation, when exposed, always precedes the persistence one.
#[derive(Debug, Clone)]
pub struct ForeignKeyBuilder {
    expose: bool,
    persist: bool,
    options: MetadataOptions,
}

impl Default for ForeignKeyBuilder {
    fn default() -> Self {
        Self {
            expose: true,
            persist: true,
            options: MetadataOptions::new(),
        }
    }
}

impl ForeignKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `@Field(() => ID)`.
    pub fn expose(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    /// Emit `@Column`. Input types carry no persistence annotation.
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn build(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(2);
        if self.expose {
            let mut entries = Vec::new();
            if let Some(description) = self.options.get_description() {
                entries.push(("description", super::quote(description)));
            }
            if self.options.is_nullable() {
                entries.push(("nullable", "true".to_string()));
            }
            out.push(decorator("Field", &["() => ID".to_string()], &entries));
        }
        if self.persist {
            let mut entries = vec![("type", "'varchar'".to_string())];
            if self.options.is_nullable() {
                entries.push(("nullable", "true".to_string()));
            }
            out.push(decorator("Column", &[], &entries));
        }
        out
    }
}

impl WithMetadata for ForeignKeyBuilder {
    fn options(&self) -> &MetadataOptions {
        &self.options
    }

    fn with_options(self, options: MetadataOptions) -> Self {
        Self { options, ..self }
    }
}
