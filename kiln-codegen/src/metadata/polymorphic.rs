//! Id and discriminator annotations for polymorphic relations.

use super::{
    literal::quote,
    options::{MetadataOptions, WithMetadata, decorator},
};

/// Builds the paired annotations of a polymorphic relation.
///
/// Both columns share one nullability; the discriminator lists the allowed
/// target entity names.
#[derive(Debug, Clone)]
pub struct PolymorphicBuilder<'a> {
    relation: &'a str,
    targets: &'a [String],
    expose: bool,
    persist: bool,
    options: MetadataOptions,
}

impl<'a> PolymorphicBuilder<'a> {
    pub fn new(relation: &'a str, targets: &'a [String]) -> Self {
        Self {
            relation,
            targets,
            expose: true,
            persist: true,
            options: MetadataOptions::new(),
        }
    }

    pub fn expose(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn build_id(&self) -> Vec<String> {
        self.build_column("ID", "PolymorphicIdColumn", None)
    }

    pub fn build_type(&self) -> Vec<String> {
        let targets: Vec<String> = self.targets.iter().map(|t| quote(t)).collect();
        let targets = format!("[{}]", targets.join(", "));
        self.build_column("String", "PolymorphicTypeColumn", Some(targets))
    }

    fn build_column(&self, api_type: &str, column: &str, targets: Option<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(2);
        if self.expose {
            let mut entries = Vec::new();
            if let Some(description) = self.options.get_description() {
                entries.push(("description", quote(description)));
            }
            if self.options.is_nullable() {
                entries.push(("nullable", "true".to_string()));
            }
            out.push(decorator("Field", &[format!("() => {api_type}")], &entries));
        }
        if self.persist {
            let mut entries = Vec::new();
            if self.options.is_nullable() {
                entries.push(("nullable", "true".to_string()));
            }
            if let Some(targets) = targets {
                entries.push(("targets", targets));
            }
            out.push(decorator(column, &[quote(self.relation)], &entries));
        }
        out
    }
}

impl WithMetadata for PolymorphicBuilder<'_> {
    fn options(&self) -> &MetadataOptions {
        &self.options
    }

    fn with_options(self, options: MetadataOptions) -> Self {
        Self { options, ..self }
    }
}
