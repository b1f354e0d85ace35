//! Navigation property annotations for non-polymorphic relations.

use kiln_core::lower_first;
use kiln_schema::{RelationKind, Relationship};

use super::{
    literal::quote,
    options::{MetadataOptions, WithMetadata, decorator},
};

/// Builds `@ManyToOne(...)` and friends, plus `@JoinColumn` / `@JoinTable`.
#[derive(Debug, Clone)]
pub struct RelationBuilder<'a> {
    relationship: &'a Relationship,
    inverse: Option<String>,
    join_column: Option<String>,
    join_table: bool,
    expose: bool,
    options: MetadataOptions,
}

impl<'a> RelationBuilder<'a> {
    pub fn new(relationship: &'a Relationship) -> Self {
        Self {
            relationship,
            inverse: relationship.inverse.clone(),
            join_column: None,
            join_table: false,
            expose: true,
            options: MetadataOptions::new(),
        }
    }

    /// Property on the target entity pointing back here.
    pub fn inverse(mut self, inverse: Option<String>) -> Self {
        self.inverse = inverse;
        self
    }

    /// Name the owning foreign key column.
    pub fn join_column(mut self, column: impl Into<String>) -> Self {
        self.join_column = Some(column.into());
        self
    }

    pub fn join_table(mut self, join_table: bool) -> Self {
        self.join_table = join_table;
        self
    }

    pub fn expose(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    pub fn build(&self) -> Vec<String> {
        let target = &self.relationship.target;
        let collection = self.relationship.kind.is_collection();
        let nullable = !collection && self.options.is_nullable();
        let mut out = Vec::with_capacity(3);

        if self.expose {
            let api_type = if collection {
                format!("() => [{target}]")
            } else {
                format!("() => {target}")
            };
            let mut entries = Vec::new();
            if let Some(description) = self.options.get_description() {
                entries.push(("description", quote(description)));
            }
            if nullable {
                entries.push(("nullable", "true".to_string()));
            }
            out.push(decorator("Field", &[api_type], &entries));
        }

        let mut args = vec![format!("() => {target}")];
        if let Some(inverse) = &self.inverse {
            let param = lower_first(target);
            args.push(format!("({param}) => {param}.{inverse}"));
        }
        let mut entries = Vec::new();
        if nullable {
            entries.push(("nullable", "true".to_string()));
        }
        out.push(decorator(kind_decorator(self.relationship.kind), &args, &entries));

        if let Some(column) = &self.join_column {
            out.push(decorator("JoinColumn", &[], &[("name", quote(column))]));
        }
        if self.join_table {
            out.push("@JoinTable()".to_string());
        }
        out
    }
}

/// TypeORM decorator for a relation kind.
pub fn kind_decorator(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::ManyToOne => "ManyToOne",
        RelationKind::OneToOne => "OneToOne",
        RelationKind::OneToMany => "OneToMany",
        RelationKind::ManyToMany => "ManyToMany",
    }
}

impl WithMetadata for RelationBuilder<'_> {
    fn options(&self) -> &MetadataOptions {
        &self.options
    }

    fn with_options(self, options: MetadataOptions) -> Self {
        Self { options, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_many_to_one_with_join_column() {
        let rel = Relationship::many_to_one("Author");
        let built = RelationBuilder::new(&rel)
            .required(false)
            .join_column("authorId")
            .build();
        assert_eq!(
            built,
            [
                "@Field(() => Author, { nullable: true })",
                "@ManyToOne(() => Author, { nullable: true })",
                "@JoinColumn({ name: 'authorId' })",
            ]
        );
    }

    #[test]
    fn test_one_to_many_with_inverse() {
        let rel = Relationship::new(RelationKind::OneToMany, "Comment").inverse("post");
        let built = RelationBuilder::new(&rel).expose(false).required(false).build();
        assert_eq!(built, ["@OneToMany(() => Comment, (comment) => comment.post)"]);
    }

    #[test]
    fn test_many_to_many_join_table() {
        let rel = Relationship::new(RelationKind::ManyToMany, "Tag");
        let built = RelationBuilder::new(&rel).join_table(true).build();
        assert_eq!(
            built,
            ["@Field(() => [Tag])", "@ManyToMany(() => Tag)", "@JoinTable()"]
        );
    }
}
