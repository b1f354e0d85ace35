//! Entity base class and scaffold.

use eyre::Result;
use kiln_core::{pluralize, to_snake_case};
use kiln_schema::{EntitySchema, EnumType};

use super::{ArtifactPhase, GenerationContext, PhaseOutput, failure_messages};
use crate::{
    artifact::{ArtifactKind, GeneratedArtifact},
    ast::{Class, CodeFile, EnumDecl, ImportCollector, Property},
    builder::{CodeFragment, Renderable},
    metadata::quote,
    settings::{TYPE_GRAPHQL, TYPEORM},
    strategy::{PreparedField, Target},
};

/// Produces `<Name>Base.ts` (regenerated) and `<Name>.ts` (scaffold).
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityPhase;

impl ArtifactPhase for EntityPhase {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn description(&self) -> &'static str {
        "Render the entity base class and its scaffold"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Entity
    }

    fn run(&self, ctx: &GenerationContext<'_>) -> Result<PhaseOutput> {
        let prepared = ctx.prepare(Target::Entity)?;
        let name = &ctx.entity.name;
        let paths = &ctx.settings.paths;

        Ok(PhaseOutput::new()
            .file(GeneratedArtifact::base(
                paths.entity_base(name),
                render_base(ctx, &prepared.fields),
            ))
            .file(GeneratedArtifact::scaffold(
                paths.entity(name),
                render_scaffold(ctx.entity),
            ))
            .errors(failure_messages(&prepared)))
    }
}

/// Database table: explicit, else the snake_case plural of the entity.
pub fn table_name(entity: &EntitySchema) -> String {
    entity
        .table
        .clone()
        .unwrap_or_else(|| to_snake_case(&pluralize(&entity.name)))
}

/// An enum declaration followed by its API registration.
struct RegisteredEnum<'a>(&'a EnumType);

impl Renderable for RegisteredEnum<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let name = &self.0.name;
        let mut out = EnumDecl::new(name, &self.0.values).to_fragments();
        out.push(CodeFragment::blank());
        out.push(CodeFragment::line(format!(
            "registerEnumType({name}, {{ name: '{name}' }});"
        )));
        out
    }
}

fn render_base(ctx: &GenerationContext<'_>, fields: &[PreparedField]) -> String {
    let entity = ctx.entity;
    let timestamps = ctx.settings.timestamps;

    let mut imports = ImportCollector::new();
    imports.add(TYPE_GRAPHQL, "Field");
    imports.add(TYPE_GRAPHQL, "ID");
    imports.add(TYPE_GRAPHQL, "ObjectType");
    if !ctx.enums.is_empty() {
        imports.add(TYPE_GRAPHQL, "registerEnumType");
    }
    imports.add(TYPEORM, "PrimaryGeneratedColumn");
    if timestamps {
        imports.add(TYPEORM, "CreateDateColumn");
        imports.add(TYPEORM, "UpdateDateColumn");
    }
    for field in fields {
        imports.merge(&field.imports);
    }

    let mut class = Class::new(format!("{}Base", entity.name))
        .decorator("@ObjectType({ isAbstract: true })")
        .abstract_class();
    if let Some(description) = &entity.description {
        class = class.doc(description.clone());
    }

    class = class.property(
        Property::new("id", "string")
            .decorator("@Field(() => ID)")
            .decorator("@PrimaryGeneratedColumn('uuid')"),
    );
    for field in fields {
        class = class.property(field.to_property());
    }
    if timestamps {
        class = class
            .property(
                Property::new("createdAt", "Date")
                    .decorator("@Field(() => Date)")
                    .decorator("@CreateDateColumn()"),
            )
            .property(
                Property::new("updatedAt", "Date")
                    .decorator("@Field(() => Date)")
                    .decorator("@UpdateDateColumn()"),
            );
    }

    CodeFile::new()
        .imports(&imports)
        .add_all(ctx.enums.iter().map(RegisteredEnum))
        .add(class)
        .render()
}

fn render_scaffold(entity: &EntitySchema) -> String {
    let name = &entity.name;
    let mut imports = ImportCollector::new();
    imports.add(TYPE_GRAPHQL, "ObjectType");
    imports.add(TYPEORM, "Entity");
    imports.add(&format!("./{name}Base"), &format!("{name}Base"));

    let class = Class::new(name)
        .decorator("@ObjectType()")
        .decorator(format!("@Entity({})", quote(&table_name(entity))))
        .extends(format!("{name}Base"));

    CodeFile::new().imports(&imports).add(class).render()
}
