//! Create and update input classes.

use eyre::Result;
use indexmap::IndexSet;

use super::{ArtifactPhase, GenerationContext, PhaseOutput, failure_messages};
use crate::{
    artifact::{ArtifactKind, GeneratedArtifact},
    ast::{Class, CodeFile, ImportCollector, Property},
    settings::{TYPE_GRAPHQL, relative_module},
    strategy::{PreparedField, Target},
};

/// Produces `<Name>Inputs.ts` with `Create<Name>Input` and `Update<Name>Input`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputsPhase;

impl ArtifactPhase for InputsPhase {
    fn name(&self) -> &'static str {
        "inputs"
    }

    fn description(&self) -> &'static str {
        "Render the create and update input classes"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Inputs
    }

    fn run(&self, ctx: &GenerationContext<'_>) -> Result<PhaseOutput> {
        let name = &ctx.entity.name;
        let paths = &ctx.settings.paths;
        // Enums are declared next to the entity base class.
        let enum_module = relative_module(&paths.inputs, &paths.entities, &format!("{name}Base"));

        let create_ctx = ctx
            .prepare_context(Target::CreateInput)
            .with_enum_module(&enum_module);
        let update_ctx = ctx
            .prepare_context(Target::UpdateInput)
            .with_enum_module(&enum_module);
        let create = ctx.registry.prepare_all(&create_ctx)?;
        let update = ctx.registry.prepare_all(&update_ctx)?;

        // Shared failures are reported once.
        let errors: IndexSet<String> = failure_messages(&create)
            .chain(failure_messages(&update))
            .collect();

        let mut imports = ImportCollector::new();
        imports.add(TYPE_GRAPHQL, "Field");
        imports.add(TYPE_GRAPHQL, "ID");
        imports.add(TYPE_GRAPHQL, "InputType");
        for field in create.fields.iter().chain(&update.fields) {
            imports.merge(&field.imports);
        }

        let create_class = input_class(format!("Create{name}Input"), None, &create.fields);
        let update_id = Property::new("id", "string").decorator("@Field(() => ID)");
        let update_class =
            input_class(format!("Update{name}Input"), Some(update_id), &update.fields);
        let content = CodeFile::new()
            .imports(&imports)
            .add(create_class)
            .add(update_class)
            .render();

        Ok(PhaseOutput::new()
            .file(GeneratedArtifact::base(paths.inputs(name), content))
            .errors(errors))
    }
}

fn input_class(name: String, id: Option<Property>, fields: &[PreparedField]) -> Class {
    let mut class = Class::new(name).decorator("@InputType()");
    if let Some(id) = id {
        class = class.property(id);
    }
    for field in fields {
        class = class.property(field.to_property());
    }
    class
}

#[cfg(test)]
mod tests {
    use kiln_core::ScalarType;
    use kiln_schema::{EntitySchema, EnumType, FieldOptions, FieldSpec, Relationship};
    use serde_json::json;

    use super::*;
    use crate::{enums::EnumRegistry, settings::GeneratorSettings, strategy::StrategyRegistry};

    fn run(entity: &EntitySchema) -> PhaseOutput {
        let enums = EnumRegistry::from_entity(entity).unwrap();
        let registry = StrategyRegistry::builtin();
        let settings = GeneratorSettings::default();
        let ctx = GenerationContext {
            entity,
            enums: &enums,
            registry: &registry,
            settings: &settings,
        };
        InputsPhase.run(&ctx).unwrap()
    }

    #[test]
    fn test_create_and_update() {
        let entity = EntitySchema::new("Post")
            .field(FieldSpec::new("title", ScalarType::String))
            .field(FieldSpec::new("views", ScalarType::Integer).default_value(json!(0)));
        let output = run(&entity);
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].path, "src/inputs/PostInputs.ts");
        assert_eq!(
            output.files[0].content,
            "import { Field, ID, InputType, Int } from 'type-graphql';\n\
             \n\
             @InputType()\n\
             export class CreatePostInput {\n\
             \x20 @Field(() => String)\n\
             \x20 title!: string;\n\
             \n\
             \x20 @Field(() => Int, { defaultValue: 0 })\n\
             \x20 views!: number;\n\
             }\n\
             \n\
             @InputType()\n\
             export class UpdatePostInput {\n\
             \x20 @Field(() => ID)\n\
             \x20 id!: string;\n\
             \n\
             \x20 @Field(() => String, { nullable: true })\n\
             \x20 title?: string;\n\
             \n\
             \x20 @Field(() => Int, { nullable: true })\n\
             \x20 views?: number;\n\
             }\n"
        );
    }

    #[test]
    fn test_enum_is_imported_from_entity_base() {
        let entity = EntitySchema::new("Post").field(
            FieldSpec::new("status", ScalarType::Enum)
                .enum_type(EnumType::new("PostStatus", ["DRAFT", "PUBLISHED"])),
        );
        let output = run(&entity);
        let content = &output.files[0].content;
        assert!(content.contains("import { PostStatus } from '../entities/PostBase';\n"));
        assert!(content.contains("import { EnumField } from '@kiln/runtime';\n"));
    }

    #[test]
    fn test_relations_and_disabled_fields_are_omitted() {
        let entity = EntitySchema::new("Post")
            .field(
                FieldSpec::new("authorId", ScalarType::String)
                    .relationship(Relationship::many_to_one("Author")),
            )
            .field(FieldSpec::new("slug", ScalarType::String).options(FieldOptions {
                input: false,
                ..FieldOptions::default()
            }));
        let output = run(&entity);
        let content = &output.files[0].content;
        assert!(content.contains("authorId!: string;"));
        assert!(!content.contains("Relation<"));
        assert!(!content.contains("slug"));
    }

    #[test]
    fn test_update_input_skips_default_check() {
        let entity = EntitySchema::new("Post").field(
            FieldSpec::new("status", ScalarType::Enum)
                .enum_type(EnumType::new("PostStatus", ["DRAFT"]))
                .default_value(json!("ARCHIVED")),
        );
        let output = run(&entity);
        assert_eq!(output.errors.len(), 1);
        assert!(output.errors[0].contains("ARCHIVED"));
        assert_eq!(output.files.len(), 1);
    }
}
