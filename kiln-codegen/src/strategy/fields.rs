//! Per-strategy field preparation.

use kiln_core::{ApiKind, ScalarType, lower_first, wrap_array};
use kiln_schema::{FieldSpec, ItemSchema, RelationKind, Relationship};
use serde_json::Value;

use super::{PrepareContext, PreparedField, Target};
use crate::{
    error::{GenerateError, SerializationError},
    metadata::{
        ColumnBuilder, EnumFieldBuilder, ForeignKeyBuilder, JsonFieldBuilder, MetadataOptions,
        PolymorphicBuilder, RelationBuilder, WithMetadata, check_default, kind_decorator, quote,
    },
    settings::{GRAPHQL_SCALARS, TYPE_GRAPHQL, TYPEORM},
};

type Prepared = Result<Option<Vec<PreparedField>>, GenerateError>;

/// Options every builder starts from: context tag, description, nullability.
fn base_options(field: &FieldSpec, ctx: &PrepareContext<'_>) -> MetadataOptions {
    let mut options = MetadataOptions::new().required(ctx.is_required(field));
    if let Some(kind) = ctx.target.input_kind() {
        options = options.input_type(kind);
    }
    if let Some(description) = &field.description {
        options = options.description(description.clone());
    }
    options
}

fn with_array_bounds(mut options: MetadataOptions, field: &FieldSpec) -> MetadataOptions {
    if let Some(min) = field.min_array_size {
        options = options.min_array_size(min);
    }
    if let Some(max) = field.max_array_size {
        options = options.max_array_size(max);
    }
    options
}

fn missing_relationship(field: &FieldSpec) -> GenerateError {
    GenerateError::Classification {
        field: field.name.clone(),
    }
}

fn serialization(field: &FieldSpec) -> impl FnOnce(SerializationError) -> GenerateError + '_ {
    move |source| GenerateError::serialization(&field.name, source)
}

/// Polymorphic relation: an id column plus a discriminator column.
pub(super) fn polymorphic(field: &FieldSpec, ctx: &PrepareContext<'_>) -> Prepared {
    let rel = field
        .relationship
        .as_ref()
        .ok_or_else(|| missing_relationship(field))?;
    let (id_name, type_name) = field.polymorphic_names();
    let relation = field.relation_property_name();
    let nullable = !ctx.is_required(field);
    let persist = !ctx.target.is_input();
    let expose = ctx.target.is_input() || ctx.expose(field);

    let mut options = MetadataOptions::new().required(!nullable);
    if let Some(description) = &field.description {
        options = options.description(description.clone());
    }
    let builder = PolymorphicBuilder::new(relation, &rel.targets)
        .expose(expose)
        .persist(persist)
        .with_options(options);

    let discriminator = if rel.targets.is_empty() {
        "string".to_string()
    } else {
        rel.targets
            .iter()
            .map(|t| quote(t))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let id = PreparedField::new(id_name, "string")
        .nullable(nullable)
        .polymorphic_id()
        .decorators(builder.build_id())
        .import_if(expose, TYPE_GRAPHQL, "Field")
        .import_if(expose, TYPE_GRAPHQL, "ID")
        .import_if(persist, &ctx.settings.runtime, "PolymorphicIdColumn");
    let ty = PreparedField::new(type_name, discriminator)
        .nullable(nullable)
        .polymorphic_type()
        .decorators(builder.build_type())
        .import_if(expose, TYPE_GRAPHQL, "Field")
        .import_if(persist, &ctx.settings.runtime, "PolymorphicTypeColumn");
    Ok(Some(vec![id, ty]))
}

/// Owning relation: the `<relation>Id` column, then the navigation property.
pub(super) fn foreign_key(field: &FieldSpec, ctx: &PrepareContext<'_>) -> Prepared {
    let rel = field
        .relationship
        .as_ref()
        .ok_or_else(|| missing_relationship(field))?;
    let fk_name = field.foreign_key_name();
    let nullable = !ctx.is_required(field);
    let persist = !ctx.target.is_input();
    let expose = ctx.target.is_input() || ctx.expose_foreign_key(field);

    let mut options = MetadataOptions::new().required(!nullable);
    if let Some(description) = &field.description {
        options = options.description(description.clone());
    }
    let decorators = ForeignKeyBuilder::new()
        .expose(expose)
        .persist(persist)
        .with_options(options)
        .build();

    let fk = PreparedField::new(fk_name.clone(), "string")
        .nullable(nullable)
        .foreign_key()
        .decorators(decorators)
        .import_if(expose, TYPE_GRAPHQL, "Field")
        .import_if(expose, TYPE_GRAPHQL, "ID")
        .import_if(persist, TYPEORM, "Column");

    let mut out = vec![fk];
    if ctx.target == Target::Entity && field.relation_property_name() != fk_name {
        out.push(navigation(field, rel, ctx, Some(&fk_name)));
    }
    Ok(Some(out))
}

/// Field typed by a registered enum.
pub(super) fn enumeration(field: &FieldSpec, ctx: &PrepareContext<'_>) -> Prepared {
    let declared = field.enum_type.as_ref();
    let Some(enum_type) = declared.and_then(|e| ctx.enums.get(&e.name)) else {
        return Err(GenerateError::UnregisteredEnum {
            field: field.name.clone(),
            name: declared.map(|e| e.name.clone()).unwrap_or_default(),
        });
    };

    let mut options = with_array_bounds(base_options(field, ctx).array(field.array), field);
    if ctx.carries_default() {
        if let Some(default) = &field.default_value {
            options = options.default_value(default.clone());
        }
    }
    let decorator = EnumFieldBuilder::new(enum_type)
        .with_options(options)
        .build()
        .map_err(serialization(field))?;

    let ts_type = if field.array {
        ctx.mapper.map_array_type(&enum_type.name)
    } else {
        enum_type.name.clone()
    };
    let mut prepared = PreparedField::new(field.property_name(), ts_type)
        .nullable(!ctx.is_required(field))
        .decorators(vec![decorator])
        .import(&ctx.settings.runtime, "EnumField");
    if let Some(module) = ctx.enum_module {
        prepared = prepared.import(module, &enum_type.name);
    }
    Ok(Some(vec![prepared]))
}

/// JSON column holding an array, typed by the item schema or the element type.
pub(super) fn json_array(field: &FieldSpec, ctx: &PrepareContext<'_>) -> Prepared {
    let element = match &field.item_schema {
        Some(items) => item_type(items, ctx),
        None => ctx.mapper.map_type(field.field_type).language_type.to_string(),
    };
    let ts_type = ctx.mapper.map_array_type(&element);

    let mut options = with_array_bounds(base_options(field, ctx).array(true), field);
    match (&field.default_value, ctx.target) {
        (Some(default), Target::Entity | Target::CreateInput) => {
            check_default(field.field_type, true, default).map_err(serialization(field))?;
            options = options.default_value(default.clone());
        }
        (None, Target::Entity) => options = options.default_value(Value::Array(Vec::new())),
        _ => {}
    }

    let decorator = JsonFieldBuilder::new()
        .jsonb(field.field_type == ScalarType::Jsonb)
        .with_options(options)
        .build()
        .map_err(serialization(field))?;

    Ok(Some(vec![
        PreparedField::new(field.property_name(), ts_type)
            .nullable(!ctx.is_required(field))
            .decorators(vec![decorator])
            .import(&ctx.settings.runtime, "JsonField"),
    ]))
}

/// Everything else: plain columns, JSON objects and non-owning relations.
pub(super) fn scalar(field: &FieldSpec, ctx: &PrepareContext<'_>) -> Prepared {
    if let Some(rel) = &field.relationship {
        if ctx.target.is_input() {
            return Ok(None);
        }
        return Ok(Some(vec![navigation(field, rel, ctx, None)]));
    }

    let default = match &field.default_value {
        Some(default) if ctx.carries_default() => {
            check_default(field.field_type, field.array, default).map_err(serialization(field))?;
            Some(default.clone())
        }
        _ => None,
    };
    let nullable = !ctx.is_required(field);

    if field.field_type.is_json() {
        let mut options = base_options(field, ctx);
        if let Some(default) = default {
            options = options.default_value(default);
        }
        let decorator = JsonFieldBuilder::new()
            .jsonb(field.field_type == ScalarType::Jsonb)
            .with_options(options)
            .build()
            .map_err(serialization(field))?;
        let language = ctx.mapper.map_type(field.field_type).language_type;
        let ts_type = if field.array {
            ctx.mapper.map_array_type(language)
        } else {
            language.to_string()
        };
        return Ok(Some(vec![
            PreparedField::new(field.property_name(), ts_type)
                .nullable(nullable)
                .decorators(vec![decorator])
                .import(&ctx.settings.runtime, "JsonField"),
        ]));
    }

    let mapping = ctx.mapper.map_type(field.field_type);
    let mut options = with_array_bounds(base_options(field, ctx).array(field.array), field);
    if let Some(default) = default {
        options = options.default_value(default);
    }
    let expose = ctx.target.is_input() || ctx.expose(field);
    let decorators = ColumnBuilder::new(mapping)
        .expose(expose)
        .with_options(options)
        .build()
        .map_err(serialization(field))?;

    let ts_type = if field.array {
        ctx.mapper.map_array_type(mapping.language_type)
    } else {
        mapping.language_type.to_string()
    };
    let mut prepared = PreparedField::new(field.property_name(), ts_type)
        .nullable(nullable)
        .decorators(decorators)
        .import_if(expose, TYPE_GRAPHQL, "Field")
        .import_if(!ctx.target.is_input(), TYPEORM, "Column");
    if expose {
        if let Some((module, symbol)) = api_import(mapping.api_kind) {
            prepared = prepared.import(module, symbol);
        }
    }
    Ok(Some(vec![prepared]))
}

/// API scalars that are not TypeScript globals.
fn api_import(kind: ApiKind) -> Option<(&'static str, &'static str)> {
    match kind {
        ApiKind::Id => Some((TYPE_GRAPHQL, "ID")),
        ApiKind::Int => Some((TYPE_GRAPHQL, "Int")),
        ApiKind::Float => Some((TYPE_GRAPHQL, "Float")),
        ApiKind::Json => Some((GRAPHQL_SCALARS, "GraphQLJSON")),
        ApiKind::String | ApiKind::Boolean | ApiKind::DateTime | ApiKind::Enum => None,
    }
}

/// `{ label: string; weight?: number }`
fn item_type(items: &ItemSchema, ctx: &PrepareContext<'_>) -> String {
    if items.properties.is_empty() {
        return "Record<string, unknown>".to_string();
    }
    let members: Vec<String> = items
        .properties
        .iter()
        .map(|property| {
            let language = ctx.mapper.map_type(property.field_type).language_type;
            let ty = if property.array {
                ctx.mapper.map_array_type(language)
            } else {
                language.to_string()
            };
            let optional = if property.required { "" } else { "?" };
            format!("{}{}: {}", property.name, optional, ty)
        })
        .collect();
    format!("{{ {} }}", members.join("; "))
}

/// Relation navigation property on the entity.
fn navigation(
    field: &FieldSpec,
    rel: &Relationship,
    ctx: &PrepareContext<'_>,
    join_column: Option<&str>,
) -> PreparedField {
    let entity = &ctx.entity.name;
    let collection = rel.kind.is_collection();
    let inverse = match (&rel.inverse, rel.kind) {
        (Some(inverse), _) => Some(inverse.clone()),
        (None, RelationKind::OneToMany) => Some(lower_first(entity)),
        (None, _) => None,
    };
    // Exactly one side of a bidirectional many-to-many owns the join table.
    let join_table = rel.kind == RelationKind::ManyToMany
        && (rel.inverse.is_none() || entity.as_str() <= rel.target.as_str());
    let expose = ctx.expose(field);

    let mut builder = RelationBuilder::new(rel)
        .inverse(inverse)
        .join_table(join_table)
        .expose(expose)
        .required(field.required);
    if let Some(column) = join_column {
        builder = builder.join_column(column);
    }

    let target_type = if collection {
        wrap_array(&rel.target)
    } else {
        rel.target.clone()
    };
    let name = if join_column.is_some() {
        field.relation_property_name()
    } else {
        field.property_name()
    };

    PreparedField::new(name, format!("Relation<{target_type}>"))
        .nullable(!field.required)
        .relation()
        .decorators(builder.build())
        .import_if(expose, TYPE_GRAPHQL, "Field")
        .import(TYPEORM, kind_decorator(rel.kind))
        .import(TYPEORM, "Relation")
        .import_if(join_column.is_some(), TYPEORM, "JoinColumn")
        .import_if(join_table, TYPEORM, "JoinTable")
        .import(&format!("./{}", rel.target), &rel.target)
}

#[cfg(test)]
mod tests {
    use kiln_schema::{EntitySchema, EnumType, FieldOptions};
    use serde_json::json;

    use super::*;
    use crate::{enums::EnumRegistry, settings::GeneratorSettings, strategy::Strategy};

    struct Fixture {
        entity: EntitySchema,
        enums: EnumRegistry,
        settings: GeneratorSettings,
    }

    impl Fixture {
        fn new(entity: EntitySchema) -> Self {
            let enums = EnumRegistry::from_entity(&entity).unwrap();
            Self {
                entity,
                enums,
                settings: GeneratorSettings::default(),
            }
        }

        fn ctx(&self, target: Target) -> PrepareContext<'_> {
            PrepareContext::new(&self.entity, &self.enums, &self.settings, target)
        }

        fn prepare(&self, strategy: Strategy, field: &str, target: Target) -> Vec<PreparedField> {
            let field = self.entity.get_field(field).unwrap();
            strategy.prepare(field, &self.ctx(target)).unwrap().unwrap()
        }
    }

    fn status_field(array: bool, default: Value) -> FieldSpec {
        FieldSpec::new("status", ScalarType::Enum)
            .enum_type(EnumType::new("Status", ["DRAFT", "PUBLISHED"]))
            .array(array)
            .default_value(default)
    }

    #[test]
    fn test_enum_scalar_default() {
        let fixture =
            Fixture::new(EntitySchema::new("Post").field(status_field(false, json!("DRAFT"))));
        let prepared = fixture.prepare(Strategy::Enum, "status", Target::Entity);
        assert_eq!(prepared[0].ts_type, "Status");
        assert!(prepared[0].decorators[0].contains("defaultValue: Status.DRAFT"));
        assert!(prepared[0].imports.has_symbol("@kiln/runtime", "EnumField"));
    }

    #[test]
    fn test_enum_array_default() {
        let fixture =
            Fixture::new(EntitySchema::new("Post").field(status_field(true, json!("DRAFT"))));
        let prepared = fixture.prepare(Strategy::Enum, "status", Target::Entity);
        assert_eq!(prepared[0].ts_type, "Status[]");
        assert!(prepared[0].decorators[0].contains("defaultValue: [Status.DRAFT]"));
    }

    #[test]
    fn test_enum_input_imports_declaring_module() {
        let fixture =
            Fixture::new(EntitySchema::new("Post").field(status_field(false, json!("DRAFT"))));
        let field = fixture.entity.get_field("status").unwrap();
        let ctx = fixture
            .ctx(Target::UpdateInput)
            .with_enum_module("../entities/PostBase");
        let prepared = Strategy::Enum.prepare(field, &ctx).unwrap().unwrap();
        assert_eq!(prepared[0].decorators, ["@EnumField(() => Status, { inputType: 'update' })"]);
        assert!(prepared[0].nullable);
        assert!(prepared[0].imports.has_symbol("../entities/PostBase", "Status"));
    }

    #[test]
    fn test_unregistered_enum() {
        let entity = EntitySchema::new("Post").field(status_field(false, json!("DRAFT")));
        let enums = EnumRegistry::new();
        let settings = GeneratorSettings::default();
        let ctx = PrepareContext::new(&entity, &enums, &settings, Target::Entity);
        let err = Strategy::Enum.prepare(&entity.fields[0], &ctx).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnregisteredEnum { ref name, .. } if name == "Status"
        ));
    }

    #[test]
    fn test_foreign_key_and_navigation() {
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(
                FieldSpec::new("authorId", ScalarType::String)
                    .required(false)
                    .relationship(Relationship::many_to_one("Author")),
            ),
        );
        let prepared = fixture.prepare(Strategy::ForeignKey, "authorId", Target::Entity);
        assert_eq!(prepared.len(), 2);

        let fk = &prepared[0];
        assert_eq!(fk.name, "authorId");
        assert_eq!(fk.ts_type, "string");
        assert!(fk.is_foreign_key && fk.nullable);
        assert_eq!(
            fk.decorators,
            [
                "@Field(() => ID, { nullable: true })",
                "@Column({ type: 'varchar', nullable: true })",
            ]
        );

        let nav = &prepared[1];
        assert_eq!(nav.name, "author");
        assert_eq!(nav.ts_type, "Relation<Author>");
        assert!(nav.is_relation);
        assert!(nav.decorators.contains(&"@JoinColumn({ name: 'authorId' })".to_string()));
        assert!(nav.imports.has_symbol("./Author", "Author"));
    }

    #[test]
    fn test_foreign_key_name_is_appended_once() {
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(
                FieldSpec::new("author", ScalarType::String)
                    .required(true)
                    .relationship(Relationship::many_to_one("User")),
            ),
        );
        let prepared = fixture.prepare(Strategy::ForeignKey, "author", Target::Entity);
        assert_eq!(prepared[0].name, "authorId");
        assert!(!prepared[0].nullable);
        assert_eq!(prepared[1].name, "author");
    }

    #[test]
    fn test_foreign_key_exposure_follows_settings() {
        let mut fixture = Fixture::new(
            EntitySchema::new("Post").field(
                FieldSpec::new("authorId", ScalarType::String)
                    .required(false)
                    .relationship(Relationship::many_to_one("Author")),
            ),
        );
        fixture.settings.expose_foreign_keys = false;
        let prepared = fixture.prepare(Strategy::ForeignKey, "authorId", Target::Entity);
        assert_eq!(prepared[0].decorators, ["@Column({ type: 'varchar', nullable: true })"]);

        // Inputs always accept the key.
        let prepared = fixture.prepare(Strategy::ForeignKey, "authorId", Target::CreateInput);
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].decorators, ["@Field(() => ID, { nullable: true })"]);
    }

    #[test]
    fn test_polymorphic_pair() {
        let fixture = Fixture::new(
            EntitySchema::new("Comment").field(
                FieldSpec::new("commentable", ScalarType::String)
                    .relationship(Relationship::polymorphic(["Post", "Photo"])),
            ),
        );
        let prepared = fixture.prepare(Strategy::Polymorphic, "commentable", Target::Entity);
        let [id, ty] = prepared.as_slice() else {
            panic!("expected two fields, got {prepared:?}");
        };
        assert_eq!(id.name, "commentableId");
        assert!(id.is_polymorphic_id);
        assert_eq!(ty.name, "commentableType");
        assert_eq!(ty.ts_type, "'Post' | 'Photo'");
        assert!(ty.is_polymorphic_type);
        assert_eq!(id.nullable, ty.nullable);
        assert!(ty.decorators[1].contains("targets: ['Post', 'Photo']"));
    }

    #[test]
    fn test_json_array_never_flags_array() {
        let items = ItemSchema::new(vec![
            FieldSpec::new("label", ScalarType::String),
            FieldSpec::new("weight", ScalarType::Float).required(false),
        ]);
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(
                FieldSpec::new("links", ScalarType::Json)
                    .required(false)
                    .array(true)
                    .item_schema(items),
            ),
        );
        let prepared = fixture.prepare(Strategy::JsonArray, "links", Target::Entity);
        assert_eq!(prepared[0].ts_type, "Array<{ label: string; weight?: number }>");
        assert_eq!(
            prepared[0].decorators,
            ["@JsonField({ nullable: true, defaultValue: [] })"]
        );
    }

    #[test]
    fn test_primitive_array_default_is_checked() {
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(
                FieldSpec::new("scores", ScalarType::Integer)
                    .array(true)
                    .default_value(json!(["high"])),
            ),
        );
        let field = fixture.entity.get_field("scores").unwrap();
        let err = Strategy::JsonArray
            .prepare(field, &fixture.ctx(Target::Entity))
            .unwrap_err();
        assert!(err.is_field_level());
    }

    #[test]
    fn test_scalar_in_update_input_is_optional() {
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(FieldSpec::new("title", ScalarType::String)),
        );
        let prepared = fixture.prepare(Strategy::Scalar, "title", Target::UpdateInput);
        assert!(prepared[0].nullable);
        assert_eq!(prepared[0].decorators, ["@Field(() => String, { nullable: true })"]);
    }

    #[test]
    fn test_integer_imports_api_scalar() {
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(FieldSpec::new("views", ScalarType::Integer)),
        );
        let prepared = fixture.prepare(Strategy::Scalar, "views", Target::Entity);
        assert!(prepared[0].imports.has_symbol("type-graphql", "Int"));
        assert!(prepared[0].imports.has_symbol("typeorm", "Column"));
    }

    #[test]
    fn test_collection_relation_is_entity_only() {
        let fixture = Fixture::new(
            EntitySchema::new("Post").field(
                FieldSpec::new("comments", ScalarType::String)
                    .relationship(Relationship::new(RelationKind::OneToMany, "Comment")),
            ),
        );
        let prepared = fixture.prepare(Strategy::Scalar, "comments", Target::Entity);
        assert_eq!(prepared[0].ts_type, "Relation<Comment[]>");
        assert!(
            prepared[0]
                .decorators
                .contains(&"@OneToMany(() => Comment, (comment) => comment.post)".to_string())
        );

        let field = fixture.entity.get_field("comments").unwrap();
        let input = Strategy::Scalar
            .prepare(field, &fixture.ctx(Target::CreateInput))
            .unwrap();
        assert!(input.is_none());
    }

    #[test]
    fn test_input_disabled_field() {
        let options = FieldOptions {
            input: false,
            ..FieldOptions::default()
        };
        let fixture = Fixture::new(
            EntitySchema::new("Post")
                .field(FieldSpec::new("slug", ScalarType::String).options(options)),
        );
        let field = fixture.entity.get_field("slug").unwrap();
        assert!(
            Strategy::Scalar
                .prepare(field, &fixture.ctx(Target::CreateInput))
                .unwrap()
                .is_none()
        );
        assert!(Strategy::Scalar.prepare(field, &fixture.ctx(Target::Entity)).unwrap().is_some());
    }
}
