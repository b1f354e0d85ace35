//! CRUD resolver base class and scaffold.

use eyre::{Result, bail};
use kiln_core::{lower_first, pluralize};

use super::{ArtifactPhase, GenerationContext, PhaseOutput};
use crate::{
    artifact::{ArtifactKind, GeneratedArtifact},
    ast::{Class, CodeFile, ImportCollector, Method},
    settings::{TYPE_GRAPHQL, TYPEORM, relative_module},
};

/// Produces `<Name>ResolverBase.ts` (regenerated) and `<Name>Resolver.ts`
/// (scaffold).
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationsPhase;

impl ArtifactPhase for OperationsPhase {
    fn name(&self) -> &'static str {
        "operations"
    }

    fn description(&self) -> &'static str {
        "Render the CRUD resolver base class and its scaffold"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Operations
    }

    fn needs_enums(&self) -> bool {
        false
    }

    fn run(&self, ctx: &GenerationContext<'_>) -> Result<PhaseOutput> {
        let names = OperationNames::new(&ctx.entity.name)?;
        let paths = &ctx.settings.paths;

        let entity_module = relative_module(&paths.resolvers, &paths.entities, &names.entity);
        let inputs_module = relative_module(
            &paths.resolvers,
            &paths.inputs,
            &format!("{}Inputs", names.entity),
        );

        Ok(PhaseOutput::new()
            .file(GeneratedArtifact::base(
                paths.resolver_base(&names.entity),
                render_base(&names, &entity_module, &inputs_module),
            ))
            .file(GeneratedArtifact::scaffold(
                paths.resolver(&names.entity),
                render_scaffold(&names, &entity_module),
            )))
    }
}

/// Query and mutation names of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNames {
    pub entity: String,
    /// Get-one query, `post`.
    pub single: String,
    /// List query, `posts`.
    pub plural: String,
}

impl OperationNames {
    /// Fails when the plural equals the singular, since the get-one and list
    /// queries would then share a name.
    pub fn new(entity: &str) -> Result<Self> {
        let single = lower_first(entity);
        let plural = lower_first(&pluralize(entity));
        if single == plural {
            bail!(
                "entity {entity} has the same singular and plural form ('{single}'); \
                 the get-one and list queries would collide"
            );
        }
        Ok(Self {
            entity: entity.to_string(),
            single,
            plural,
        })
    }
}

fn render_base(names: &OperationNames, entity_module: &str, inputs_module: &str) -> String {
    let OperationNames {
        entity,
        single,
        plural,
    } = names;
    let create_input = format!("Create{entity}Input");
    let update_input = format!("Update{entity}Input");

    let mut imports = ImportCollector::new();
    for symbol in ["Arg", "ID", "Mutation", "Query", "Resolver"] {
        imports.add(TYPE_GRAPHQL, symbol);
    }
    imports.add(TYPEORM, "Repository");
    imports.add(entity_module, entity);
    imports.add(inputs_module, &create_input);
    imports.add(inputs_module, &update_input);

    let class = Class::new(format!("{entity}ResolverBase"))
        .decorator("@Resolver({ isAbstract: true })")
        .abstract_class()
        .method(Method::declaration(format!(
            "protected abstract repository(): Repository<{entity}>"
        )))
        .method(
            Method::new(format!(
                "async {single}(@Arg('id', () => ID) id: string): Promise<{entity} | null>"
            ))
            .decorator(format!("@Query(() => {entity}, {{ nullable: true }})"))
            .line("return this.repository().findOneBy({ id });"),
        )
        .method(
            Method::new(format!("async {plural}(): Promise<{entity}[]>"))
                .decorator(format!("@Query(() => [{entity}])"))
                .line("return this.repository().find();"),
        )
        .method(
            Method::new(format!(
                "async create{entity}(@Arg('input') input: {create_input}): Promise<{entity}>"
            ))
            .decorator(format!("@Mutation(() => {entity})"))
            .line("const repository = this.repository();")
            .line("return repository.save(repository.create(input));"),
        )
        .method(
            Method::new(format!(
                "async update{entity}(@Arg('input') input: {update_input}): Promise<{entity}>"
            ))
            .decorator(format!("@Mutation(() => {entity})"))
            .line("const { id, ...changes } = input;")
            .line("await this.repository().update(id, changes);")
            .line("return this.repository().findOneByOrFail({ id });"),
        )
        .method(
            Method::new(format!(
                "async delete{entity}(@Arg('id', () => ID) id: string): Promise<boolean>"
            ))
            .decorator("@Mutation(() => Boolean)")
            .line("const result = await this.repository().delete(id);")
            .line("return (result.affected ?? 0) > 0;"),
        );

    CodeFile::new().imports(&imports).add(class).render()
}

fn render_scaffold(names: &OperationNames, entity_module: &str) -> String {
    let OperationNames { entity, plural, .. } = names;
    let base = format!("{entity}ResolverBase");

    let mut imports = ImportCollector::new();
    imports.add(TYPE_GRAPHQL, "Resolver");
    imports.add(TYPEORM, "Repository");
    imports.add(entity_module, entity);
    imports.add(&format!("./{base}"), &base);

    let class = Class::new(format!("{entity}Resolver"))
        .decorator(format!("@Resolver(() => {entity})"))
        .extends(base)
        .method(
            Method::new(format!(
                "constructor(private readonly {plural}: Repository<{entity}>)"
            ))
            .line("super();"),
        )
        .method(
            Method::new(format!("protected repository(): Repository<{entity}>"))
                .line(format!("return this.{plural};")),
        );

    CodeFile::new().imports(&imports).add(class).render()
}

#[cfg(test)]
mod tests {
    use kiln_schema::EntitySchema;

    use super::*;
    use crate::{enums::EnumRegistry, settings::GeneratorSettings, strategy::StrategyRegistry};

    fn run(name: &str) -> Result<PhaseOutput> {
        let entity = EntitySchema::new(name);
        let enums = EnumRegistry::new();
        let registry = StrategyRegistry::builtin();
        let settings = GeneratorSettings::default();
        let ctx = GenerationContext {
            entity: &entity,
            enums: &enums,
            registry: &registry,
            settings: &settings,
        };
        OperationsPhase.run(&ctx)
    }

    #[test]
    fn test_names() {
        let names = OperationNames::new("BlogPost").unwrap();
        assert_eq!(names.single, "blogPost");
        assert_eq!(names.plural, "blogPosts");
        assert_eq!(OperationNames::new("Category").unwrap().plural, "categories");
    }

    #[test]
    fn test_uncountable_entity_fails() {
        let err = run("Sheep").unwrap_err();
        assert!(err.to_string().contains("Sheep"));
    }

    #[test]
    fn test_base_handlers() {
        let output = run("Post").unwrap();
        let base = &output.files[0];
        assert_eq!(base.path, "src/resolvers/PostResolverBase.ts");
        assert!(!base.created);
        let content = &base.content;
        assert!(content.starts_with(
            "import { Arg, ID, Mutation, Query, Resolver } from 'type-graphql';\n\
             import { Repository } from 'typeorm';\n\
             import { Post } from '../entities/Post';\n\
             import { CreatePostInput, UpdatePostInput } from '../inputs/PostInputs';\n"
        ));
        assert!(content.contains("  protected abstract repository(): Repository<Post>;\n"));
        assert!(content.contains(
            "  @Query(() => Post, { nullable: true })\n  \
             async post(@Arg('id', () => ID) id: string): Promise<Post | null> {\n    \
             return this.repository().findOneBy({ id });\n  }\n"
        ));
        assert!(content.contains("  async posts(): Promise<Post[]> {\n"));
        assert!(content.contains(
            "  async createPost(@Arg('input') input: CreatePostInput): Promise<Post> {\n"
        ));
        assert!(content.contains(
            "  async updatePost(@Arg('input') input: UpdatePostInput): Promise<Post> {\n"
        ));
        assert!(content.contains("    return (result.affected ?? 0) > 0;\n"));
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_scaffold() {
        let output = run("Post").unwrap();
        let scaffold = &output.files[1];
        assert!(scaffold.created);
        assert_eq!(scaffold.path, "src/resolvers/PostResolver.ts");
        assert_eq!(
            scaffold.content,
            "import { Resolver } from 'type-graphql';\n\
             import { Repository } from 'typeorm';\n\
             import { Post } from '../entities/Post';\n\
             import { PostResolverBase } from './PostResolverBase';\n\
             \n\
             @Resolver(() => Post)\n\
             export class PostResolver extends PostResolverBase {\n\
             \x20 constructor(private readonly posts: Repository<Post>) {\n\
             \x20   super();\n\
             \x20 }\n\
             \n\
             \x20 protected repository(): Repository<Post> {\n\
             \x20   return this.posts;\n\
             \x20 }\n\
             }\n"
        );
    }
}
