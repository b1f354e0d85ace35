//! Generator settings derived from `kiln.toml`.

use kiln_schema::Config;

/// Module of the API decorators.
pub const TYPE_GRAPHQL: &str = "type-graphql";
/// Module of the persistence decorators.
pub const TYPEORM: &str = "typeorm";
/// Module of the JSON API scalar.
pub const GRAPHQL_SCALARS: &str = "graphql-scalars";

/// Everything a generation run needs beyond the entity itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Module exporting `EnumField`, `JsonField` and the polymorphic columns.
    pub runtime: String,
    pub paths: OutputPaths,
    /// API exposure of foreign keys when a field does not say.
    pub expose_foreign_keys: bool,
    /// Emit `createdAt` / `updatedAt`.
    pub timestamps: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            runtime: "@kiln/runtime".to_string(),
            paths: OutputPaths::default(),
            expose_foreign_keys: true,
            timestamps: true,
        }
    }
}

impl From<&Config> for GeneratorSettings {
    fn from(config: &Config) -> Self {
        Self {
            runtime: config.project.runtime.clone(),
            paths: OutputPaths {
                entities: config.paths.entities.clone(),
                inputs: config.paths.inputs.clone(),
                resolvers: config.paths.resolvers.clone(),
            },
            expose_foreign_keys: config.generate.expose_foreign_keys,
            timestamps: config.generate.timestamps,
        }
    }
}

/// Output directories, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub entities: String,
    pub inputs: String,
    pub resolvers: String,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            entities: "src/entities".to_string(),
            inputs: "src/inputs".to_string(),
            resolvers: "src/resolvers".to_string(),
        }
    }
}

impl OutputPaths {
    pub fn entity_base(&self, entity: &str) -> String {
        join(&self.entities, &format!("{entity}Base.ts"))
    }

    pub fn entity(&self, entity: &str) -> String {
        join(&self.entities, &format!("{entity}.ts"))
    }

    pub fn inputs(&self, entity: &str) -> String {
        join(&self.inputs, &format!("{entity}Inputs.ts"))
    }

    pub fn resolver_base(&self, entity: &str) -> String {
        join(&self.resolvers, &format!("{entity}ResolverBase.ts"))
    }

    pub fn resolver(&self, entity: &str) -> String {
        join(&self.resolvers, &format!("{entity}Resolver.ts"))
    }
}

fn join(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

/// Import specifier for `to_dir/stem` as seen from a file in `from_dir`.
///
/// ```
/// use kiln_codegen::relative_module;
///
/// assert_eq!(relative_module("src/inputs", "src/entities", "PostBase"), "../entities/PostBase");
/// assert_eq!(relative_module("src/entities", "src/entities", "Author"), "./Author");
/// ```
pub fn relative_module(from_dir: &str, to_dir: &str, stem: &str) -> String {
    let from = components(from_dir);
    let to = components(to_dir);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<&str> = Vec::new();
    let ups = from.len() - common;
    parts.extend(std::iter::repeat_n("..", ups));
    parts.extend(&to[common..]);
    parts.push(stem);

    let path = parts.join("/");
    if ups == 0 { format!("./{path}") } else { path }
}

fn components(dir: &str) -> Vec<&str> {
    dir.split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths = OutputPaths::default();
        assert_eq!(paths.entity_base("Post"), "src/entities/PostBase.ts");
        assert_eq!(paths.entity("Post"), "src/entities/Post.ts");
        assert_eq!(paths.inputs("Post"), "src/inputs/PostInputs.ts");
        assert_eq!(paths.resolver_base("Post"), "src/resolvers/PostResolverBase.ts");
        assert_eq!(paths.resolver("Post"), "src/resolvers/PostResolver.ts");
    }

    #[test]
    fn test_trailing_slash_and_root() {
        let paths = OutputPaths {
            entities: "models/".into(),
            inputs: ".".into(),
            resolvers: String::new(),
        };
        assert_eq!(paths.entity("Post"), "models/Post.ts");
        assert_eq!(paths.inputs("Post"), "PostInputs.ts");
        assert_eq!(paths.resolver("Post"), "PostResolver.ts");
    }

    #[test]
    fn test_relative_module() {
        assert_eq!(
            relative_module("src/resolvers", "src/inputs", "PostInputs"),
            "../inputs/PostInputs"
        );
        assert_eq!(relative_module("app", "app/models", "Post"), "./models/Post");
        assert_eq!(relative_module("a/b/c", "d", "X"), "../../../d/X");
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::new("blog");
        config.generate.expose_foreign_keys = false;
        config.project.runtime = "~/decorators".into();
        let settings = GeneratorSettings::from(&config);
        assert!(!settings.expose_foreign_keys);
        assert_eq!(settings.runtime, "~/decorators");
        assert_eq!(settings.paths, OutputPaths::default());
    }
}
