//! Project configuration (`kiln.toml`).

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext, load::SchemaFormat};

/// Root of `kiln.toml`.
///
/// ```toml
/// [project]
/// name = "blog"
///
/// [paths]
/// schemas = "schemas"
/// entities = "src/entities"
///
/// [generate]
/// expose_foreign_keys = false
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,
    /// Module exporting the custom field decorators.
    #[serde(default = "default_runtime")]
    pub runtime: String,
}

fn default_runtime() -> String {
    "@kiln/runtime".to_string()
}

/// Output and input locations, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PathsConfig {
    pub schemas: String,
    pub entities: String,
    pub inputs: String,
    pub resolvers: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schemas: "schemas".to_string(),
            entities: "src/entities".to_string(),
            inputs: "src/inputs".to_string(),
            resolvers: "src/resolvers".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GenerateConfig {
    /// Default API exposure for foreign key columns.
    pub expose_foreign_keys: bool,
    /// Emit `createdAt` / `updatedAt` columns.
    pub timestamps: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            expose_foreign_keys: true,
            timestamps: true,
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "kiln.toml")
    }
}

impl Config {
    /// Default configuration for a named project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project: ProjectConfig {
                name: name.into(),
                runtime: default_runtime(),
            },
            paths: PathsConfig::default(),
            generate: GenerateConfig::default(),
        }
    }

    /// Parse a kiln.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_config(&content, &path.display().to_string())
    }

    /// Entity schema files under `paths.schemas`, sorted by path.
    pub fn schema_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let dir = root.join(&self.paths.schemas);
        let entries = std::fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&dir, e))?.path();
            if path.is_file() && SchemaFormat::from_path(&path).is_some() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| ctx.toml_error(&e))?;
    if config.project.name.trim().is_empty() {
        return Err(ctx.validation_error_at("project name cannot be empty", "name"));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = r#"
            [project]
            name = "blog"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.project.name, "blog");
        assert_eq!(config.project.runtime, "@kiln/runtime");
        assert_eq!(config.paths, PathsConfig::default());
        assert!(config.generate.expose_foreign_keys);
        assert!(config.generate.timestamps);
    }

    #[test]
    fn test_overrides() {
        let config: Config = r#"
            [project]
            name = "shop"
            runtime = "~/runtime"

            [paths]
            entities = "app/models"

            [generate]
            timestamps = false
        "#
        .parse()
        .unwrap();

        assert_eq!(config.project.runtime, "~/runtime");
        assert_eq!(config.paths.entities, "app/models");
        assert_eq!(config.paths.inputs, "src/inputs");
        assert!(!config.generate.timestamps);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::from_str(
            r#"
            [project]
            name = "blog"
            colour = "blue"
        "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_schema_files_are_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("schemas");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("post.json"), "{}").unwrap();
        std::fs::write(dir.join("author.toml"), "").unwrap();
        std::fs::write(dir.join("README.md"), "").unwrap();

        let files = Config::new("blog").schema_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["author.toml", "post.json"]);
    }
}
