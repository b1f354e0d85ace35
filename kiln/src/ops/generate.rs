//! Generate operation - every schema of a project to TypeScript files.

use std::path::Path;

use eyre::{Context, Result};
use kiln_codegen::{BatchEntry, FileRegistry, GeneratorFactory};

use super::{Project, render_schema_error};
use crate::reports::{Emission, EntitySummary, GenerateReport, PreviewFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Root the configured output paths are resolved against.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Only artifacts whose phase succeeded are emitted.
pub fn generate(project: Project, opts: GenerateOptions) -> Result<GenerateReport> {
    let factory = GeneratorFactory::from_config(&project.config);
    let entries = factory.generate_batch(
        project
            .schemas
            .into_iter()
            .map(|(path, schema)| (path.display().to_string(), schema)),
    );

    let mut registry = FileRegistry::new();
    let mut entities = Vec::new();
    let mut errors = Vec::new();
    for entry in entries {
        match entry {
            BatchEntry::Generated(result) => {
                registry.register_result(&result);
                errors.extend(result.errors());
                entities.push(EntitySummary {
                    name: result.entity_name.clone(),
                    success: result.success(),
                });
            }
            BatchEntry::Failed { error, .. } => errors.push(render_schema_error(*error)),
        }
    }

    let emission = if opts.dry_run {
        Emission::Preview(
            registry
                .entries()
                .map(|e| PreviewFile {
                    path: e.path.clone(),
                    content: e.content.clone(),
                })
                .collect(),
        )
    } else {
        let stats = registry
            .write_all(opts.output_dir)
            .wrap_err("Failed to write generated files")?;
        Emission::Written {
            written: stats.written,
            skipped: stats.skipped,
        }
    };

    Ok(GenerateReport {
        project_name: project.config.project.name,
        entities,
        errors,
        emission,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{
        load::fixtures::{AUTHOR, POST, project},
        load_project,
    };

    #[test]
    fn test_generate_writes_files() {
        let temp = project(&[("post.json", POST), ("author.toml", AUTHOR)]);
        let loaded = load_project(&temp.path().join("kiln.toml")).unwrap();
        let report = generate(
            loaded,
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(report.is_success());
        assert_eq!(report.entities.len(), 2);
        assert!(temp.path().join("src/entities/PostBase.ts").exists());
        assert!(temp.path().join("src/resolvers/AuthorResolver.ts").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = project(&[("post.json", POST)]);
        let loaded = load_project(&temp.path().join("kiln.toml")).unwrap();
        let report = generate(
            loaded,
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: true,
            },
        )
        .unwrap();

        let Emission::Preview(files) = &report.emission else {
            panic!("expected a preview");
        };
        assert_eq!(files.len(), 5);
        assert!(!temp.path().join("src").exists());
    }

    #[test]
    fn test_schema_failure_does_not_block_others() {
        let temp = project(&[
            ("post.json", POST),
            ("tag.json", r#"{ "name": "Tag", "fields": ["class:string"] }"#),
        ]);
        let loaded = load_project(&temp.path().join("kiln.toml")).unwrap();
        let report = generate(
            loaded,
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(!report.is_success());
        assert_eq!(report.errors.len(), 1);
        assert!(temp.path().join("src/entities/PostBase.ts").exists());
    }
}
