//! Check operation - load and generate every schema without writing.

use kiln_codegen::GeneratorFactory;

use super::{Project, render_schema_error};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs generation in memory so field-level failures surface too.
pub fn check(project: Project) -> CheckReport {
    let factory = GeneratorFactory::from_config(&project.config);

    let mut entities = Vec::new();
    let mut errors = Vec::new();
    for (_, schema) in project.schemas {
        match schema {
            Ok(entity) => {
                let result = factory.generate_all(&entity);
                errors.extend(result.errors());
                entities.push(entity.name);
            }
            Err(error) => errors.push(render_schema_error(*error)),
        }
    }

    CheckReport {
        config_path: project.config_path,
        entities,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{
        load::fixtures::{AUTHOR, POST, project},
        load_project,
    };

    #[test]
    fn test_valid_project() {
        let temp = project(&[("post.json", POST), ("author.toml", AUTHOR)]);
        let loaded = load_project(&temp.path().join("kiln.toml")).unwrap();
        let report = check(loaded);
        assert!(report.is_valid());
        assert_eq!(report.entities, ["Author", "Post"]);
        assert!(!temp.path().join("src").exists());
    }

    #[test]
    fn test_generation_errors_are_reported() {
        let sheep = r#"{ "name": "Sheep", "fields": ["name:string"] }"#;
        let temp = project(&[("sheep.json", sheep)]);
        let loaded = load_project(&temp.path().join("kiln.toml")).unwrap();
        let report = check(loaded);
        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("Sheep operations:"));
    }
}
