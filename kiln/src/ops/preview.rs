//! Preview operation - one schema, rendered in memory.

use kiln_codegen::GeneratorFactory;
use kiln_schema::{Config, EntitySchema};

use crate::reports::{PreviewFile, PreviewReport};

/// Execute the preview operation, using project defaults when there is no
/// `kiln.toml`.
pub fn preview(entity: &EntitySchema, config: Option<&Config>) -> PreviewReport {
    let factory = config
        .map(GeneratorFactory::from_config)
        .unwrap_or_default();
    let result = factory.generate_all(entity);

    PreviewReport {
        files: result
            .files()
            .map(|f| PreviewFile {
                path: f.path.clone(),
                content: f.content.clone(),
            })
            .collect(),
        errors: result.errors(),
    }
}
