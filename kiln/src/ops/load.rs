//! Project loading: `kiln.toml` plus every entity schema it points at.

use std::path::{Path, PathBuf};

use kiln_schema::{Config, EntitySchema};

/// A loaded project. Schemas that failed to load keep their error.
#[derive(Debug)]
pub struct Project {
    pub config_path: PathBuf,
    pub config: Config,
    /// Directory containing `kiln.toml`; schema paths are relative to it.
    pub root: PathBuf,
    pub schemas: Vec<(PathBuf, kiln_schema::Result<EntitySchema>)>,
}

/// Load `kiln.toml` and every schema under `paths.schemas`.
///
/// Only an unreadable config or schema directory fails the whole load.
pub fn load_project(config_path: &Path) -> kiln_schema::Result<Project> {
    let config = Config::from_file(config_path)?;
    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let schemas = config
        .schema_files(&root)?
        .into_iter()
        .map(|path| {
            let schema = EntitySchema::from_file(&path);
            if let Err(err) = &schema {
                tracing::warn!(path = %path.display(), error = %err, "schema failed to load");
            }
            (path, schema)
        })
        .collect();

    Ok(Project {
        config_path: config_path.to_path_buf(),
        config,
        root,
        schemas,
    })
}
