use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated base files)
    Always,
    /// Only create if file doesn't exist (hand-edited scaffolds)
    IfMissing,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A file to be emitted
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl File {
    /// Create a file that is always overwritten.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::Always,
        }
    }

    /// Create a scaffold file that is only written when missing.
    pub fn scaffold(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
            ..Self::new(path, content)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn overwrite(&self) -> Overwrite {
        self.overwrite
    }

    /// Write the file according to its overwrite rule.
    pub fn write(&self) -> Result<WriteResult> {
        if self.overwrite == Overwrite::IfMissing && self.path.exists() {
            tracing::debug!(path = %self.path.display(), "keeping existing scaffold");
            return Ok(WriteResult::Skipped);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("src").join("entities").join("Post.ts");

        write_file(&path, "export {};").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "export {};");
    }

    #[test]
    fn test_base_file_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("PostBase.ts");
        fs::write(&path, "stale").unwrap();

        let result = File::new(&path, "fresh").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_scaffold_is_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Post.ts");

        let file = File::scaffold(&path, "scaffold");
        assert_eq!(file.write().unwrap(), WriteResult::Written);

        fs::write(&path, "hand-edited").unwrap();
        assert_eq!(file.write().unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand-edited");
    }
}
