//! File emission for generated artifacts.
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register_result(&factory.generate_all(&entity));
//! let stats = registry.write_all(&project_root)?;
//! ```

use std::path::Path;

use eyre::Result;
use kiln_core::{File, WriteResult};

use crate::artifact::{GeneratedArtifact, GenerationResult};

/// Emission order: base files first, scaffolds last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    /// Regenerated on every run.
    Base,
    /// Written only if missing.
    Scaffold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Relative to the output root.
    pub path: String,
    pub content: String,
    pub category: FileCategory,
}

impl FileEntry {
    pub fn base(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category: FileCategory::Base,
        }
    }

    pub fn scaffold(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category: FileCategory::Scaffold,
        }
    }

    pub fn write(&self, root: &Path) -> Result<WriteResult> {
        let path = root.join(&self.path);
        let file = match self.category {
            FileCategory::Base => File::new(path, self.content.as_str()),
            FileCategory::Scaffold => File::scaffold(path, self.content.as_str()),
        };
        file.write()
    }
}

impl From<&GeneratedArtifact> for FileEntry {
    fn from(artifact: &GeneratedArtifact) -> Self {
        if artifact.created {
            Self::scaffold(&artifact.path, &artifact.content)
        } else {
            Self::base(&artifact.path, &artifact.content)
        }
    }
}

/// Files queued for emission.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Queue the files of every successful phase.
    pub fn register_result(&mut self, result: &GenerationResult) {
        self.entries
            .extend(result.emittable_files().map(FileEntry::from));
    }

    /// Entries in category order, registration order within a category.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write_all(&self, root: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        for entry in self.entries() {
            match entry.write(root)? {
                WriteResult::Written => stats.written.push(entry.path.clone()),
                WriteResult::Skipped => stats.skipped.push(entry.path.clone()),
            }
        }
        Ok(stats)
    }
}

/// Paths touched by [`FileRegistry::write_all`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: Vec<String>,
    /// Scaffolds that already existed.
    pub skipped: Vec<String>,
}

impl WriteStats {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}
