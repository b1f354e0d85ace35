//! Generation outcomes per artifact kind.

use std::fmt;

use kiln_core::Overwrite;

/// The three artifacts produced for every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Entity,
    Inputs,
    Operations,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::Inputs => "inputs",
            ArtifactKind::Operations => "operations",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated file and how it should be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Relative to the project root.
    pub path: String,
    pub content: String,
    /// `true` for scaffolds that are written once and then hand-edited;
    /// `false` for base files regenerated on every run.
    pub created: bool,
}

impl GeneratedArtifact {
    pub fn base(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            created: false,
        }
    }

    pub fn scaffold(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            created: true,
        }
    }

    pub fn overwrite(&self) -> Overwrite {
        if self.created {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        }
    }
}

/// Outcome of one artifact phase.
///
/// A phase with field-level failures still carries its files, minus the
/// failed fields, but is not successful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactResult {
    pub kind: ArtifactKind,
    pub files: Vec<GeneratedArtifact>,
    pub errors: Vec<String>,
}

impl ArtifactResult {
    pub fn new(kind: ArtifactKind, files: Vec<GeneratedArtifact>, errors: Vec<String>) -> Self {
        Self {
            kind,
            files,
            errors,
        }
    }

    pub fn failed(kind: ArtifactKind, error: impl Into<String>) -> Self {
        Self::new(kind, Vec::new(), vec![error.into()])
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

/// Outcome of generating every artifact for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub entity_name: String,
    pub entity: ArtifactResult,
    pub inputs: ArtifactResult,
    pub operations: ArtifactResult,
}

impl GenerationResult {
    /// All three phases succeeded.
    pub fn success(&self) -> bool {
        self.artifacts().iter().all(|a| a.success())
    }

    pub fn artifacts(&self) -> [&ArtifactResult; 3] {
        [&self.entity, &self.inputs, &self.operations]
    }

    /// Files of every phase, successful or not.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts().into_iter().flat_map(|a| a.files.iter())
    }

    /// Files of successful phases only.
    pub fn emittable_files(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts()
            .into_iter()
            .filter(|a| a.success())
            .flat_map(|a| a.files.iter())
    }

    /// `"<entity> <kind>: <message>"` for every error.
    pub fn errors(&self) -> Vec<String> {
        self.artifacts()
            .iter()
            .flat_map(|a| {
                a.errors
                    .iter()
                    .map(move |e| format!("{} {}: {}", self.entity_name, a.kind, e))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(kind: ArtifactKind, path: &str) -> ArtifactResult {
        ArtifactResult::new(kind, vec![GeneratedArtifact::base(path, "")], Vec::new())
    }

    #[test]
    fn test_success_iff_no_errors() {
        assert!(ok(ArtifactKind::Entity, "a.ts").success());
        assert!(!ArtifactResult::failed(ArtifactKind::Inputs, "boom").success());
    }

    #[test]
    fn test_aggregate() {
        let result = GenerationResult {
            entity_name: "Post".into(),
            entity: ok(ArtifactKind::Entity, "PostBase.ts"),
            inputs: ArtifactResult::failed(ArtifactKind::Inputs, "boom"),
            operations: ok(ArtifactKind::Operations, "PostResolverBase.ts"),
        };
        assert!(!result.success());
        assert_eq!(result.errors(), ["Post inputs: boom"]);
        let emittable: Vec<_> = result.emittable_files().map(|f| f.path.as_str()).collect();
        assert_eq!(emittable, ["PostBase.ts", "PostResolverBase.ts"]);
    }

    #[test]
    fn test_scaffold_overwrite() {
        assert_eq!(GeneratedArtifact::scaffold("Post.ts", "").overwrite(), Overwrite::IfMissing);
        assert_eq!(GeneratedArtifact::base("PostBase.ts", "").overwrite(), Overwrite::Always);
    }
}
