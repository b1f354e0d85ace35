//! Artifact phases run by the generator factory.
//!
//! Each phase turns one entity into the files of one [`ArtifactKind`]. Phases
//! never see each other's output, so a failing phase leaves the others intact.

mod entity;
mod inputs;
mod operations;

use eyre::Result;
use kiln_schema::EntitySchema;

pub use entity::{EntityPhase, table_name};
pub use inputs::InputsPhase;
pub use operations::{OperationNames, OperationsPhase};

use crate::{
    artifact::{ArtifactKind, GeneratedArtifact},
    enums::EnumRegistry,
    error::GenerateError,
    settings::GeneratorSettings,
    strategy::{PrepareContext, PreparedEntity, StrategyRegistry, Target},
};

/// Information about a phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ArtifactKind,
}

/// A generation phase producing one artifact kind.
///
/// Built-in phases:
/// - [`EntityPhase`] - `<Name>Base.ts` and the `<Name>.ts` scaffold
/// - [`InputsPhase`] - `<Name>Inputs.ts`
/// - [`OperationsPhase`] - `<Name>ResolverBase.ts` and the `<Name>Resolver.ts` scaffold
pub trait ArtifactPhase: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn kind(&self) -> ArtifactKind;

    /// Whether the phase reads the entity's enums. Phases that do cannot run
    /// when enum registration failed.
    fn needs_enums(&self) -> bool {
        true
    }

    /// Run this phase for one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be produced at all. Isolated
    /// field failures belong in [`PhaseOutput::errors`] instead.
    fn run(&self, ctx: &GenerationContext<'_>) -> Result<PhaseOutput>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
            kind: self.kind(),
        }
    }
}

/// Inputs shared by every phase of one entity.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub entity: &'a EntitySchema,
    pub enums: &'a EnumRegistry,
    pub registry: &'a StrategyRegistry,
    pub settings: &'a GeneratorSettings,
}

impl<'a> GenerationContext<'a> {
    pub fn prepare_context(&self, target: Target) -> PrepareContext<'a> {
        PrepareContext::new(self.entity, self.enums, self.settings, target)
    }

    /// Prepare every field for `target`.
    pub fn prepare(&self, target: Target) -> Result<PreparedEntity, GenerateError> {
        self.registry.prepare_all(&self.prepare_context(target))
    }
}

/// Files produced by a phase plus its non-fatal errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseOutput {
    pub files: Vec<GeneratedArtifact>,
    pub errors: Vec<String>,
}

impl PhaseOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: GeneratedArtifact) -> Self {
        self.files.push(file);
        self
    }

    pub fn errors(mut self, errors: impl IntoIterator<Item = String>) -> Self {
        self.errors.extend(errors);
        self
    }
}

fn failure_messages(prepared: &PreparedEntity) -> impl Iterator<Item = String> + '_ {
    prepared.failures.iter().map(|e| e.to_string())
}
