//! Entry point tying the strategy registry and the artifact phases together.
//!
//! ```
//! use kiln_codegen::GeneratorFactory;
//! use kiln_core::ScalarType;
//! use kiln_schema::{EntitySchema, FieldSpec};
//!
//! let entity = EntitySchema::new("Post").field(FieldSpec::new("title", ScalarType::String));
//! let result = GeneratorFactory::default().generate_all(&entity);
//! assert!(result.success());
//! assert_eq!(result.files().count(), 5);
//! ```

use std::fmt;

use kiln_schema::{Config, EntitySchema, validate_entity};

use crate::{
    artifact::{ArtifactKind, ArtifactResult, GenerationResult},
    enums::EnumRegistry,
    error::GenerateError,
    phases::{ArtifactPhase, EntityPhase, GenerationContext, InputsPhase, OperationsPhase},
    settings::GeneratorSettings,
    strategy::StrategyRegistry,
};

/// Generates the entity, input and resolver artifacts of entity schemas.
///
/// Holds no per-run state; one factory can serve many threads.
pub struct GeneratorFactory {
    registry: StrategyRegistry,
    settings: GeneratorSettings,
    entity_phase: Box<dyn ArtifactPhase>,
    inputs_phase: Box<dyn ArtifactPhase>,
    operations_phase: Box<dyn ArtifactPhase>,
}

impl GeneratorFactory {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self {
            registry: StrategyRegistry::builtin(),
            settings,
            entity_phase: Box::new(EntityPhase),
            inputs_phase: Box::new(InputsPhase),
            operations_phase: Box::new(OperationsPhase),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(GeneratorSettings::from(config))
    }

    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the phase producing `phase.kind()`.
    pub fn with_phase(mut self, phase: impl ArtifactPhase + 'static) -> Self {
        let phase: Box<dyn ArtifactPhase> = Box::new(phase);
        match phase.kind() {
            ArtifactKind::Entity => self.entity_phase = phase,
            ArtifactKind::Inputs => self.inputs_phase = phase,
            ArtifactKind::Operations => self.operations_phase = phase,
        }
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn generate_entity(&self, entity: &EntitySchema) -> ArtifactResult {
        let enums = EnumRegistry::from_entity(entity);
        self.run_phase(self.entity_phase.as_ref(), entity, &enums)
    }

    pub fn generate_inputs(&self, entity: &EntitySchema) -> ArtifactResult {
        let enums = EnumRegistry::from_entity(entity);
        self.run_phase(self.inputs_phase.as_ref(), entity, &enums)
    }

    pub fn generate_resolver_operations(&self, entity: &EntitySchema) -> ArtifactResult {
        let enums = EnumRegistry::from_entity(entity);
        self.run_phase(self.operations_phase.as_ref(), entity, &enums)
    }

    /// Run all three phases. Each phase succeeds or fails on its own.
    pub fn generate_all(&self, entity: &EntitySchema) -> GenerationResult {
        let enums = EnumRegistry::from_entity(entity);
        GenerationResult {
            entity_name: entity.name.clone(),
            entity: self.run_phase(self.entity_phase.as_ref(), entity, &enums),
            inputs: self.run_phase(self.inputs_phase.as_ref(), entity, &enums),
            operations: self.run_phase(self.operations_phase.as_ref(), entity, &enums),
        }
    }

    /// Validate the schema, then [`generate_all`](Self::generate_all).
    pub fn generate_checked(&self, entity: &EntitySchema) -> kiln_schema::Result<GenerationResult> {
        validate_entity(entity)?;
        Ok(self.generate_all(entity))
    }

    /// Generate every loaded schema; a schema that failed to load is
    /// reported without affecting the others.
    pub fn generate_batch<S>(
        &self,
        schemas: impl IntoIterator<Item = (S, kiln_schema::Result<EntitySchema>)>,
    ) -> Vec<BatchEntry>
    where
        S: Into<String>,
    {
        schemas
            .into_iter()
            .map(|(source, schema)| match schema {
                Ok(entity) => BatchEntry::Generated(self.generate_all(&entity)),
                Err(error) => BatchEntry::Failed {
                    source: source.into(),
                    error,
                },
            })
            .collect()
    }

    fn run_phase(
        &self,
        phase: &dyn ArtifactPhase,
        entity: &EntitySchema,
        enums: &Result<EnumRegistry, GenerateError>,
    ) -> ArtifactResult {
        let kind = phase.kind();
        let empty = EnumRegistry::new();
        let enums = match enums {
            Ok(enums) => enums,
            Err(err) if phase.needs_enums() => {
                tracing::warn!(
                    entity = %entity.name,
                    phase = phase.name(),
                    error = %err,
                    "phase failed"
                );
                return ArtifactResult::failed(kind, err.to_string());
            }
            Err(_) => &empty,
        };

        let ctx = GenerationContext {
            entity,
            enums,
            registry: &self.registry,
            settings: &self.settings,
        };
        match phase.run(&ctx) {
            Ok(output) => {
                if output.errors.is_empty() {
                    tracing::info!(
                        entity = %entity.name,
                        phase = phase.name(),
                        files = output.files.len(),
                        "phase complete"
                    );
                } else {
                    tracing::warn!(
                        entity = %entity.name,
                        phase = phase.name(),
                        errors = output.errors.len(),
                        "phase completed with errors"
                    );
                }
                ArtifactResult::new(kind, output.files, output.errors)
            }
            Err(err) => {
                tracing::warn!(
                    entity = %entity.name,
                    phase = phase.name(),
                    error = %err,
                    "phase failed"
                );
                ArtifactResult::failed(kind, format!("{err:#}"))
            }
        }
    }
}

impl Default for GeneratorFactory {
    fn default() -> Self {
        Self::new(GeneratorSettings::default())
    }
}

impl fmt::Debug for GeneratorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorFactory")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .field("entity_phase", &self.entity_phase.name())
            .field("inputs_phase", &self.inputs_phase.name())
            .field("operations_phase", &self.operations_phase.name())
            .finish()
    }
}

/// Outcome for one schema of a batch.
#[derive(Debug)]
pub enum BatchEntry {
    Generated(GenerationResult),
    Failed {
        source: String,
        error: Box<kiln_schema::Error>,
    },
}

impl BatchEntry {
    pub fn success(&self) -> bool {
        match self {
            BatchEntry::Generated(result) => result.success(),
            BatchEntry::Failed { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::ScalarType;
    use kiln_schema::{EnumType, FieldSpec};

    use super::*;

    fn status(values: &[&str]) -> FieldSpec {
        FieldSpec::new("status", ScalarType::Enum)
            .enum_type(EnumType::new("Status", values.iter().copied()))
    }

    #[test]
    fn test_enum_conflict_spares_operations() {
        let mut other = status(&["ARCHIVED"]);
        other.name = "previousStatus".into();
        let entity = EntitySchema::new("Post")
            .field(status(&["DRAFT", "PUBLISHED"]))
            .field(other);

        let result = GeneratorFactory::default().generate_all(&entity);
        assert!(!result.entity.success());
        assert!(!result.inputs.success());
        assert!(result.operations.success());
        assert!(result.entity.errors[0].contains("Status"));
        assert!(!result.success());
    }

    #[test]
    fn test_single_phase_entry_points() {
        let entity = EntitySchema::new("Post").field(FieldSpec::new("title", ScalarType::String));
        let factory = GeneratorFactory::default();
        assert_eq!(
            factory.generate_entity(&entity).paths(),
            ["src/entities/PostBase.ts", "src/entities/Post.ts"]
        );
        assert_eq!(factory.generate_inputs(&entity).paths(), ["src/inputs/PostInputs.ts"]);
        assert_eq!(
            factory.generate_resolver_operations(&entity).paths(),
            ["src/resolvers/PostResolverBase.ts", "src/resolvers/PostResolver.ts"]
        );
    }

    #[test]
    fn test_generate_checked_rejects_invalid_schema() {
        let entity = EntitySchema::new("post");
        assert!(GeneratorFactory::default().generate_checked(&entity).is_err());
    }

    #[test]
    fn test_factory_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeneratorFactory>();
    }
}
