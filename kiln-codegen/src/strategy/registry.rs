//! Priority-ordered strategy dispatch.

use kiln_schema::FieldSpec;

use super::{PrepareContext, PreparedField, Strategy};
use crate::error::{GenerateError, RegistryError};

/// A strategy and the priority it is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyEntry {
    pub strategy: Strategy,
    pub priority: u16,
}

impl StrategyEntry {
    pub fn new(strategy: Strategy, priority: u16) -> Self {
        Self { strategy, priority }
    }
}

impl From<Strategy> for StrategyEntry {
    fn from(strategy: Strategy) -> Self {
        Self::new(strategy, strategy.default_priority())
    }
}

/// Fields prepared for one target, plus the fields that failed.
#[derive(Debug, Clone, Default)]
pub struct PreparedEntity {
    pub fields: Vec<PreparedField>,
    pub failures: Vec<GenerateError>,
}

/// Ordered strategies plus an optional fallback.
///
/// Immutable once built; shareable across threads.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    entries: Vec<StrategyEntry>,
    fallback: Option<Strategy>,
}

impl StrategyRegistry {
    /// Sort by descending priority; equal priorities are rejected.
    pub fn new(
        entries: impl IntoIterator<Item = StrategyEntry>,
        fallback: Option<Strategy>,
    ) -> Result<Self, RegistryError> {
        let mut entries: Vec<StrategyEntry> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.priority.cmp(&a.priority));
        for pair in entries.windows(2) {
            if pair[0].priority == pair[1].priority {
                return Err(RegistryError::DuplicatePriority {
                    first: pair[0].strategy.name(),
                    second: pair[1].strategy.name(),
                    priority: pair[0].priority,
                });
            }
        }
        Ok(Self { entries, fallback })
    }

    /// Built-in strategies at their default priorities with `Scalar` as fallback.
    pub fn builtin() -> Self {
        Self {
            entries: Strategy::SPECIFIC.into_iter().map(StrategyEntry::from).collect(),
            fallback: Some(Strategy::Scalar),
        }
    }

    /// Entries in evaluation order.
    pub fn entries(&self) -> &[StrategyEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> Option<Strategy> {
        self.fallback
    }

    /// First matching strategy, else the fallback.
    pub fn classify(
        &self,
        field: &FieldSpec,
        ctx: &PrepareContext<'_>,
    ) -> Result<Strategy, GenerateError> {
        self.entries
            .iter()
            .map(|entry| entry.strategy)
            .find(|strategy| strategy.matches(field, ctx))
            .or(self.fallback)
            .ok_or_else(|| GenerateError::Classification {
                field: field.name.clone(),
            })
    }

    pub fn dispatch(
        &self,
        field: &FieldSpec,
        ctx: &PrepareContext<'_>,
    ) -> Result<Option<Vec<PreparedField>>, GenerateError> {
        let strategy = self.classify(field, ctx)?;
        tracing::debug!(
            entity = %ctx.entity.name,
            field = %field.name,
            %strategy,
            target = ?ctx.target,
            "dispatching field"
        );
        strategy.prepare(field, ctx)
    }

    /// Prepare every field in declaration order.
    ///
    /// Field-level failures are collected and the field omitted; any other
    /// error aborts.
    pub fn prepare_all(&self, ctx: &PrepareContext<'_>) -> Result<PreparedEntity, GenerateError> {
        let mut prepared = PreparedEntity::default();
        for field in &ctx.entity.fields {
            match self.dispatch(field, ctx) {
                Ok(Some(fields)) => prepared.fields.extend(fields),
                Ok(None) => {
                    tracing::debug!(field = %field.name, target = ?ctx.target, "field omitted");
                }
                Err(err) if err.is_field_level() => {
                    tracing::warn!(
                        entity = %ctx.entity.name,
                        field = %field.name,
                        error = %err,
                        "field skipped"
                    );
                    prepared.failures.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(prepared)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::ScalarType;
    use kiln_schema::{EntitySchema, FieldOptions, Relationship};

    use super::*;
    use crate::{enums::EnumRegistry, settings::GeneratorSettings, strategy::Target};

    fn entity() -> EntitySchema {
        EntitySchema::new("Post")
            .field(FieldSpec::new("title", ScalarType::String))
            .field(
                FieldSpec::new("authorId", ScalarType::String)
                    .relationship(Relationship::many_to_one("Author")),
            )
            .field(FieldSpec::new("tags", ScalarType::String).array(true))
    }

    #[test]
    fn test_builtin_passes_validation() {
        let builtin = StrategyRegistry::builtin();
        let validated =
            StrategyRegistry::new(builtin.entries().to_vec(), builtin.fallback()).unwrap();
        assert_eq!(validated.entries(), builtin.entries());
    }

    #[test]
    fn test_entries_sorted_descending() {
        let registry = StrategyRegistry::new(
            [
                StrategyEntry::new(Strategy::Enum, 5),
                StrategyEntry::new(Strategy::ForeignKey, 50),
                StrategyEntry::new(Strategy::JsonArray, 20),
            ],
            None,
        )
        .unwrap();
        let order: Vec<_> = registry.entries().iter().map(|e| e.strategy).collect();
        assert_eq!(order, [Strategy::ForeignKey, Strategy::JsonArray, Strategy::Enum]);
    }

    #[test]
    fn test_duplicate_priority_is_rejected() {
        let err = StrategyRegistry::new(
            [
                StrategyEntry::new(Strategy::Enum, 80),
                StrategyEntry::new(Strategy::JsonArray, 80),
            ],
            Some(Strategy::Scalar),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicatePriority {
                first: "enum",
                second: "json-array",
                priority: 80,
            }
        );
    }

    #[test]
    fn test_classification_without_fallback() {
        let entity = entity();
        let enums = EnumRegistry::new();
        let settings = GeneratorSettings::default();
        let ctx = PrepareContext::new(&entity, &enums, &settings, Target::Entity);
        let registry =
            StrategyRegistry::new([StrategyEntry::from(Strategy::ForeignKey)], None).unwrap();

        let err = registry.classify(&entity.fields[0], &ctx).unwrap_err();
        assert_eq!(err, GenerateError::Classification { field: "title".into() });
        assert!(registry.prepare_all(&ctx).is_err());
    }

    #[test]
    fn test_classification_ignores_sibling_order() {
        let forward = entity();
        let mut reversed = forward.clone();
        reversed.fields.reverse();

        let enums = EnumRegistry::new();
        let settings = GeneratorSettings::default();
        let registry = StrategyRegistry::builtin();
        let a = PrepareContext::new(&forward, &enums, &settings, Target::Entity);
        let b = PrepareContext::new(&reversed, &enums, &settings, Target::Entity);

        for field in &forward.fields {
            assert_eq!(
                registry.classify(field, &a).unwrap(),
                registry.classify(field, &b).unwrap()
            );
        }
        assert_eq!(
            registry.classify(forward.get_field("tags").unwrap(), &a).unwrap(),
            Strategy::JsonArray
        );
    }

    #[test]
    fn test_skipped_field_is_omitted_not_failed() {
        let options = FieldOptions {
            skip: true,
            ..FieldOptions::default()
        };
        let entity = EntitySchema::new("Post")
            .field(FieldSpec::new("secret", ScalarType::String).options(options))
            .field(FieldSpec::new("title", ScalarType::String));
        let enums = EnumRegistry::new();
        let settings = GeneratorSettings::default();
        let ctx = PrepareContext::new(&entity, &enums, &settings, Target::Entity);

        let prepared = StrategyRegistry::builtin().prepare_all(&ctx).unwrap();
        let names: Vec<_> = prepared.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title"]);
        assert!(prepared.failures.is_empty());
    }

    #[test]
    fn test_field_failure_is_isolated() {
        let entity = EntitySchema::new("Post")
            .field(FieldSpec::new("views", ScalarType::Integer).default_value("many".into()))
            .field(FieldSpec::new("title", ScalarType::String));
        let enums = EnumRegistry::new();
        let settings = GeneratorSettings::default();
        let ctx = PrepareContext::new(&entity, &enums, &settings, Target::Entity);

        let prepared = StrategyRegistry::builtin().prepare_all(&ctx).unwrap();
        assert_eq!(prepared.fields.len(), 1);
        assert_eq!(prepared.fields[0].name, "title");
        assert!(matches!(
            prepared.failures.as_slice(),
            [GenerateError::Serialization { field, .. }] if field == "views"
        ));
    }
}
