//! Read-only inputs shared by every strategy invocation.

use kiln_core::{TypeMapper, TypeScriptTypeMapper};
use kiln_schema::{EntitySchema, FieldSpec};

use crate::{enums::EnumRegistry, metadata::InputKind, settings::GeneratorSettings};

/// Which declaration a field is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Entity,
    CreateInput,
    UpdateInput,
}

impl Target {
    pub fn input_kind(&self) -> Option<InputKind> {
        match self {
            Target::Entity => None,
            Target::CreateInput => Some(InputKind::Create),
            Target::UpdateInput => Some(InputKind::Update),
        }
    }

    pub fn is_input(&self) -> bool {
        self.input_kind().is_some()
    }
}

static TYPESCRIPT: TypeScriptTypeMapper = TypeScriptTypeMapper;

/// Everything a strategy may look at besides the field itself.
#[derive(Clone, Copy)]
pub struct PrepareContext<'a> {
    pub entity: &'a EntitySchema,
    pub enums: &'a EnumRegistry,
    pub settings: &'a GeneratorSettings,
    pub target: Target,
    pub mapper: &'a dyn TypeMapper,
    /// Module declaring the entity's enums, when it is not the current file.
    pub enum_module: Option<&'a str>,
}

impl<'a> PrepareContext<'a> {
    pub fn new(
        entity: &'a EntitySchema,
        enums: &'a EnumRegistry,
        settings: &'a GeneratorSettings,
        target: Target,
    ) -> Self {
        Self {
            entity,
            enums,
            settings,
            target,
            mapper: &TYPESCRIPT,
            enum_module: None,
        }
    }

    pub fn with_enum_module(mut self, module: &'a str) -> Self {
        self.enum_module = Some(module);
        self
    }

    /// Update inputs make every field optional.
    pub fn is_required(&self, field: &FieldSpec) -> bool {
        match self.target {
            Target::UpdateInput => false,
            _ => field.required,
        }
    }

    /// Defaults apply to the stored column and to creation only.
    pub fn carries_default(&self) -> bool {
        self.target != Target::UpdateInput
    }

    pub fn expose(&self, field: &FieldSpec) -> bool {
        field.options.expose.unwrap_or(true)
    }

    pub fn expose_foreign_key(&self, field: &FieldSpec) -> bool {
        field
            .options
            .expose
            .unwrap_or(self.settings.expose_foreign_keys)
    }
}

impl std::fmt::Debug for PrepareContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrepareContext")
            .field("entity", &self.entity.name)
            .field("target", &self.target)
            .field("language", &self.mapper.language())
            .finish()
    }
}
