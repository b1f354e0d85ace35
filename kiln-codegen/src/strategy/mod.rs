//! Field classification strategies.
//!
//! Each schema field is claimed by exactly one [`Strategy`], chosen by the
//! [`StrategyRegistry`] from the field alone. The built-in order is:
//!
//! | strategy      | priority | claims                                              |
//! |---------------|----------|-----------------------------------------------------|
//! | `Polymorphic` | 100      | relationships marked polymorphic                    |
//! | `ForeignKey`  | 90       | many-to-one / one-to-one with `foreignKey` enabled  |
//! | `Enum`        | 80       | `enum` fields without a relationship                |
//! | `JsonArray`   | 70       | `json` with an item schema, primitive arrays        |
//! | `Scalar`      | fallback | everything else                                     |
//!
//! The predicates are disjoint; the priorities only fix evaluation order.

mod context;
mod fields;
mod prepared;
mod registry;

use kiln_core::ScalarType;
use kiln_schema::FieldSpec;

pub use context::{PrepareContext, Target};
pub use prepared::PreparedField;
pub use registry::{PreparedEntity, StrategyEntry, StrategyRegistry};

use crate::error::GenerateError;

/// The closed set of field patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Polymorphic,
    ForeignKey,
    Enum,
    JsonArray,
    Scalar,
}

impl Strategy {
    /// Specific strategies in descending default priority.
    pub const SPECIFIC: [Strategy; 4] = [
        Strategy::Polymorphic,
        Strategy::ForeignKey,
        Strategy::Enum,
        Strategy::JsonArray,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Polymorphic => "polymorphic",
            Strategy::ForeignKey => "foreign-key",
            Strategy::Enum => "enum",
            Strategy::JsonArray => "json-array",
            Strategy::Scalar => "scalar",
        }
    }

    pub fn default_priority(&self) -> u16 {
        match self {
            Strategy::Polymorphic => 100,
            Strategy::ForeignKey => 90,
            Strategy::Enum => 80,
            Strategy::JsonArray => 70,
            Strategy::Scalar => 0,
        }
    }

    /// Whether this strategy claims the field. Depends on the field only.
    pub fn matches(&self, field: &FieldSpec, _ctx: &PrepareContext<'_>) -> bool {
        match self {
            Strategy::Polymorphic => field.is_polymorphic(),
            Strategy::ForeignKey => field.has_foreign_key(),
            Strategy::Enum => {
                field.relationship.is_none() && field.field_type == ScalarType::Enum
            }
            Strategy::JsonArray => field.relationship.is_none() && is_json_array(field),
            Strategy::Scalar => true,
        }
    }

    /// Prepare the field's declarations.
    ///
    /// `Ok(None)` means the field is intentionally absent from this target:
    /// skipped fields, fields excluded from inputs, and relations in inputs.
    pub fn prepare(
        &self,
        field: &FieldSpec,
        ctx: &PrepareContext<'_>,
    ) -> Result<Option<Vec<PreparedField>>, GenerateError> {
        if field.options.skip || (ctx.target.is_input() && !field.options.input) {
            return Ok(None);
        }
        match self {
            Strategy::Polymorphic => fields::polymorphic(field, ctx),
            Strategy::ForeignKey => fields::foreign_key(field, ctx),
            Strategy::Enum => fields::enumeration(field, ctx),
            Strategy::JsonArray => fields::json_array(field, ctx),
            Strategy::Scalar => fields::scalar(field, ctx),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// JSON with an item schema, or a primitive marked as an array.
///
/// Primitive arrays are stored as JSON rather than native array columns.
fn is_json_array(field: &FieldSpec) -> bool {
    (field.field_type.is_json() && field.item_schema.is_some())
        || (field.array && field.field_type.is_primitive())
}
