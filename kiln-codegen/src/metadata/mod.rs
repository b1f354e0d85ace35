//! Metadata annotation builders.
//!
//! Each builder wraps an immutable [`MetadataOptions`] record, set through
//! the [`WithMetadata`] setters, and renders annotation strings in a fixed
//! option order. Only options that were set are rendered.

mod column;
mod enum_field;
mod foreign_key;
mod json_field;
mod literal;
mod options;
mod polymorphic;
mod relation;

pub use column::ColumnBuilder;
pub use enum_field::EnumFieldBuilder;
pub use foreign_key::ForeignKeyBuilder;
pub use json_field::JsonFieldBuilder;
pub use literal::{MAX_DEPTH, check_default, quote, to_ts_literal, value_kind};
pub use options::{InputKind, MetadataOptions, WithMetadata};
pub use polymorphic::PolymorphicBuilder;
pub use relation::{RelationBuilder, kind_decorator};
