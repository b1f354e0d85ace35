//! Core utilities and types for the kiln entity generator.
//!
//! This crate provides the scalar type tags, the schema-to-language type
//! table and the file-emission primitives used across the workspace.

mod file;
mod type_mapper;
mod types;
mod utils;

// File emission
pub use file::{File, Overwrite, WriteResult, write_file};
// Type mapping
pub use type_mapper::{TypeMapper, TypeMapping, TypeScriptTypeMapper, map_scalar, wrap_array};
// Fundamental types
pub use types::{ApiKind, ColumnKind, ScalarType};
// String utilities
pub use utils::{
    has_id_suffix, lower_first, pluralize, strip_id_suffix, to_camel_case, to_kebab_case,
    to_pascal_case, to_snake_case, upper_first, with_id_suffix,
};
