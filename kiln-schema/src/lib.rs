//! Entity schema model, parsing and validation for kiln.
//!
//! Entity schemas are loaded from JSON or TOML. Each field is either a
//! compact shorthand (`"title:string"`, `"views:number?"`) or a structured
//! object; both normalize to [`FieldSpec`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod attribute;
mod config;
mod entity;
mod error;
mod load;
mod validate;

pub use attribute::{ShorthandError, infer_relationship, parse_attribute};
pub use config::{Config, GenerateConfig, PathsConfig, ProjectConfig};
pub use entity::{
    EntitySchema, EnumType, FieldOptions, FieldSpec, ItemSchema, RelationKind, Relationship,
};
pub use error::{Error, Result, SourceContext};
pub use load::{SchemaFormat, parse_entity, validate_entity};
pub use validate::{GENERATED_COLUMNS, is_reserved_word, is_valid_identifier};
