//! Strategy-driven code generation for kiln entities.
//!
//! Every schema field is classified by the [`StrategyRegistry`] and prepared
//! into decorated property declarations, which the artifact phases assemble
//! into TypeScript files. The [`GeneratorFactory`] runs the phases and
//! reports per-artifact success; [`FileRegistry`] writes the results.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware text building (CodeBuilder, CodeFragment)
//! - [`ast`] - TypeScript nodes (Class, Property, ImportCollector, CodeFile)
//! - [`metadata`] - Annotation builders and default-value literals
//! - [`strategy`] - Field strategies and the priority registry
//! - [`phases`] - Entity, inputs and operations artifact phases

pub mod ast;
pub mod builder;
pub mod metadata;
pub mod phases;
pub mod strategy;

mod artifact;
mod emit;
mod enums;
mod error;
mod factory;
mod settings;

pub use artifact::{ArtifactKind, ArtifactResult, GeneratedArtifact, GenerationResult};
pub use emit::{FileCategory, FileEntry, FileRegistry, WriteStats};
pub use enums::EnumRegistry;
pub use error::{GenerateError, RegistryError, SerializationError};
pub use factory::{BatchEntry, GeneratorFactory};
pub use settings::{
    GRAPHQL_SCALARS, GeneratorSettings, OutputPaths, TYPE_GRAPHQL, TYPEORM, relative_module,
};
pub use strategy::{Strategy, StrategyEntry, StrategyRegistry};
