//! Core operations.
//!
//! This module contains the business logic for kiln commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod load;
pub mod preview;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use load::{Project, load_project};
pub use preview::preview;

/// Render a schema error with its source snippet.
pub(crate) fn render_schema_error(error: kiln_schema::Error) -> String {
    format!("{:?}", miette::Report::new(error))
}
