//! TypeScript AST nodes used by the artifact phases.

mod class;
mod code_file;
mod enum_decl;
mod imports;

pub use class::{Class, Member, Method, Property};
pub use code_file::{CodeFile, RawCode};
pub use enum_decl::EnumDecl;
pub use imports::{Import, ImportCollector};
