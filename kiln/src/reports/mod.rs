//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;
mod preview;

pub use check::CheckReport;
pub use generate::{Emission, EntitySummary, GenerateReport};
pub use output::{Report, TerminalOutput};
pub use preview::{PreviewFile, PreviewReport};
