//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from project validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Entities that loaded.
    pub entities: Vec<String>,
    /// Schema and generation errors.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        if !self.is_valid() {
            out.newline();
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        let count = self.entities.len();
        out.section(&format!(
            "  {} entit{}",
            count,
            if count == 1 { "y" } else { "ies" }
        ));
        for entity in &self.entities {
            out.list_item(entity);
        }
    }
}
