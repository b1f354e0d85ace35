//! Generate command report data structures.

use super::{
    output::{Output, Report},
    preview::PreviewFile,
};

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project name from kiln.toml.
    pub project_name: String,
    /// Entities that loaded, with their generation outcome.
    pub entities: Vec<EntitySummary>,
    /// Schema and generation errors.
    pub errors: Vec<String>,
    pub emission: Emission,
}

#[derive(Debug)]
pub struct EntitySummary {
    pub name: String,
    pub success: bool,
}

/// What happened to the generated files.
#[derive(Debug)]
pub enum Emission {
    Written {
        written: Vec<String>,
        /// Scaffolds that already existed.
        skipped: Vec<String>,
    },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.emission {
            Emission::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
            Emission::Written { written, skipped } => {
                out.preformatted(&self.project_name);
                out.newline();
                out.section(&format!("Entities ({})", self.entities.len()));
                for entity in &self.entities {
                    let status = if entity.success { "" } else { " (failed)" };
                    out.list_item(&format!("{}{}", entity.name, status));
                }
                if !written.is_empty() {
                    out.newline();
                    out.section("Written");
                    for path in written {
                        out.added_item(path);
                    }
                }
                if !skipped.is_empty() {
                    out.newline();
                    out.section("Kept (already exist)");
                    for path in skipped {
                        out.kept_item(path);
                    }
                }
            }
        }

        if !self.errors.is_empty() {
            out.newline();
            for error in &self.errors {
                out.error(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            project_name: "blog".into(),
            entities: vec![
                EntitySummary {
                    name: "Author".into(),
                    success: true,
                },
                EntitySummary {
                    name: "Sheep".into(),
                    success: false,
                },
            ],
            errors: vec!["Sheep operations: plural collision".into()],
            emission: Emission::Written {
                written: vec!["src/entities/AuthorBase.ts".into()],
                skipped: vec!["src/entities/Author.ts".into()],
            },
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_success());
        assert_eq!(
            out.lines,
            [
                "blog",
                "",
                "Entities (2):",
                "  - Author",
                "  - Sheep (failed)",
                "",
                "Written:",
                "  + src/entities/AuthorBase.ts",
                "",
                "Kept (already exist):",
                "  = src/entities/Author.ts",
                "",
                "error: Sheep operations: plural collision",
            ]
        );
    }
}
