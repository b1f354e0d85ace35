//! Preview command report data structures.

use super::output::{Output, Report};

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// Files generated for one schema, printed rather than written.
#[derive(Debug)]
pub struct PreviewReport {
    pub files: Vec<PreviewFile>,
    pub errors: Vec<String>,
}

impl PreviewReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }
        for error in &self.errors {
            out.error(error);
        }
    }
}
