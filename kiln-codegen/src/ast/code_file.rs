//! Structured TypeScript file: an import block followed by body sections.

use crate::{
    ast::ImportCollector,
    builder::{CodeBuilder, CodeFragment, Indent, Renderable},
};

/// A TypeScript source file.
///
/// Imports render first, then each body element separated by one blank line.
#[derive(Debug, Default)]
pub struct CodeFile {
    imports: ImportCollector,
    body: Vec<Vec<CodeFragment>>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn imports(mut self, imports: &ImportCollector) -> Self {
        self.imports.merge(imports);
        self
    }

    /// Add a body element.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    pub fn render(&self) -> String {
        self.render_with_indent(Indent::TYPESCRIPT)
    }

    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        let imports = self.imports.to_imports();
        for import in &imports {
            builder.emit(import);
        }
        if !imports.is_empty() && !self.body.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}

/// Raw code lines as a body element.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0.lines().map(CodeFragment::line).collect()
    }
}
