//! TypeScript string enum declarations.

use crate::builder::{CodeFragment, Renderable};

/// `export enum Name { A = 'A', ... }`, one member per line.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    name: String,
    members: Vec<String>,
}

impl EnumDecl {
    pub fn new(
        name: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

impl Renderable for EnumDecl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = self
            .members
            .iter()
            .map(|member| CodeFragment::line(format!("{member} = '{member}',")))
            .collect();
        vec![CodeFragment::block(
            format!("export enum {} {{", self.name),
            body,
            Some("}".to_string()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    #[test]
    fn test_render() {
        let mut builder = CodeBuilder::typescript();
        builder.emit(&EnumDecl::new("PostStatus", ["DRAFT", "PUBLISHED"]));
        assert_eq!(
            builder.build(),
            "export enum PostStatus {\n  DRAFT = 'DRAFT',\n  PUBLISHED = 'PUBLISHED',\n}\n"
        );
    }
}
