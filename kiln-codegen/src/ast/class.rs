//! TypeScript class builder with decorated members.

use crate::builder::{CodeFragment, Renderable};

/// A decorated class property.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub ty: String,
    pub optional: bool,
    pub decorators: Vec<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            decorators: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn decorator(mut self, decorator: impl Into<String>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    pub fn decorators(mut self, decorators: impl IntoIterator<Item = String>) -> Self {
        self.decorators.extend(decorators);
        self
    }

}

impl Renderable for Property {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out: Vec<CodeFragment> =
            self.decorators.iter().cloned().map(CodeFragment::Line).collect();
        // Definite assignment for required properties; TypeORM hydrates them.
        let marker = if self.optional { "?" } else { "!" };
        out.push(CodeFragment::line(format!("{}{}: {};", self.name, marker, self.ty)));
        out
    }
}

/// A class method. Abstract methods have no body.
#[derive(Debug, Clone)]
pub struct Method {
    decorators: Vec<String>,
    signature: String,
    body: Option<Vec<String>>,
}

impl Method {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            decorators: Vec::new(),
            signature: signature.into(),
            body: Some(Vec::new()),
        }
    }

    /// `signature;` with no body.
    pub fn declaration(signature: impl Into<String>) -> Self {
        Self {
            decorators: Vec::new(),
            signature: signature.into(),
            body: None,
        }
    }

    pub fn decorator(mut self, decorator: impl Into<String>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        if let Some(body) = &mut self.body {
            body.push(line.into());
        }
        self
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out: Vec<CodeFragment> =
            self.decorators.iter().cloned().map(CodeFragment::Line).collect();
        match &self.body {
            None => out.push(CodeFragment::line(format!("{};", self.signature))),
            Some(body) => out.push(CodeFragment::block(
                format!("{} {{", self.signature),
                body.iter().cloned().map(CodeFragment::Line).collect(),
                Some("}".to_string()),
            )),
        }
        out
    }
}

#[derive(Debug, Clone)]
pub enum Member {
    Property(Property),
    Method(Method),
}

impl Renderable for Member {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Member::Property(p) => p.to_fragments(),
            Member::Method(m) => m.to_fragments(),
        }
    }
}

/// Builder for TypeScript classes.
///
/// Members are separated by blank lines; a class without members renders
/// on a single line.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    decorators: Vec<String>,
    is_abstract: bool,
    extends: Option<String>,
    doc: Option<String>,
    members: Vec<Member>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decorators: Vec::new(),
            is_abstract: false,
            extends: None,
            doc: None,
            members: Vec::new(),
        }
    }

    pub fn decorator(mut self, decorator: impl Into<String>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.members.push(Member::Property(property));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    fn header(&self) -> String {
        let abstract_kw = if self.is_abstract { "abstract " } else { "" };
        let extends = self
            .extends
            .as_ref()
            .map(|base| format!(" extends {base}"))
            .unwrap_or_default();
        format!("export {}class {}{}", abstract_kw, self.name, extends)
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out = Vec::new();
        if let Some(doc) = &self.doc {
            out.push(CodeFragment::jsdoc(doc.clone()));
        }
        out.extend(self.decorators.iter().cloned().map(CodeFragment::Line));

        if self.members.is_empty() {
            out.push(CodeFragment::line(format!("{} {{}}", self.header())));
            return out;
        }

        let mut body = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(member.to_fragments());
        }
        out.push(CodeFragment::block(
            format!("{} {{", self.header()),
            body,
            Some("}".to_string()),
        ));
        out
    }
}
