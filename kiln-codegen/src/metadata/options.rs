//! The immutable option record shared by all metadata builders.

use serde_json::Value;

use super::literal::quote;

/// Which generated input type a decorator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Create,
    Update,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Create => "create",
            InputKind::Update => "update",
        }
    }
}

/// Options for one metadata annotation.
///
/// Every setter consumes the record and returns the updated copy; nothing is
/// rendered until a builder's `build`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataOptions {
    input_type: Option<InputKind>,
    description: Option<String>,
    required: Option<bool>,
    array: Option<bool>,
    default_value: Option<Value>,
    min_array_size: Option<u32>,
    max_array_size: Option<u32>,
}

impl MetadataOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_type(mut self, kind: InputKind) -> Self {
        self.input_type = Some(kind);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn array(mut self, array: bool) -> Self {
        self.array = Some(array);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn min_array_size(mut self, size: u32) -> Self {
        self.min_array_size = Some(size);
        self
    }

    pub fn max_array_size(mut self, size: u32) -> Self {
        self.max_array_size = Some(size);
        self
    }

    pub fn get_input_type(&self) -> Option<InputKind> {
        self.input_type
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn get_default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn is_array(&self) -> bool {
        self.array == Some(true)
    }

    /// Explicitly optional. Unset means required.
    pub fn is_nullable(&self) -> bool {
        self.required == Some(false)
    }

    /// `key: value` pairs in canonical order.
    ///
    /// Outside an input context the implicit default is "required", so only
    /// `nullable: true` is emitted; inside one the implicit default is
    /// "optional", so only `required: true` is emitted.
    pub(crate) fn entries(
        &self,
        default_literal: Option<String>,
        emit_array: bool,
    ) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(kind) = self.input_type {
            out.push(("inputType", quote(kind.as_str())));
        }
        if let Some(description) = &self.description {
            out.push(("description", quote(description)));
        }
        match (self.input_type, self.required) {
            (Some(_), Some(true)) => out.push(("required", "true".to_string())),
            (None, Some(false)) => out.push(("nullable", "true".to_string())),
            _ => {}
        }
        if emit_array && self.is_array() {
            out.push(("array", "true".to_string()));
        }
        if let Some(literal) = default_literal {
            out.push(("defaultValue", literal));
        }
        if let Some(min) = self.min_array_size {
            out.push(("minArraySize", min.to_string()));
        }
        if let Some(max) = self.max_array_size {
            out.push(("maxArraySize", max.to_string()));
        }
        out
    }
}

/// `{ a: 1, b: 2 }`
pub(crate) fn render_object(entries: &[(&str, String)]) -> String {
    let body: Vec<String> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{ {} }}", body.join(", "))
}

/// `@Name(arg, ..., { options })`; the object is omitted when empty.
pub(crate) fn decorator(name: &str, args: &[String], entries: &[(&str, String)]) -> String {
    let mut all: Vec<String> = args.to_vec();
    if !entries.is_empty() {
        all.push(render_object(entries));
    }
    format!("@{}({})", name, all.join(", "))
}

/// Fluent setters shared by the builders.
pub trait WithMetadata: Sized {
    fn options(&self) -> &MetadataOptions;

    fn with_options(self, options: MetadataOptions) -> Self;

    fn input_type(self, kind: InputKind) -> Self {
        let options = self.options().clone().input_type(kind);
        self.with_options(options)
    }

    fn description(self, description: impl Into<String>) -> Self {
        let options = self.options().clone().description(description);
        self.with_options(options)
    }

    fn required(self, required: bool) -> Self {
        let options = self.options().clone().required(required);
        self.with_options(options)
    }

    fn array(self, array: bool) -> Self {
        let options = self.options().clone().array(array);
        self.with_options(options)
    }

    fn default_value(self, value: Value) -> Self {
        let options = self.options().clone().default_value(value);
        self.with_options(options)
    }

    fn min_array_size(self, size: u32) -> Self {
        let options = self.options().clone().min_array_size(size);
        self.with_options(options)
    }

    fn max_array_size(self, size: u32) -> Self {
        let options = self.options().clone().max_array_size(size);
        self.with_options(options)
    }
}
