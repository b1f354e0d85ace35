use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for kiln-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Bundles the raw schema text and its filename so error factories don't
/// need both passed around.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of a quoted name in the source.
    ///
    /// Looks for `"name"` first (JSON keys and TOML strings), then for the
    /// shorthand form `"name:`, then for the bare name anywhere.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        if name.is_empty() {
            return None;
        }
        let patterns = [format!("\"{}\"", name), format!("\"{}:", name)];
        for pattern in &patterns {
            if let Some(pos) = self.src.find(pattern.as_str()) {
                return Some(SourceSpan::from((pos + 1, name.len())));
            }
        }
        self.src
            .find(name)
            .map(|pos| SourceSpan::from((pos, name.len())))
    }

    pub fn parse_error(&self, reason: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            reason: reason.into(),
        })
    }

    /// Create a parse error from a serde_json error (line/column based).
    pub fn json_error(&self, source: &serde_json::Error) -> Box<Error> {
        let span = line_col_offset(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        self.parse_error(source.to_string(), span)
    }

    /// Create a parse error from a toml error.
    pub fn toml_error(&self, source: &toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        self.parse_error(source.message().to_string(), span)
    }

    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error labelled at the first occurrence of `name`.
    pub fn validation_error_at(&self, message: impl Into<String>, name: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_span(name),
            message: message.into(),
        })
    }

    pub fn invalid_shorthand_error(&self, raw: &str, reason: impl Into<String>) -> Box<Error> {
        Box::new(Error::InvalidShorthand {
            src: self.named_source(),
            span: self.find_span(raw),
            raw: raw.to_string(),
            reason: reason.into(),
        })
    }

    pub fn reserved_keyword_error(&self, name: &str, context: impl Into<String>) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span: self.find_span(name),
            name: name.to_string(),
            context: context.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: &str,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span: self.find_span(name),
            name: name.to_string(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn duplicate_field_error(&self, name: &str, entity: &str) -> Box<Error> {
        Box::new(Error::DuplicateField {
            src: self.named_source(),
            span: self.find_span(name),
            name: name.to_string(),
            entity: entity.to_string(),
        })
    }

    pub fn missing_enum_values_error(&self, field: &str) -> Box<Error> {
        Box::new(Error::MissingEnumValues {
            src: self.named_source(),
            span: self.find_span(field),
            field: field.to_string(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
fn line_col_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (i, text) in src.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return Some((offset + column.saturating_sub(1)).min(src.len()));
        }
        offset += text.len();
    }
    Some(src.len())
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(kiln::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema: {reason}")]
    #[diagnostic(code(kiln::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        reason: String,
    },

    #[error("invalid field shorthand '{raw}'")]
    #[diagnostic(
        code(kiln::invalid_shorthand),
        help(
            "{reason}. Shorthand fields look like 'name:type', \
             e.g. 'title:string' or 'views:number?'"
        )
    )]
    InvalidShorthand {
        #[source_code]
        src: NamedSource<String>,
        #[label("unparseable field")]
        span: Option<SourceSpan>,
        raw: String,
        reason: String,
    },

    #[error("'{name}' is a reserved word")]
    #[diagnostic(
        code(kiln::reserved_keyword),
        help("rename the {context} '{name}' to something else")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved word used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(kiln::invalid_identifier),
        help(
            "{reason}. Use only letters, digits, '_' and '$', starting with a letter, '_' or '$'."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("duplicate field '{name}' in entity '{entity}'")]
    #[diagnostic(
        code(kiln::duplicate_field),
        help("field names, explicit keys and derived foreign key names must be unique")
    )]
    DuplicateField {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        name: String,
        entity: String,
    },

    #[error("enum field '{field}' declares no values")]
    #[diagnostic(
        code(kiln::missing_enum_values),
        help("add an enum definition, e.g. \"enum\": {{ \"values\": [\"DRAFT\", \"PUBLISHED\"] }}")
    )]
    MissingEnumValues {
        #[source_code]
        src: NamedSource<String>,
        #[label("enum without values")]
        span: Option<SourceSpan>,
        field: String,
    },

    #[error("{message}")]
    #[diagnostic(code(kiln::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
