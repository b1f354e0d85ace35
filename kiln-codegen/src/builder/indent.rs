//! Indentation configuration for generated TypeScript.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
}

impl Indent {
    /// 2-space indentation, the prettier default for TypeScript.
    pub const TYPESCRIPT: Self = Self::Spaces(2);

    /// String for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            // Fallback to 2 spaces
            Self::Spaces(_) => "  ",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}
