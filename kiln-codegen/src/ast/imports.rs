//! TypeScript import statements and their collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::builder::{CodeFragment, Renderable};

/// A single `import { ... } from '...'` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    from: String,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn build(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        if self.named.is_empty() {
            format!("import '{}';", self.from)
        } else {
            format!(
                "import {}{{ {} }} from '{}';",
                type_kw,
                self.named.join(", "),
                self.from
            )
        }
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.build())]
    }
}

/// Deduplicating import table.
///
/// Modules keep first-insertion order and symbols are sorted, so the same
/// sequence of `add` calls always renders the same import block.
///
/// ```
/// use kiln_codegen::ast::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("typeorm", "Column");
/// imports.add("type-graphql", "Field");
/// imports.add("typeorm", "Entity");
///
/// let lines: Vec<String> = imports.to_imports().iter().map(|i| i.build()).collect();
/// assert_eq!(lines, [
///     "import { Column, Entity } from 'typeorm';",
///     "import { Field } from 'type-graphql';",
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportCollector {
    /// Module -> symbols
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, symbols) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
    }

    /// Drop a symbol, e.g. one the importing file declares itself.
    pub fn remove(&mut self, module: &str, symbol: &str) {
        if let Some(symbols) = self.imports.get_mut(module) {
            symbols.remove(symbol);
            if symbols.is_empty() {
                self.imports.shift_remove(module);
            }
        }
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn to_imports(&self) -> Vec<Import> {
        self.iter()
            .filter(|(_, symbols)| !symbols.is_empty())
            .map(|(module, symbols)| {
                symbols
                    .iter()
                    .fold(Import::new(module), |import, symbol| import.named(symbol))
            })
            .collect()
    }
}
