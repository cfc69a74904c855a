//! Import bookkeeping.
//!
//! Type resolution never writes into a model directly. It returns the imports
//! a rendered type needs, and the owning model merges them into its own
//! `ImportSet`.

use indexmap::IndexMap;
use serde::Serialize;

/// A named type that must be imported from another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeImport {
    pub name: String,
    pub module: String,
}

/// Everything a piece of rendered type text depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRequirements {
    pub imports: Vec<TypeImport>,
    /// Qualified tokens that no registered source declares.
    pub unresolved: Vec<String>,
}

impl TypeRequirements {
    pub fn merge(&mut self, other: TypeRequirements) {
        for import in other.imports {
            if !self.imports.contains(&import) {
                self.imports.push(import);
            }
        }
        for token in other.unresolved {
            if !self.unresolved.contains(&token) {
                self.unresolved.push(token);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.unresolved.is_empty()
    }
}

/// Per-declaration import map: short type name -> originating module.
///
/// The first module registered for a short name wins. Names listed as
/// suppressed (the declaration itself, its generated settings interface)
/// are never imported.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    entries: IndexMap<String, String>,
    suppressed: Vec<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suppressed(names: impl IntoIterator<Item = String>) -> Self {
        ImportSet {
            entries: IndexMap::new(),
            suppressed: names.into_iter().collect(),
        }
    }

    /// Record an import. Returns `true` when the entry is new.
    pub fn add(&mut self, import: &TypeImport) -> bool {
        if import.module.is_empty() || self.suppressed.iter().any(|name| *name == import.name) {
            return false;
        }
        if self.entries.contains_key(&import.name) {
            return false;
        }
        self.entries
            .insert(import.name.clone(), import.module.clone());
        true
    }

    pub fn extend<'a>(&mut self, imports: impl IntoIterator<Item = &'a TypeImport>) {
        for import in imports {
            self.add(import);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> Vec<TypeImport> {
        self.entries
            .iter()
            .map(|(name, module)| TypeImport {
                name: name.clone(),
                module: module.clone(),
            })
            .collect()
    }
}
