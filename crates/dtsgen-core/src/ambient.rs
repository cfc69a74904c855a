//! Cross-source ambient type registry.
//!
//! Built once at the start of a run from every symbol source, then handed
//! read-only to all later phases. A declaration in one library can therefore
//! reference a type declared in another library without any ordering
//! between the sources.

use dtsgen_common::{ApiSource, Symbol, SymbolKind, module_of};
use rustc_hash::FxHashMap;
use tracing::debug;

/// A declared type name and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbientEntry {
    pub kind: SymbolKind,
    /// Qualified dotted name, e.g. `sap.ui.core.ValueState`.
    pub name: String,
    pub basename: String,
    /// Module that exports the type (module path without the last segment).
    pub module: String,
    pub library: String,
}

impl AmbientEntry {
    fn from_symbol(symbol: &Symbol, library: &str) -> Self {
        AmbientEntry {
            kind: symbol.kind,
            name: symbol.name.clone(),
            basename: symbol.basename().to_string(),
            module: module_of(&symbol.module_path()),
            library: library.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AmbientTypeRegistry {
    /// Enums, namespaces and interfaces.
    ambient: FxHashMap<String, AmbientEntry>,
    /// Class names, so class references resolve like ambient ones.
    classes: FxHashMap<String, AmbientEntry>,
}

impl AmbientTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(sources: &[ApiSource]) -> Self {
        let mut registry = Self::new();
        for source in sources {
            registry.register_source(source);
        }
        debug!(
            ambient = registry.ambient.len(),
            classes = registry.classes.len(),
            "built ambient type registry"
        );
        registry
    }

    pub fn register_source(&mut self, source: &ApiSource) {
        for symbol in &source.symbols {
            let entry = AmbientEntry::from_symbol(symbol, &source.library);
            match symbol.kind {
                SymbolKind::Enum | SymbolKind::Namespace | SymbolKind::Interface => {
                    self.ambient.insert(symbol.name.clone(), entry);
                }
                SymbolKind::Class => {
                    self.classes.insert(symbol.name.clone(), entry);
                }
                SymbolKind::Other => {}
            }
        }
    }

    /// Look up a qualified token; `/`-separated spellings are accepted.
    pub fn lookup(&self, token: &str) -> Option<&AmbientEntry> {
        let key = if token.contains('/') {
            std::borrow::Cow::Owned(token.replace('/', "."))
        } else {
            std::borrow::Cow::Borrowed(token)
        };
        self.ambient
            .get(key.as_ref())
            .or_else(|| self.classes.get(key.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.ambient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ambient.is_empty() && self.classes.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
