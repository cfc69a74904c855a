//! Type token resolution.
//!
//! Maps a raw type token from the symbol sources (`int`, `sap.ui.core.Control[]`,
//! `string|sap.m.ButtonType`) to the text used in the emitted declarations,
//! together with the imports that text requires.
//!
//! Resolution is a pure function of the substitution table and the ambient
//! registry. There is no cache: the same token is resolved many times during a
//! run and always yields the same result.

use dtsgen_common::{is_qualified, last_segment};
use indexmap::IndexMap;

use crate::ambient::AmbientTypeRegistry;
use crate::imports::{TypeImport, TypeRequirements};

pub const ANY_TYPE: &str = "any";

/// Names passed through without lookup or import.
pub const PRIMITIVE_TYPES: [&str; 5] = ["any", "number", "void", "string", "boolean"];

const ARRAY_SUFFIX: &str = "[]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedType {
    /// Rendered text, union members joined with `|`.
    pub rendered: String,
    pub requirements: TypeRequirements,
    /// Each rendered union member paired with the token it came from.
    pub raw_types: Vec<(String, String)>,
}

impl ResolvedType {
    fn any() -> Self {
        ResolvedType {
            rendered: ANY_TYPE.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    substitutions: &'a IndexMap<String, String>,
    registry: &'a AmbientTypeRegistry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(
        substitutions: &'a IndexMap<String, String>,
        registry: &'a AmbientTypeRegistry,
    ) -> Self {
        TypeResolver {
            substitutions,
            registry,
        }
    }

    pub fn resolve(&self, token: &str) -> ResolvedType {
        if token.trim().is_empty() {
            return ResolvedType::any();
        }

        let mut resolved = ResolvedType::default();
        let mut members = Vec::new();
        for alternative in token.split('|') {
            let alternative = alternative.trim();
            let (base, is_array) = match alternative.strip_suffix(ARRAY_SUFFIX) {
                Some(base) => (base, true),
                None => (alternative, false),
            };
            let base = self
                .substitutions
                .get(base)
                .map(String::as_str)
                .unwrap_or(base);

            let mut member = self.resolve_base(base, &mut resolved.requirements);
            if is_array {
                member.push_str(ARRAY_SUFFIX);
            }
            resolved
                .raw_types
                .push((member.clone(), alternative.to_string()));
            members.push(member);
        }
        resolved.rendered = members.join("|");
        resolved
    }

    /// Resolve a single, suffix-free, already-substituted token.
    fn resolve_base(&self, base: &str, requirements: &mut TypeRequirements) -> String {
        if base.is_empty() {
            return ANY_TYPE.to_string();
        }
        if PRIMITIVE_TYPES.contains(&base) || !is_qualified(base) {
            return base.to_string();
        }

        let short_name = last_segment(base).to_string();
        match self.registry.lookup(base) {
            Some(entry) => {
                let import = TypeImport {
                    name: short_name.clone(),
                    module: entry.module.clone(),
                };
                if !requirements.imports.contains(&import) {
                    requirements.imports.push(import);
                }
                short_name
            }
            None => {
                if !requirements.unresolved.iter().any(|token| token == base) {
                    requirements.unresolved.push(base.to_string());
                }
                ANY_TYPE.to_string()
            }
        }
    }
}
