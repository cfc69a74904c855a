use dtsgen_common::{Symbol, module_of};
use tracing::debug;

use crate::declarations::{MethodDeclaration, NamespaceDeclaration, NamespaceProperty};
use crate::imports::{ImportSet, TypeRequirements};
use crate::method::{MethodModel, SignatureStyle, SynthesisContext, SynthesisOptions};
use crate::overloads::synthesize_overloads;
use crate::type_resolver::TypeResolver;

/// A namespace: static functions and fields, no inheritance.
#[derive(Debug, Clone)]
pub struct NamespaceModel {
    pub name: String,
    pub qualified_name: String,
    pub full_name: String,
    pub description: String,
    pub library: String,
    pub methods: Vec<MethodModel>,
    pub properties: Vec<NamespaceProperty>,
    pub imports: ImportSet,
    pub unresolved_types: Vec<String>,
}

impl NamespaceModel {
    pub fn build(symbol: &Symbol, library: &str, resolver: &TypeResolver<'_>) -> Self {
        let name = symbol.basename().to_string();
        debug!(namespace = %symbol.name, "creating namespace functions");

        let mut model = NamespaceModel {
            imports: ImportSet::with_suppressed([name.clone()]),
            name,
            qualified_name: symbol.name.clone(),
            full_name: symbol.module_path(),
            description: symbol.description.clone(),
            library: library.to_string(),
            methods: Vec::new(),
            properties: Vec::new(),
            unresolved_types: Vec::new(),
        };

        let context = SynthesisContext {
            resolver: *resolver,
            events: &[],
        };
        for raw in &symbol.methods {
            for method in synthesize_overloads(raw, &context, SynthesisOptions::static_members()) {
                model.absorb(method.requirements.clone());
                model.methods.push(method);
            }
        }

        for property in &symbol.properties {
            let resolved = resolver.resolve(&property.ty);
            model.absorb(resolved.requirements);
            model.properties.push(NamespaceProperty {
                name: property.name.clone(),
                ty: resolved.rendered,
                description: property.description.clone(),
            });
        }

        model
    }

    fn absorb(&mut self, requirements: TypeRequirements) {
        self.imports.extend(&requirements.imports);
        for token in requirements.unresolved {
            if !self.unresolved_types.contains(&token) {
                self.unresolved_types.push(token);
            }
        }
    }

    pub fn declaration(&self) -> NamespaceDeclaration {
        NamespaceDeclaration {
            name: self.name.clone(),
            qualified_name: self.qualified_name.clone(),
            full_name: self.full_name.clone(),
            module: module_of(&self.full_name),
            library: self.library.clone(),
            imports: self.imports.entries(),
            description: self.description.clone(),
            functions: self
                .methods
                .iter()
                .map(|method| MethodDeclaration::from_model(method, SignatureStyle::Bare))
                .collect(),
            properties: self.properties.clone(),
        }
    }
}
