//! Class and interface models.

use dtsgen_common::{Symbol, Visibility, last_segment, module_of};
use serde::Serialize;
use tracing::debug;

use crate::declarations::{
    ClassDeclaration, EventDeclaration, MethodDeclaration, SettingsInterface, SettingsProperty,
};
use crate::event::EventModel;
use crate::imports::{ImportSet, TypeImport, TypeRequirements};
use crate::method::{MethodModel, SignatureStyle, SynthesisContext, SynthesisOptions};
use crate::overloads::synthesize_overloads;
use crate::type_resolver::TypeResolver;

/// Index of a class in its `ClassGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
}

const CONSTRUCTOR_NAME: &str = "constructor";
const SETTINGS_PARAMETER: &str = "mSettings";

#[derive(Debug, Clone)]
pub struct ClassModel {
    pub id: ClassId,
    pub kind: DeclarationKind,
    /// Short name, e.g. `Button`.
    pub name: String,
    /// Dotted name, e.g. `sap.m.Button`.
    pub qualified_name: String,
    /// Module path, e.g. `sap/m/Button`.
    pub full_name: String,
    pub extends: Option<String>,
    pub description: String,
    pub library: String,
    pub(crate) baseclass: Option<ClassId>,
    pub(crate) child_classes: Vec<ClassId>,
    pub methods: Vec<MethodModel>,
    pub constructors: Vec<MethodModel>,
    pub events: Vec<EventModel>,
    pub settings: Vec<SettingsProperty>,
    pub imports: ImportSet,
    pub unresolved_types: Vec<String>,
}

impl ClassModel {
    /// Build the model and synthesize every method, constructor and event
    /// signature. Base class linking happens later in `ClassGraph`.
    pub fn build(
        id: ClassId,
        kind: DeclarationKind,
        symbol: &Symbol,
        library: &str,
        resolver: &TypeResolver<'_>,
    ) -> Self {
        let name = symbol.basename().to_string();
        debug!(class = %symbol.name, "creating events, methods and constructors");

        let mut model = ClassModel {
            id,
            kind,
            imports: ImportSet::with_suppressed([
                settings_interface_name(&name),
                name.clone(),
            ]),
            name,
            qualified_name: symbol.name.clone(),
            full_name: symbol.module_path(),
            extends: symbol.extends.clone().filter(|extends| !extends.is_empty()),
            description: symbol.description.clone(),
            library: library.to_string(),
            baseclass: None,
            child_classes: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            events: Vec::new(),
            settings: Vec::new(),
            unresolved_types: Vec::new(),
        };

        if let Some(extends) = &model.extends {
            let needs = resolver.resolve(extends).requirements;
            model.absorb(needs);
        }

        for raw in &symbol.events {
            let (event, needs) = EventModel::from_raw(raw, resolver);
            model.absorb(needs);
            model.events.push(event);
        }

        let events = std::mem::take(&mut model.events);
        {
            let context = SynthesisContext {
                resolver: *resolver,
                events: &events,
            };
            for raw in &symbol.methods {
                for method in synthesize_overloads(raw, &context, SynthesisOptions::default()) {
                    model.absorb(method.requirements.clone());
                    model.methods.push(method);
                }
            }

            if let Some(constructor) = &symbol.constructor {
                let mut constructor = constructor.clone();
                constructor.name = CONSTRUCTOR_NAME.to_string();
                constructor.visibility = Visibility::Public;
                if let Some(settings) = constructor.parameters.get_mut(1)
                    && settings.name == SETTINGS_PARAMETER
                {
                    settings.ty = model.settings_interface_name();
                }
                for method in
                    synthesize_overloads(&constructor, &context, SynthesisOptions::constructor())
                {
                    model.absorb(method.requirements.clone());
                    model.constructors.push(method);
                }
            }
        }
        model.events = events;

        if kind == DeclarationKind::Class {
            for property in symbol.settings_properties() {
                let resolved = resolver.resolve(&property.ty);
                model.absorb(resolved.requirements);
                model.settings.push(SettingsProperty {
                    name: property.name.clone(),
                    ty: resolved.rendered,
                    description: property.description.clone(),
                    default_value: property.default_value.as_ref().map(|value| value.to_string()),
                });
            }
        }

        model
    }

    pub(crate) fn absorb(&mut self, requirements: TypeRequirements) {
        self.imports.extend(&requirements.imports);
        for token in requirements.unresolved {
            if !self.unresolved_types.contains(&token) {
                self.unresolved_types.push(token);
            }
        }
    }

    pub fn baseclass(&self) -> Option<ClassId> {
        self.baseclass
    }

    pub fn child_classes(&self) -> &[ClassId] {
        &self.child_classes
    }

    /// The module the class is declared in, e.g. `sap/m` for `sap/m/Button`.
    pub fn module_name(&self) -> String {
        module_of(&self.full_name)
    }

    pub fn settings_interface_name(&self) -> String {
        settings_interface_name(&self.name)
    }

    /// Short name of the declared base type, linked or not.
    pub fn base_class_name(&self) -> Option<&str> {
        self.extends.as_deref().map(last_segment)
    }

    /// The finished output model handed to a renderer.
    pub fn declaration(&self, base: Option<&ClassModel>) -> ClassDeclaration {
        let style = match self.kind {
            DeclarationKind::Class => SignatureStyle::Member,
            DeclarationKind::Interface => SignatureStyle::Bare,
        };

        let mut imports = self.imports.entries();
        let settings = (self.kind == DeclarationKind::Class).then(|| {
            let extends = base.map(|base| {
                let base_settings = base.settings_interface_name();
                let import = TypeImport {
                    name: base_settings.clone(),
                    module: base.module_name(),
                };
                if !imports.contains(&import) && !import.module.is_empty() {
                    imports.push(import);
                }
                base_settings
            });
            SettingsInterface {
                name: self.settings_interface_name(),
                extends,
                properties: self.settings.clone(),
            }
        });

        ClassDeclaration {
            kind: self.kind,
            name: self.name.clone(),
            qualified_name: self.qualified_name.clone(),
            full_name: self.full_name.clone(),
            module: self.module_name(),
            library: self.library.clone(),
            imports,
            base_class: self.base_class_name().map(str::to_string),
            description: self.description.clone(),
            constructors: self
                .constructors
                .iter()
                .map(|method| MethodDeclaration::from_model(method, style))
                .collect(),
            methods: self
                .methods
                .iter()
                .map(|method| MethodDeclaration::from_model(method, style))
                .collect(),
            events: self.events.iter().map(EventDeclaration::from_model).collect(),
            settings,
        }
    }
}

pub fn settings_interface_name(class_name: &str) -> String {
    format!("I{class_name}Settings")
}
