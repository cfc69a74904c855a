//! Finished output models.
//!
//! Everything a renderer needs is precomputed here: rendered signatures,
//! JSDoc lines and import lists. The models serialize to JSON for
//! `--emit-model`.

use dtsgen_common::Visibility;
use serde::Serialize;

use crate::class::DeclarationKind;
use crate::event::EventModel;
use crate::imports::TypeImport;
use crate::method::{MethodModel, SignatureStyle};
use crate::parameter::ParameterModel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDeclaration {
    pub name: String,
    pub signature: String,
    pub is_static: bool,
    pub visibility: Visibility,
    pub doc: Vec<String>,
    /// Merged with a base class method during overload propagation.
    pub overloads_base: bool,
}

impl MethodDeclaration {
    pub fn from_model(method: &MethodModel, style: SignatureStyle) -> Self {
        MethodDeclaration {
            name: method.name.clone(),
            signature: method.signature(style),
            is_static: method.is_static,
            visibility: method.visibility,
            doc: method.doc_lines(),
            overloads_base: method.overloaded_method.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDeclaration {
    pub name: String,
    pub payload_type: String,
    pub description: String,
    pub parameters: Vec<ParameterModel>,
}

impl EventDeclaration {
    pub fn from_model(event: &EventModel) -> Self {
        EventDeclaration {
            name: event.name.clone(),
            payload_type: event.payload_type.clone(),
            description: event.description.clone(),
            parameters: event.parameters.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    pub default_value: Option<String>,
}

/// `I<Class>Settings`: the optional-property bag a constructor accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInterface {
    pub name: String,
    pub extends: Option<String>,
    pub properties: Vec<SettingsProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub qualified_name: String,
    pub full_name: String,
    pub module: String,
    pub library: String,
    pub imports: Vec<TypeImport>,
    pub base_class: Option<String>,
    pub description: String,
    pub constructors: Vec<MethodDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub events: Vec<EventDeclaration>,
    pub settings: Option<SettingsInterface>,
}

impl ClassDeclaration {
    pub fn method(&self, name: &str) -> impl Iterator<Item = &MethodDeclaration> {
        self.methods.iter().filter(move |method| method.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceDeclaration {
    pub name: String,
    pub qualified_name: String,
    pub full_name: String,
    pub module: String,
    pub library: String,
    pub imports: Vec<TypeImport>,
    pub description: String,
    pub functions: Vec<MethodDeclaration>,
    pub properties: Vec<NamespaceProperty>,
}
