//! Raw symbol schema.
//!
//! These records mirror the JSON API description a library publishes for its
//! public surface (one `ApiSource` per library). They are immutable input to
//! the pipeline: models copy what they need instead of patching the records.

use serde::{Deserialize, Serialize};

use crate::type_path::last_segment;

/// One library's worth of symbols.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSource {
    #[serde(default)]
    pub library: String,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Interface,
    Namespace,
    Enum,
    /// Kinds the generator does not handle (typedefs, functions, ...).
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    Restricted,
    Hidden,
}

impl Visibility {
    /// `restricted` and `hidden` members are emitted as `private`.
    pub fn normalized(self) -> Visibility {
        match self {
            Visibility::Restricted | Visibility::Hidden => Visibility::Private,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Restricted => "restricted",
            Visibility::Hidden => "hidden",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    #[serde(default)]
    pub basename: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
    #[serde(default, rename = "constructor")]
    pub constructor: Option<RawMethod>,
    /// Enum members for enums, static fields for namespaces.
    #[serde(default)]
    pub properties: Vec<RawProperty>,
    #[serde(default, rename = "ui5-metadata")]
    pub metadata: Option<ClassMetadata>,
}

impl Symbol {
    /// Short name; derived from the qualified name when the source omits it.
    pub fn basename(&self) -> &str {
        if self.basename.is_empty() {
            last_segment(&self.name)
        } else {
            &self.basename
        }
    }

    /// Slash-separated module path, e.g. `sap/m/Button`.
    pub fn module_path(&self) -> String {
        if self.module.is_empty() {
            self.name.replace('.', "/")
        } else {
            self.module.clone()
        }
    }

    /// Settings properties declared in the class metadata block.
    pub fn settings_properties(&self) -> &[RawProperty] {
        self.metadata
            .as_ref()
            .map(|metadata| metadata.properties.as_slice())
            .unwrap_or(&[])
    }
}

/// Class metadata block. Only the property list is consumed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMetadata {
    #[serde(default)]
    pub properties: Vec<RawProperty>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
    /// Explicit enum member value.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMethod {
    /// Empty for constructor records.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    #[serde(default)]
    pub return_value: Option<RawReturnValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReturnValue {
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
}
