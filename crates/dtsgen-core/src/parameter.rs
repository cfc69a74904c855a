use dtsgen_common::RawParameter;
use serde::Serialize;

use crate::imports::TypeRequirements;
use crate::type_resolver::TypeResolver;

/// A method, constructor or event parameter with its resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    pub description: String,
    pub default_value: Option<String>,
    /// The token `ty` was resolved from (empty for synthesized types).
    #[serde(skip)]
    pub raw_type: String,
}

impl ParameterModel {
    pub fn from_raw(raw: &RawParameter, resolver: &TypeResolver<'_>) -> (Self, TypeRequirements) {
        let resolved = resolver.resolve(&raw.ty);
        let mut parameter = Self::with_type(raw, resolved.rendered);
        parameter.raw_type = raw.ty.clone();
        (parameter, resolved.requirements)
    }

    /// A parameter whose type text is synthesized rather than resolved.
    pub fn with_type(raw: &RawParameter, ty: impl Into<String>) -> Self {
        ParameterModel {
            name: raw.name.clone(),
            ty: ty.into(),
            optional: raw.optional,
            description: raw.description.clone(),
            default_value: raw.default_value.as_ref().map(|value| value.to_string()),
            raw_type: String::new(),
        }
    }

    /// `name?: type`
    pub fn render(&self) -> String {
        format!(
            "{}{}: {}",
            self.name,
            if self.optional { "?" } else { "" },
            self.ty
        )
    }
}
