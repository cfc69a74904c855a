use dtsgen_common::{RawEvent, Visibility, capitalize};
use serde::Serialize;

use crate::imports::TypeRequirements;
use crate::parameter::ParameterModel;
use crate::type_resolver::TypeResolver;

/// An event a class fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventModel {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub parameters: Vec<ParameterModel>,
    /// Name of the generated payload interface, e.g. `ResizeEventArgs`.
    pub payload_type: String,
}

impl EventModel {
    pub fn from_raw(raw: &RawEvent, resolver: &TypeResolver<'_>) -> (Self, TypeRequirements) {
        let mut requirements = TypeRequirements::default();
        let parameters = raw
            .parameters
            .iter()
            .map(|parameter| {
                let (model, needs) = ParameterModel::from_raw(parameter, resolver);
                requirements.merge(needs);
                model
            })
            .collect();

        let event = EventModel {
            name: raw.name.clone(),
            description: raw.description.clone(),
            visibility: raw.visibility.normalized(),
            parameters,
            payload_type: Self::payload_type_name(&raw.name),
        };
        (event, requirements)
    }

    pub fn payload_type_name(event_name: &str) -> String {
        format!("{}EventArgs", capitalize(event_name))
    }

    /// Case-insensitive event name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
