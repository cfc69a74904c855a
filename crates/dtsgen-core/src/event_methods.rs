//! Subscription methods (`attach<Event>`) get generic, event-typed callback
//! signatures instead of the plain resolved parameter types.
//!
//! ```typescript
//! attachResize<Tcontext>(fn: (this: Tcontext, oEvent: ResizeEventArgs) => void, listener?: Tcontext): this;
//! attachResize<TcustomData, Tcontext>(oData: TcustomData, fnFunction: (this: Tcontext, oEvent: ResizeEventArgs, oCustomData?: TcustomData) => void, oListener?: Tcontext): this;
//! ```

use dtsgen_common::{RawMethod, RawParameter};

use crate::event::EventModel;
use crate::method::{MethodModel, ReturnType};
use crate::parameter::ParameterModel;
use crate::type_resolver::TypeResolver;

const ATTACH_PREFIX: &str = "attach";

const CUSTOM_DATA_PARAMETERS: [&str; 2] = ["oData", "data"];
const CALLBACK_PARAMETERS: [&str; 3] = ["fnFunction", "fnCallback", "fn"];
const LISTENER_PARAMETERS: [&str; 2] = ["oListener", "listener"];

pub const CUSTOM_DATA_GENERIC: &str = "TcustomData";
pub const CONTEXT_GENERIC: &str = "Tcontext";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterRole {
    CustomData,
    Callback,
    Listener,
}

fn parameter_role(parameter: &RawParameter) -> Option<ParameterRole> {
    let name = parameter.name.as_str();
    if CUSTOM_DATA_PARAMETERS.contains(&name) {
        Some(ParameterRole::CustomData)
    } else if CALLBACK_PARAMETERS.contains(&name) {
        Some(ParameterRole::Callback)
    } else if LISTENER_PARAMETERS.contains(&name) {
        Some(ParameterRole::Listener)
    } else {
        None
    }
}

/// Find the event an `attach<Event>` method subscribes to.
pub fn match_event<'e>(method_name: &str, events: &'e [EventModel]) -> Option<&'e EventModel> {
    let event_name = method_name.strip_prefix(ATTACH_PREFIX)?;
    if event_name.is_empty() {
        return None;
    }
    events.iter().find(|event| event.matches(event_name))
}

/// `(this: Tcontext, oEvent: ResizeEventArgs, oCustomData?: TcustomData) => void`
pub fn callback_type(event: &EventModel, has_listener: bool, has_custom_data: bool) -> String {
    let this_binding = if has_listener {
        CONTEXT_GENERIC
    } else {
        "this"
    };
    let custom_data = if has_custom_data {
        format!(", oCustomData?: {CUSTOM_DATA_GENERIC}")
    } else {
        String::new()
    };
    format!(
        "(this: {}, oEvent: {}{}) => void",
        this_binding, event.payload_type, custom_data
    )
}

pub fn synthesize_event_method(
    method: &mut MethodModel,
    raw: &RawMethod,
    event: &EventModel,
    resolver: &TypeResolver<'_>,
) {
    let has_role =
        |role: ParameterRole| raw.parameters.iter().any(|p| parameter_role(p) == Some(role));
    let has_custom_data = has_role(ParameterRole::CustomData);
    let has_callback = has_role(ParameterRole::Callback);
    let has_listener = has_role(ParameterRole::Listener);

    for parameter in &raw.parameters {
        match parameter_role(parameter) {
            Some(ParameterRole::CustomData) => {
                method
                    .parameters
                    .push(ParameterModel::with_type(parameter, CUSTOM_DATA_GENERIC));
                push_generic(method, CUSTOM_DATA_GENERIC);
            }
            Some(ParameterRole::Callback) => {
                let ty = callback_type(event, has_listener, has_custom_data);
                method
                    .parameters
                    .push(ParameterModel::with_type(parameter, ty));
                method.return_type = Some(ReturnType::fluent());
            }
            Some(ParameterRole::Listener) if has_callback => {
                method
                    .parameters
                    .push(ParameterModel::with_type(parameter, CONTEXT_GENERIC));
                push_generic(method, CONTEXT_GENERIC);
            }
            _ => {
                let (model, needs) = ParameterModel::from_raw(parameter, resolver);
                method.requirements.merge(needs);
                method.parameters.push(model);
            }
        }
    }

    if method.return_type.is_none() {
        method.create_return_type(raw, resolver);
    }
}

fn push_generic(method: &mut MethodModel, name: &str) {
    method.is_generic = true;
    if !method.generic_parameters.iter().any(|existing| existing == name) {
        method.generic_parameters.push(name.to_string());
    }
}
