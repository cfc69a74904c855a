//! Method model: one concrete call signature of a method or constructor.

use dtsgen_common::{RawMethod, Visibility};
use indexmap::IndexMap;
use serde::Serialize;

use crate::class::ClassId;
use crate::event::EventModel;
use crate::event_methods;
use crate::imports::TypeRequirements;
use crate::parameter::ParameterModel;
use crate::type_resolver::{ANY_TYPE, TypeResolver};

/// Return type literal used for fluent methods.
pub const THIS_TYPE: &str = "this";

/// Points at a method in another class's method list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub class: ClassId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnType {
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    /// Rendered union member -> the raw token it was resolved from.
    #[serde(skip)]
    pub raw_types: IndexMap<String, String>,
    /// The source documented no return value.
    pub unknown: bool,
}

impl ReturnType {
    pub fn unknown() -> Self {
        ReturnType {
            ty: ANY_TYPE.to_string(),
            description: String::new(),
            raw_types: IndexMap::new(),
            unknown: true,
        }
    }

    pub fn fluent() -> Self {
        ReturnType {
            ty: THIS_TYPE.to_string(),
            description: String::new(),
            raw_types: IndexMap::new(),
            unknown: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Skip return type synthesis (constructors).
    pub suppress_return_value: bool,
    /// Mark every variant static regardless of the source record.
    pub force_static: bool,
}

impl SynthesisOptions {
    pub fn constructor() -> Self {
        SynthesisOptions {
            suppress_return_value: true,
            force_static: false,
        }
    }

    pub fn static_members() -> Self {
        SynthesisOptions {
            suppress_return_value: false,
            force_static: true,
        }
    }
}

/// What a method synthesizer can see of its owner.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    pub resolver: TypeResolver<'a>,
    /// Events of the owning class; empty for namespaces.
    pub events: &'a [EventModel],
}

/// Outcome of comparing a subclass method against a base class method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadDecision {
    /// Different names.
    Unrelated,
    /// Same name, the subclass signature already covers the base.
    Compatible,
    /// The base method is fluent; the subclass method must return `this` too.
    AdoptThisReturn,
    /// The base signature has to be added to the subclass.
    Overload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStyle {
    /// Class member: visibility and `static` modifiers included.
    Member,
    /// Interface member or namespace function.
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodModel {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub parameters: Vec<ParameterModel>,
    /// `None` for constructors.
    pub return_type: Option<ReturnType>,
    pub is_generic: bool,
    pub generic_parameters: Vec<String>,
    /// The base class method this one was merged with.
    #[serde(skip)]
    pub overloaded_method: Option<MethodRef>,
    #[serde(skip)]
    pub requirements: TypeRequirements,
}

impl MethodModel {
    pub fn build(
        raw: &RawMethod,
        context: &SynthesisContext<'_>,
        options: SynthesisOptions,
    ) -> Self {
        let mut method = MethodModel {
            name: raw.name.clone(),
            description: raw.description.clone(),
            visibility: raw.visibility.normalized(),
            is_static: raw.is_static || options.force_static,
            parameters: Vec::new(),
            return_type: None,
            is_generic: false,
            generic_parameters: Vec::new(),
            overloaded_method: None,
            requirements: TypeRequirements::default(),
        };

        match event_methods::match_event(&raw.name, context.events) {
            Some(event) => {
                event_methods::synthesize_event_method(&mut method, raw, event, &context.resolver)
            }
            None => method.make_standard_parts(raw, &context.resolver, options),
        }
        method
    }

    fn make_standard_parts(
        &mut self,
        raw: &RawMethod,
        resolver: &TypeResolver<'_>,
        options: SynthesisOptions,
    ) {
        for parameter in &raw.parameters {
            let (model, needs) = ParameterModel::from_raw(parameter, resolver);
            self.requirements.merge(needs);
            self.parameters.push(model);
        }
        if !options.suppress_return_value {
            self.create_return_type(raw, resolver);
        }
    }

    pub(crate) fn create_return_type(&mut self, raw: &RawMethod, resolver: &TypeResolver<'_>) {
        let return_type = match &raw.return_value {
            Some(value) => {
                let resolved = resolver.resolve(&value.ty);
                self.requirements.merge(resolved.requirements);
                ReturnType {
                    ty: resolved.rendered,
                    description: value.description.clone(),
                    raw_types: resolved.raw_types.into_iter().collect(),
                    unknown: false,
                }
            }
            None => ReturnType::unknown(),
        };
        self.return_type = Some(return_type);
    }

    pub fn return_type_text(&self) -> &str {
        self.return_type
            .as_ref()
            .map(|return_type| return_type.ty.as_str())
            .unwrap_or(ANY_TYPE)
    }

    /// Decide whether `base` must be carried into the subclass next to `self`.
    ///
    /// A positional parameter type mismatch at equal arity is enough to flag an
    /// overload, whatever the return types are. Otherwise every return type
    /// alternative of the base must also be an alternative of `self`.
    pub fn overload_decision(&self, base: &MethodModel) -> OverloadDecision {
        if self.name != base.name {
            return OverloadDecision::Unrelated;
        }

        if self.parameters.len() == base.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&base.parameters)
                .any(|(own, inherited)| own.ty != inherited.ty)
        {
            return OverloadDecision::Overload;
        }

        let base_return = base.return_type_text();
        if base_return == THIS_TYPE {
            return OverloadDecision::AdoptThisReturn;
        }

        let own: Vec<&str> = split_alternatives(self.return_type_text()).collect();
        if split_alternatives(base_return).any(|alternative| !own.contains(&alternative)) {
            return OverloadDecision::Overload;
        }
        OverloadDecision::Compatible
    }

    pub fn adopt_this_return(&mut self) {
        let return_type = self.return_type.get_or_insert_with(ReturnType::fluent);
        return_type.ty = THIS_TYPE.to_string();
        return_type.unknown = false;
    }

    /// Union this method's return type with the base method's.
    ///
    /// Collapses to `this` when either side is fluent. Otherwise every merged
    /// alternative is resolved again (through the base's raw tokens where
    /// known) so the caller can import what the merged type needs.
    pub fn merge_base_type(
        &mut self,
        base: &MethodModel,
        origin: MethodRef,
        resolver: &TypeResolver<'_>,
    ) -> TypeRequirements {
        self.overloaded_method = Some(origin);
        let mut requirements = TypeRequirements::default();
        let Some(base_return) = &base.return_type else {
            return requirements;
        };

        let mut merged: Vec<String> = Vec::new();
        for alternative in
            split_alternatives(self.return_type_text()).chain(split_alternatives(&base_return.ty))
        {
            if !merged.iter().any(|seen| seen == alternative) {
                merged.push(alternative.to_string());
            }
        }

        let return_type = self.return_type.get_or_insert_with(ReturnType::unknown);
        if merged.iter().any(|alternative| alternative == THIS_TYPE) {
            return_type.ty = THIS_TYPE.to_string();
            return requirements;
        }

        for alternative in &merged {
            let raw = base_return.raw_types.get(alternative);
            let token = raw.map(String::as_str).unwrap_or(alternative.as_str());
            requirements.merge(resolver.resolve(token).requirements);
            if let Some(raw) = raw {
                return_type
                    .raw_types
                    .insert(alternative.clone(), raw.clone());
            }
        }
        return_type.ty = merged.join("|");
        return_type.unknown = false;
        requirements
    }

    /// Render the call signature without trailing `;`.
    pub fn signature(&self, style: SignatureStyle) -> String {
        let mut out = String::new();
        if style == SignatureStyle::Member {
            if self.visibility != Visibility::Public {
                out.push_str(self.visibility.as_str());
                out.push(' ');
            }
            if self.is_static {
                out.push_str("static ");
            }
        }
        out.push_str(&self.name);
        if self.is_generic && !self.generic_parameters.is_empty() {
            out.push('<');
            out.push_str(&self.generic_parameters.join(", "));
            out.push('>');
        }
        out.push('(');
        let parameters: Vec<String> = self.parameters.iter().map(ParameterModel::render).collect();
        out.push_str(&parameters.join(", "));
        out.push(')');
        if let Some(return_type) = &self.return_type {
            out.push_str(": ");
            out.push_str(&return_type.ty);
        }
        out
    }

    /// JSDoc body lines (without the comment delimiters).
    pub fn doc_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        if !self.description.is_empty() {
            lines.extend(self.description.lines().map(str::to_string));
        }
        for parameter in &self.parameters {
            let name = if parameter.optional {
                format!("[{}]", parameter.name)
            } else {
                parameter.name.clone()
            };
            let mut line = format!("@param {{{}}} {}", parameter.ty, name);
            if !parameter.description.is_empty() {
                line.push(' ');
                line.push_str(&parameter.description);
            }
            lines.push(line);
        }
        if let Some(return_type) = &self.return_type
            && !return_type.unknown
        {
            let mut line = format!("@returns {{{}}}", return_type.ty);
            if !return_type.description.is_empty() {
                line.push(' ');
                line.push_str(&return_type.description);
            }
            lines.push(line);
        }
        lines
    }
}

fn split_alternatives(ty: &str) -> impl Iterator<Item = &str> {
    ty.split('|').map(str::trim)
}
