//! Declaration synthesis.
//!
//! Turns raw library symbols into fully resolved declaration models:
//! - `ambient` / `type_resolver`: token to declaration type text, with imports
//! - `method` / `overloads` / `event_methods`: call signature synthesis
//! - `class` / `namespace` / `enums`: per-symbol models
//! - `inheritance`: base class linking and overload propagation
//! - `pipeline`: the phase orchestration, handing finished models to a
//!   `DeclarationRenderer`

pub mod ambient;
pub use ambient::{AmbientEntry, AmbientTypeRegistry};

pub mod imports;
pub use imports::{ImportSet, TypeImport, TypeRequirements};

pub mod type_resolver;
pub use type_resolver::{ANY_TYPE, PRIMITIVE_TYPES, ResolvedType, TypeResolver};

pub mod parameter;
pub use parameter::ParameterModel;

pub mod event;
pub use event::EventModel;

pub mod method;
pub use method::{
    MethodModel, MethodRef, OverloadDecision, ReturnType, SignatureStyle, SynthesisContext,
    SynthesisOptions, THIS_TYPE,
};

pub mod event_methods;
pub mod overloads;
pub use overloads::synthesize_overloads;

pub mod class;
pub use class::{ClassId, ClassModel, DeclarationKind};

pub mod namespace;
pub use namespace::NamespaceModel;

pub mod enums;
pub use enums::{EnumMember, EnumModel, EnumValue};

pub mod inheritance;
pub use inheritance::{ClassGraph, InheritanceCycle, LinkSummary, UnresolvedBase};

pub mod declarations;
pub use declarations::{
    ClassDeclaration, EventDeclaration, MethodDeclaration, NamespaceDeclaration,
    NamespaceProperty, SettingsInterface, SettingsProperty,
};

pub mod observer;
pub use observer::{NoopObserver, Phase, PipelineEvent, PipelineObserver, TracingObserver};

pub mod render;
pub use render::{DeclarationRenderer, RenderError, RenderKind};

pub mod pipeline;
pub use pipeline::{
    Pipeline, PipelineError, PipelineOutput, PipelineReport, RenderFailure, UnresolvedBaseClass,
};

#[cfg(test)]
#[path = "tests/test_support.rs"]
mod test_support;
#[cfg(test)]
#[path = "tests/type_resolver_tests.rs"]
mod type_resolver_tests;
#[cfg(test)]
#[path = "tests/overloads_tests.rs"]
mod overloads_tests;
#[cfg(test)]
#[path = "tests/event_methods_tests.rs"]
mod event_methods_tests;
#[cfg(test)]
#[path = "tests/method_tests.rs"]
mod method_tests;
#[cfg(test)]
#[path = "tests/class_tests.rs"]
mod class_tests;
#[cfg(test)]
#[path = "tests/inheritance_tests.rs"]
mod inheritance_tests;
