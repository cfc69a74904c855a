//! The generation pipeline.
//!
//! Phases run in a fixed order over a complete set of sources:
//!
//! 1. build the ambient type registry
//! 2. enums (rendered per library)
//! 3. namespaces
//! 4. interfaces (rendered as soon as they are built)
//! 5. classes
//! 6. base class linking
//! 7. overload propagation
//! 8. rendering of classes and namespaces
//!
//! A single render failure is reported and counted; it does not stop the run.

use dtsgen_common::{ApiSource, GeneratorConfig, SymbolKind};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, span};

use crate::ambient::AmbientTypeRegistry;
use crate::class::{ClassModel, DeclarationKind};
use crate::declarations::{ClassDeclaration, NamespaceDeclaration};
use crate::enums::EnumModel;
use crate::inheritance::{ClassGraph, InheritanceCycle};
use crate::namespace::NamespaceModel;
use crate::observer::{Phase, PipelineEvent, PipelineObserver};
use crate::render::{DeclarationRenderer, RenderError, RenderKind};
use crate::type_resolver::TypeResolver;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InheritanceCycle(#[from] InheritanceCycle),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFailure {
    pub kind: RenderKind,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedBaseClass {
    pub class: String,
    pub extends: String,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub sources: usize,
    pub ambient_types: usize,
    pub enums: usize,
    pub namespaces: usize,
    pub interfaces: usize,
    pub classes: usize,
    pub skipped_symbols: usize,
    pub linked_base_classes: usize,
    pub unresolved_base_classes: Vec<UnresolvedBaseClass>,
    pub inherited_overloads: usize,
    pub unresolved_types: usize,
    pub rendered: usize,
    pub render_failures: Vec<RenderFailure>,
}

impl PipelineReport {
    pub fn failure_count(&self) -> usize {
        self.render_failures.len()
    }
}

/// Everything the run produced, in source order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub report: PipelineReport,
    pub enums: Vec<EnumModel>,
    pub interfaces: Vec<ClassDeclaration>,
    pub classes: Vec<ClassDeclaration>,
    pub namespaces: Vec<NamespaceDeclaration>,
}

pub struct Pipeline<'a> {
    config: &'a GeneratorConfig,
    observer: &'a dyn PipelineObserver,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a GeneratorConfig, observer: &'a dyn PipelineObserver) -> Self {
        Pipeline { config, observer }
    }

    /// Run all phases. `sources` must be the complete set: the ambient
    /// registry is built once, before any model.
    pub fn run(
        &self,
        sources: &[ApiSource],
        renderer: &dyn DeclarationRenderer,
    ) -> Result<PipelineOutput, PipelineError> {
        let run_span = span!(Level::INFO, "pipeline", sources = sources.len());
        let _run = run_span.enter();

        let mut output = PipelineOutput::default();
        output.report.sources = sources.len();

        let registry = self.phase(Phase::AmbientRegistry, || {
            let registry = AmbientTypeRegistry::build(sources);
            (registry.len() + registry.class_count(), registry)
        });
        output.report.ambient_types = registry.len();
        let resolver = TypeResolver::new(&self.config.substituted_types, &registry);

        self.phase(Phase::Enums, || {
            for source in sources {
                let enums: Vec<EnumModel> = source
                    .symbols
                    .iter()
                    .filter(|symbol| {
                        symbol.kind == SymbolKind::Enum
                            || (symbol.kind == SymbolKind::Namespace
                                && self.config.is_enum_namespace(&symbol.name))
                    })
                    .map(|symbol| EnumModel::from_symbol(symbol, &source.library))
                    .collect();
                if enums.is_empty() {
                    continue;
                }
                if let Err(err) = renderer.render_enums(&source.library, &enums) {
                    self.record_failure(
                        &mut output.report,
                        RenderKind::Enums,
                        &source.library,
                        err,
                    );
                } else {
                    self.record_rendered(&mut output.report, RenderKind::Enums, &source.library);
                }
                output.report.enums += enums.len();
                output.enums.extend(enums);
            }
            (output.report.enums, ())
        });

        let namespaces = self.phase(Phase::Namespaces, || {
            let namespaces: Vec<NamespaceModel> = sources
                .iter()
                .flat_map(|source| {
                    source
                        .symbols
                        .iter()
                        .filter(|symbol| {
                            symbol.kind == SymbolKind::Namespace
                                && !self.config.is_enum_namespace(&symbol.name)
                        })
                        .map(|symbol| NamespaceModel::build(symbol, &source.library, &resolver))
                })
                .collect();
            (namespaces.len(), namespaces)
        });
        output.report.namespaces = namespaces.len();
        for namespace in &namespaces {
            self.report_unresolved(
                &mut output.report,
                &namespace.qualified_name,
                &namespace.unresolved_types,
            );
        }

        let interfaces = self.phase(Phase::Interfaces, || {
            let mut interfaces = ClassGraph::new();
            for source in sources {
                for symbol in source.symbols.iter().filter(|s| s.kind == SymbolKind::Interface) {
                    let model = ClassModel::build(
                        interfaces.next_id(),
                        DeclarationKind::Interface,
                        symbol,
                        &source.library,
                        &resolver,
                    );
                    interfaces.push(model);
                }
            }
            (interfaces.len(), interfaces)
        });
        output.report.interfaces = interfaces.len();
        let interface_declarations: Vec<ClassDeclaration> = interfaces
            .iter()
            .map(|interface| {
                self.report_unresolved(
                    &mut output.report,
                    &interface.qualified_name,
                    &interface.unresolved_types,
                );
                interface.declaration(None)
            })
            .collect();
        self.render_all(
            &mut output.report,
            RenderKind::Interface,
            &interface_declarations,
            |declaration| declaration.qualified_name.as_str(),
            |declaration| renderer.render_interface(declaration),
        );
        output.interfaces = interface_declarations;

        let mut classes = self.phase(Phase::Classes, || {
            let mut classes = ClassGraph::new();
            for source in sources {
                for symbol in &source.symbols {
                    match symbol.kind {
                        SymbolKind::Class => {
                            let model = ClassModel::build(
                                classes.next_id(),
                                DeclarationKind::Class,
                                symbol,
                                &source.library,
                                &resolver,
                            );
                            classes.push(model);
                        }
                        SymbolKind::Other => {
                            self.observer.on_event(&PipelineEvent::SymbolSkipped {
                                library: source.library.clone(),
                                name: symbol.name.clone(),
                                kind: symbol.kind,
                            });
                        }
                        SymbolKind::Interface | SymbolKind::Namespace | SymbolKind::Enum => {}
                    }
                }
            }
            (classes.len(), classes)
        });
        output.report.classes = classes.len();
        output.report.skipped_symbols = sources
            .iter()
            .flat_map(|source| &source.symbols)
            .filter(|symbol| symbol.kind == SymbolKind::Other)
            .count();

        let summary = self.phase(Phase::BaseClassLinking, || {
            let summary = classes.link_base_classes(self.observer);
            (summary.linked, summary)
        });
        output.report.linked_base_classes = summary.linked;
        output.report.unresolved_base_classes = summary
            .unresolved
            .into_iter()
            .map(|unresolved| UnresolvedBaseClass {
                class: unresolved.class,
                extends: unresolved.extends,
            })
            .collect();
        classes.check_acyclic()?;

        output.report.inherited_overloads = self.phase(Phase::OverloadPropagation, || {
            let added = classes.propagate_overloads(&resolver, self.observer);
            (added, added)
        });

        self.observer
            .on_event(&PipelineEvent::PhaseStarted(Phase::Rendering));
        let rendering_span = span!(Level::INFO, "phase", phase = %Phase::Rendering);
        let rendering = rendering_span.enter();
        let class_declarations: Vec<ClassDeclaration> = classes
            .iter()
            .map(|class| {
                self.report_unresolved(
                    &mut output.report,
                    &class.qualified_name,
                    &class.unresolved_types,
                );
                class.declaration(classes.base_of(class.id))
            })
            .collect();
        let namespace_declarations: Vec<NamespaceDeclaration> =
            namespaces.iter().map(NamespaceModel::declaration).collect();
        self.render_all(
            &mut output.report,
            RenderKind::Class,
            &class_declarations,
            |declaration| declaration.qualified_name.as_str(),
            |declaration| renderer.render_class(declaration),
        );
        self.render_all(
            &mut output.report,
            RenderKind::Namespace,
            &namespace_declarations,
            |declaration| declaration.qualified_name.as_str(),
            |declaration| renderer.render_namespace(declaration),
        );
        drop(rendering);
        self.observer.on_event(&PipelineEvent::PhaseFinished {
            phase: Phase::Rendering,
            items: class_declarations.len() + namespace_declarations.len(),
        });

        output.classes = class_declarations;
        output.namespaces = namespace_declarations;
        Ok(output)
    }

    fn phase<T>(&self, phase: Phase, body: impl FnOnce() -> (usize, T)) -> T {
        let phase_span = span!(Level::INFO, "phase", %phase);
        let _entered = phase_span.enter();
        self.observer.on_event(&PipelineEvent::PhaseStarted(phase));
        let (items, value) = body();
        self.observer
            .on_event(&PipelineEvent::PhaseFinished { phase, items });
        value
    }

    fn render_all<T: Sync>(
        &self,
        report: &mut PipelineReport,
        kind: RenderKind,
        items: &[T],
        name: impl Fn(&T) -> &str + Sync,
        render: impl Fn(&T) -> Result<(), RenderError> + Sync,
    ) {
        let failures: Vec<RenderFailure> = items
            .par_iter()
            .filter_map(|item| match render(item) {
                Ok(()) => {
                    self.observer.on_event(&PipelineEvent::Rendered {
                        kind,
                        name: name(item).to_string(),
                    });
                    None
                }
                Err(err) => {
                    let failure = RenderFailure {
                        kind,
                        name: name(item).to_string(),
                        message: err.to_string(),
                    };
                    self.observer.on_event(&PipelineEvent::RenderFailed {
                        kind,
                        name: failure.name.clone(),
                        message: failure.message.clone(),
                    });
                    Some(failure)
                }
            })
            .collect();
        report.rendered += items.len() - failures.len();
        report.render_failures.extend(failures);
    }

    fn record_rendered(&self, report: &mut PipelineReport, kind: RenderKind, name: &str) {
        report.rendered += 1;
        self.observer.on_event(&PipelineEvent::Rendered {
            kind,
            name: name.to_string(),
        });
    }

    fn record_failure(
        &self,
        report: &mut PipelineReport,
        kind: RenderKind,
        name: &str,
        err: RenderError,
    ) {
        let failure = RenderFailure {
            kind,
            name: name.to_string(),
            message: err.to_string(),
        };
        self.observer.on_event(&PipelineEvent::RenderFailed {
            kind,
            name: failure.name.clone(),
            message: failure.message.clone(),
        });
        report.render_failures.push(failure);
    }

    fn report_unresolved(&self, report: &mut PipelineReport, owner: &str, tokens: &[String]) {
        for token in tokens {
            report.unresolved_types += 1;
            self.observer.on_event(&PipelineEvent::TypeUnresolved {
                owner: owner.to_string(),
                token: token.clone(),
            });
        }
    }
}
