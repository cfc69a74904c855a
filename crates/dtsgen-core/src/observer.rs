//! Progress reporting.
//!
//! The pipeline never logs directly for events a caller may want to inspect;
//! it reports them to a `PipelineObserver`. `TracingObserver` forwards to
//! `tracing`, a channel `Sender` collects them for tests or a UI.

use std::fmt;
use std::sync::mpsc::Sender;

use dtsgen_common::SymbolKind;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::render::RenderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    AmbientRegistry,
    Enums,
    Namespaces,
    Interfaces,
    Classes,
    BaseClassLinking,
    OverloadPropagation,
    Rendering,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::AmbientRegistry,
        Phase::Enums,
        Phase::Namespaces,
        Phase::Interfaces,
        Phase::Classes,
        Phase::BaseClassLinking,
        Phase::OverloadPropagation,
        Phase::Rendering,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::AmbientRegistry => "ambient-registry",
            Phase::Enums => "enums",
            Phase::Namespaces => "namespaces",
            Phase::Interfaces => "interfaces",
            Phase::Classes => "classes",
            Phase::BaseClassLinking => "base-class-linking",
            Phase::OverloadPropagation => "overload-propagation",
            Phase::Rendering => "rendering",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    PhaseStarted(Phase),
    PhaseFinished {
        phase: Phase,
        items: usize,
    },
    SymbolSkipped {
        library: String,
        name: String,
        kind: SymbolKind,
    },
    BaseClassUnresolved {
        class: String,
        extends: String,
    },
    OverloadInherited {
        class: String,
        base_class: String,
        method: String,
    },
    TypeUnresolved {
        owner: String,
        token: String,
    },
    Rendered {
        kind: RenderKind,
        name: String,
    },
    RenderFailed {
        kind: RenderKind,
        name: String,
        message: String,
    },
}

pub trait PipelineObserver: Sync {
    fn on_event(&self, event: &PipelineEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::PhaseStarted(phase) => info!(%phase, "phase started"),
            PipelineEvent::PhaseFinished { phase, items } => {
                info!(%phase, items, "phase finished")
            }
            PipelineEvent::SymbolSkipped {
                library,
                name,
                kind,
            } => debug!(library, name, ?kind, "new symbol kind discovered, skipping"),
            PipelineEvent::BaseClassUnresolved { class, extends } => {
                info!(class, extends, "could not find base class")
            }
            PipelineEvent::OverloadInherited {
                class,
                base_class,
                method,
            } => debug!(class, base_class, method, "inherited overload"),
            PipelineEvent::TypeUnresolved { owner, token } => {
                debug!(owner, token, "unresolved type rendered as any")
            }
            PipelineEvent::Rendered { kind, name } => debug!(%kind, name, "rendered"),
            PipelineEvent::RenderFailed {
                kind,
                name,
                message,
            } => warn!(%kind, name, message, "render failed"),
        }
    }
}

impl PipelineObserver for Sender<PipelineEvent> {
    fn on_event(&self, event: &PipelineEvent) {
        // The receiver may be gone; progress events are best effort.
        let _ = self.send(event.clone());
    }
}
