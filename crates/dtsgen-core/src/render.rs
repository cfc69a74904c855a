//! The boundary between the pipeline and whatever writes declaration text.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::declarations::{ClassDeclaration, NamespaceDeclaration};
use crate::enums::EnumModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Enums,
    Interface,
    Class,
    Namespace,
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderKind::Enums => "enums",
            RenderKind::Interface => "interface",
            RenderKind::Class => "class",
            RenderKind::Namespace => "namespace",
        })
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("post-processing failed for {target}: {message}")]
    PostProcess { target: String, message: String },
    #[error("{0}")]
    Other(String),
}

/// Renders finished models. Called from worker threads.
pub trait DeclarationRenderer: Sync {
    /// All enums of one library go into a single file.
    fn render_enums(&self, library: &str, enums: &[EnumModel]) -> Result<(), RenderError>;
    fn render_interface(&self, declaration: &ClassDeclaration) -> Result<(), RenderError>;
    fn render_class(&self, declaration: &ClassDeclaration) -> Result<(), RenderError>;
    fn render_namespace(&self, declaration: &NamespaceDeclaration) -> Result<(), RenderError>;
}
