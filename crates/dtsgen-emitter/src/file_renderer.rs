//! Renderer that writes one `.d.ts` file per declaration below an output root.
//!
//! Besides the declarations it writes `substituted.d.ts` (the values of the
//! substitution table) and copies hand-written replacement files over the
//! generated output. Post-processing rules run on all of them.

use std::fs;
use std::path::{Path, PathBuf};

use dtsgen_core::{
    ClassDeclaration, DeclarationRenderer, EnumModel, NamespaceDeclaration, RenderError,
};
use indexmap::IndexMap;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::declaration_emitter::DeclarationEmitter;
use crate::post_process::PostProcessor;

const DECLARATION_EXTENSION: &str = ".d.ts";
pub const SUBSTITUTED_TYPES_TARGET: &str = "substituted";

/// Output target naming. A target is a path relative to the output root
/// without the `.d.ts` extension; post-processing rules match against it.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn enums_target(library: &str) -> String {
        format!("enums/{library}.enums")
    }

    pub fn interface_target(declaration: &ClassDeclaration) -> String {
        format!("interfaces/{}.{}", declaration.full_name, declaration.name)
    }

    pub fn class_target(declaration: &ClassDeclaration) -> String {
        format!("classes/{}", declaration.full_name)
    }

    pub fn namespace_target(declaration: &NamespaceDeclaration) -> String {
        format!("namespaces/{}", declaration.qualified_name)
    }

    pub fn path_for(&self, target: &str) -> PathBuf {
        self.root.join(format!("{target}{DECLARATION_EXTENSION}"))
    }
}

pub struct FileRenderer {
    layout: OutputLayout,
    post_processor: PostProcessor,
}

impl FileRenderer {
    pub fn new(layout: OutputLayout, post_processor: PostProcessor) -> Self {
        FileRenderer {
            layout,
            post_processor,
        }
    }

    /// Write every substitution value, one per line, in table order.
    pub fn write_substituted_types(
        &self,
        substitutions: &IndexMap<String, String>,
    ) -> Result<(), RenderError> {
        let text = substitutions
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .map(|(_, replacement)| replacement.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.write_target(SUBSTITUTED_TYPES_TARGET, text)
    }

    /// Copy the tree below `source` into the output root, replacing
    /// generated files of the same name. Copied `.d.ts` files go through
    /// post-processing like generated ones. A missing `source` copies nothing.
    pub fn copy_replacements(&self, source: &Path) -> Result<usize, RenderError> {
        if !source.is_dir() {
            debug!(source = %source.display(), "no replacement files");
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.map_err(|err| RenderError::Io {
                path: err.path().unwrap_or(source).to_path_buf(),
                source: err.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|err| RenderError::Other(err.to_string()))?;
            let destination = self.layout.root().join(relative);
            create_parent(&destination)?;

            let target = relative
                .to_string_lossy()
                .replace('\\', "/")
                .strip_suffix(DECLARATION_EXTENSION)
                .map(str::to_string);
            match target {
                Some(target) if !self.post_processor.is_empty() => {
                    let text = fs::read_to_string(entry.path()).map_err(|source| {
                        RenderError::Io {
                            path: entry.path().to_path_buf(),
                            source,
                        }
                    })?;
                    let text = self.post_processor.apply(&target, text);
                    write_file(&destination, text)?;
                }
                _ => {
                    fs::copy(entry.path(), &destination).map_err(|source| RenderError::Io {
                        path: destination.clone(),
                        source,
                    })?;
                }
            }
            copied += 1;
        }
        info!(source = %source.display(), copied, "copied replacement files");
        Ok(copied)
    }

    fn write_target(&self, target: &str, text: String) -> Result<(), RenderError> {
        let text = self.post_processor.apply(target, text);
        let path = self.layout.path_for(target);
        create_parent(&path)?;
        write_file(&path, text)?;
        debug!(path = %path.display(), "wrote declaration file");
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn write_file(path: &Path, text: String) -> Result<(), RenderError> {
    fs::write(path, text).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DeclarationRenderer for FileRenderer {
    fn render_enums(&self, library: &str, enums: &[EnumModel]) -> Result<(), RenderError> {
        let text = DeclarationEmitter::new().emit_enums(enums);
        self.write_target(&OutputLayout::enums_target(library), text)
    }

    fn render_interface(&self, declaration: &ClassDeclaration) -> Result<(), RenderError> {
        let text = DeclarationEmitter::new().emit_interface(declaration);
        self.write_target(&OutputLayout::interface_target(declaration), text)
    }

    fn render_class(&self, declaration: &ClassDeclaration) -> Result<(), RenderError> {
        let text = DeclarationEmitter::new().emit_class(declaration);
        self.write_target(&OutputLayout::class_target(declaration), text)
    }

    fn render_namespace(&self, declaration: &NamespaceDeclaration) -> Result<(), RenderError> {
        let text = DeclarationEmitter::new().emit_namespace(declaration);
        self.write_target(&OutputLayout::namespace_target(declaration), text)
    }
}
