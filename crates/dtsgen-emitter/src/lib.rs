//! Declaration file output for dtsgen.
//!
//! `DeclarationEmitter` turns finished models into `.d.ts` text,
//! `PostProcessor` applies the configured textual rules and `FileRenderer`
//! ties both to the file system as a `DeclarationRenderer`.

pub mod source_writer;

pub mod declaration_emitter;
pub use declaration_emitter::DeclarationEmitter;

pub mod post_process;
pub use post_process::{PostProcessError, PostProcessor, expand_js_replacement};

pub mod file_renderer;
pub use file_renderer::{FileRenderer, OutputLayout, SUBSTITUTED_TYPES_TARGET};

#[cfg(test)]
#[path = "tests/declaration_emitter_tests.rs"]
mod declaration_emitter_tests;
#[cfg(test)]
#[path = "tests/post_process_tests.rs"]
mod post_process_tests;
