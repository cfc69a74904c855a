//! Common types shared by the dtsgen crates.
//!
//! This crate provides the foundation the pipeline is built on:
//! - The raw symbol schema of a library's API description (`Symbol`, `RawMethod`, ...)
//! - Generator configuration (`GeneratorConfig`)
//! - Small helpers for qualified type paths

// Raw symbol schema as delivered by the documentation source
pub mod symbols;
pub use symbols::{
    ApiSource, ClassMetadata, RawEvent, RawMethod, RawParameter, RawProperty, RawReturnValue,
    Symbol, SymbolKind, Visibility,
};

// Generator configuration
pub mod config;
pub use config::{ConnectionConfig, GeneratorConfig, PostProcessRule};

// Qualified type path helpers
pub mod type_path;
pub use type_path::{capitalize, is_qualified, last_segment, module_of, split_type_path};

#[cfg(test)]
#[path = "tests/symbols_tests.rs"]
mod symbols_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/type_path_tests.rs"]
mod type_path_tests;
