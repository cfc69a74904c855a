//! Tracing configuration.
//!
//! Supports three output formats controlled by `DTSGEN_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   pipeline phase
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! DTSGEN_LOG=debug DTSGEN_LOG_FORMAT=tree dtsgen --config dtsgen.json
//! DTSGEN_LOG="dtsgen_core::inheritance=trace" dtsgen
//! ```
//!
//! The subscriber is only installed when `DTSGEN_LOG` or `RUST_LOG` is set, or
//! when the configuration file carries a `logLevel`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "DTSGEN_LOG";
pub const LOG_FORMAT_ENV: &str = "DTSGEN_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// Pick the filter directive: `DTSGEN_LOG`, then `RUST_LOG`, then the
/// configured level. `None` means tracing stays off.
pub fn filter_directive(
    dtsgen_log: Option<String>,
    rust_log: Option<String>,
    config_level: Option<&str>,
) -> Option<String> {
    dtsgen_log
        .or(rust_log)
        .or_else(|| config_level.map(str::to_string))
        .filter(|directive| !directive.trim().is_empty())
}

/// Initialise the global tracing subscriber. Output goes to stderr.
pub fn init_tracing(config_level: Option<&str>) {
    let Some(directive) = filter_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
        config_level,
    ) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directive);

    // A subscriber may already be installed (tests, embedding); keep it.
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);
            let _ = Registry::default().with(filter).with(tree_layer).try_init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            let _ = Registry::default().with(filter).with(json_layer).try_init();
        }
        LogFormat::Text => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
