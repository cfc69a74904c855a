use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use dtsgen_common::GeneratorConfig;
use dtsgen_core::{Pipeline, PipelineOutput, PipelineReport, TracingObserver};
use dtsgen_emitter::{FileRenderer, OutputLayout, PostProcessor};

use crate::args::CliArgs;
use crate::driver_sources::{DirectoryFetcher, acquire_sources, cache_for};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub report: PipelineReport,
    /// Hand-written files copied over the generated output.
    pub replaced_files: usize,
}

pub fn config_path(args: &CliArgs, cwd: &Path) -> PathBuf {
    cwd.join(&args.config)
}

pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GeneratorConfig::from_json_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Acquire sources, run the pipeline into the output directory, copy the
/// replacement files over the result and optionally dump the finished models.
///
/// Paths inside the configuration are relative to the configuration file;
/// `--out` and `--emit-model` are relative to `cwd`.
pub fn run(args: &CliArgs, cwd: &Path, config: &GeneratorConfig) -> Result<RunSummary> {
    let config_path = config_path(args, cwd);
    let base_dir = config_path.parent().unwrap_or(cwd).to_path_buf();

    let endpoints = &config.connection.endpoints;
    if endpoints.is_empty() {
        bail!(
            "no endpoints configured in {} (connection.endpoints)",
            config_path.display()
        );
    }

    let post_processor = PostProcessor::from_config(&config.post_processing)
        .context("invalid postProcessing configuration")?;

    let output_dir = match &args.out {
        Some(out) => cwd.join(out),
        None => base_dir.join(&config.output_dir),
    };

    let fetcher = DirectoryFetcher::new(base_dir.join(&config.connection.root));
    let cache = cache_for(config, &base_dir, args.no_cache);
    let sources = acquire_sources(endpoints, &fetcher, cache.as_ref())
        .context("failed to acquire symbol sources")?;

    let renderer = FileRenderer::new(OutputLayout::new(&output_dir), post_processor);
    renderer
        .write_substituted_types(&config.substituted_types)
        .context("failed to write substituted types")?;
    let output = Pipeline::new(config, &TracingObserver)
        .run(&sources, &renderer)
        .context("declaration generation failed")?;
    let replaced_files = renderer
        .copy_replacements(&base_dir.join(&config.replacements_dir))
        .context("failed to copy replacement files")?;

    if let Some(model_path) = &args.emit_model {
        write_model(&cwd.join(model_path), &output)?;
    }

    info!(
        rendered = output.report.rendered,
        failures = output.report.failure_count(),
        "run finished"
    );
    Ok(RunSummary {
        output_dir,
        report: output.report,
        replaced_files,
    })
}

fn write_model(path: &Path, output: &PipelineOutput) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(output).context("failed to serialize models")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
