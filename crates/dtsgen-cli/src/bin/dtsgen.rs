#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use dtsgen_cli::args::CliArgs;
use dtsgen_cli::reporter::Reporter;
use dtsgen_cli::{driver, tracing_config};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let config = driver::load_config(&driver::config_path(&args, &cwd))?;
    // Tracing is off unless DTSGEN_LOG, RUST_LOG or logLevel asks for it.
    tracing_config::init_tracing(config.log_level.as_deref());

    let color = args.color.enabled(std::io::stderr().is_terminal());
    colored::control::set_override(color);

    let summary = driver::run(&args, &cwd, &config)?;
    let reporter = Reporter::new(color);
    eprint!("{}", reporter.render(&summary.report, &summary.output_dir));
    if summary.replaced_files > 0 {
        eprintln!("  {} replacement file(s) copied", summary.replaced_files);
    }
    Ok(())
}
