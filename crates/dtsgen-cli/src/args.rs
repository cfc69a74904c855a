use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the dtsgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "dtsgen",
    version,
    about = "Generate TypeScript declaration files from UI5 api.json symbol sources"
)]
pub struct CliArgs {
    /// Path to the generator configuration file.
    #[arg(short = 'c', long, default_value = "dtsgen.json")]
    pub config: PathBuf,

    /// Output directory. Overrides `outputDir` from the configuration.
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Ignore the on-disk symbol cache even when `cacheApis` is enabled.
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Also write the finished declaration models as JSON to this file.
    #[arg(long = "emit-model", value_name = "FILE")]
    pub emit_model: Option<PathBuf>,

    /// When to color the run report.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve `auto` against whether the report stream is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}
