//! Utility functions shared across CLI commands.

use crate::error::CliError;
use clap::ValueEnum;
use scratchfs::{get_current_directory, Config, ConfigBuilder, Path, SystemFileSystem};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Additional configuration file.
    pub config: Option<PathBuf>,
}

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for scratchfs::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// A configuration builder honoring `--config`.
pub fn config_builder(global: &GlobalOptions) -> ConfigBuilder {
    let builder = ConfigBuilder::new();
    match global.config {
        Some(ref path) => builder.with_config_file(path),
        None => builder,
    }
}

/// Load hierarchical configuration.
///
/// Precedence, highest first:
/// 1. Environment variables
/// 2. The `--config` file
/// 3. `~/.scratchfs/config.yaml`
/// 4. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    config_builder(global)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Convert a command-line path into an absolute library path.
///
/// Relative paths are joined onto the current directory. No symlinks are
/// resolved, so the path need not exist.
pub fn resolve_path(path: &std::path::Path) -> Result<Path, CliError> {
    let path = Path::from_std_path(path).map_err(|e| CliError::InvalidArguments(e.to_string()))?;
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = get_current_directory(&SystemFileSystem)?;
    cwd.join(path.as_str())
        .map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Print `text` to stdout unless it is empty.
pub fn emit(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}
