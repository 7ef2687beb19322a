//! Command printing a metadata snapshot.

use crate::error::CliError;
use crate::utils::{emit, resolve_path, FormatArg, GlobalOptions};
use clap::Args;
use scratchfs::{FileInfo, OutputFormat, SystemFileSystem};
use std::path::PathBuf;

/// Show metadata for a path without following a final symlink.
#[derive(Args)]
pub struct StatCommand {
    /// Path to probe
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: FormatArg,
}

impl StatCommand {
    /// Execute the stat command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let path = resolve_path(&self.path)?;
        let info = FileInfo::probe(&SystemFileSystem, &path)?;

        let formatter = OutputFormat::from(self.format).create_formatter();
        emit(&formatter.format_file_info(&info)?);
        Ok(())
    }
}
