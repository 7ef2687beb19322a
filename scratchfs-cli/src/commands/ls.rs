//! Directory listing command.

use crate::error::CliError;
use crate::utils::{emit, resolve_path, FormatArg, GlobalOptions};
use clap::Args;
use scratchfs::{Directory, OutputFormat, SystemFileSystem};
use std::path::PathBuf;

/// List a directory.
#[derive(Args)]
pub struct LsCommand {
    /// Directory to list
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Include the `.` and `..` entries
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: FormatArg,
}

impl LsCommand {
    /// Execute the ls command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let path = resolve_path(&self.path)?;
        let dir = Directory::open(&SystemFileSystem, &path)?;

        let formatter = OutputFormat::from(self.format).create_formatter();
        emit(&formatter.format_directory(&dir, self.all)?);
        Ok(())
    }
}
