//! Command listing the mount points inside a tree.

use crate::error::CliError;
use crate::utils::{emit, resolve_path, FormatArg, GlobalOptions};
use clap::Args;
use scratchfs::{MountScanner, OutputFormat, SystemFileSystem};
use std::path::PathBuf;

/// List mount points inside a tree, deepest first.
#[derive(Args)]
pub struct MountsCommand {
    /// Root of the tree to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: FormatArg,
}

impl MountsCommand {
    /// Execute the mounts command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let root = resolve_path(&self.path)?;
        let mounts = MountScanner::new(&SystemFileSystem).scan(&root)?;

        let formatter = OutputFormat::from(self.format).create_formatter();
        emit(&formatter.format_mount_points(&mounts)?);
        Ok(())
    }
}
