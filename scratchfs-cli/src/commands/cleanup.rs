//! Cleanup command implementation.
//!
//! This module implements the `cleanup` command, which detaches every
//! filesystem mounted inside a tree and then deletes the tree.

use crate::error::CliError;
use crate::utils::{emit, resolve_path, FormatArg, GlobalOptions};
use clap::Args;
use scratchfs::{OutputFormat, SystemFileSystem, TreeCleaner};
use std::path::PathBuf;

/// Unmount everything inside a tree, then delete it.
#[derive(Args)]
pub struct CleanupCommand {
    /// Root of the tree to remove
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Perform a dry run (show what would be done without doing it)
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: FormatArg,
}

impl CleanupCommand {
    /// Execute the cleanup command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = resolve_path(&self.path)?;
        let format = OutputFormat::from(self.format);
        let formatter = format.create_formatter();
        let cleaner = TreeCleaner::new(&SystemFileSystem);

        let plan = cleaner.plan(&root)?;

        if self.dry_run {
            if !global.quiet {
                eprintln!("[DRY RUN] Nothing will be unmounted or removed.");
            }
            emit(&formatter.format_cleanup_plan(&plan)?);
            return Ok(());
        }

        if global.verbose {
            for step in plan.describe() {
                eprintln!("  - {step}");
            }
        }

        let result = cleaner.execute(&plan)?;

        // Quiet text mode prints nothing on success.
        if !global.quiet || format == OutputFormat::Json {
            emit(&formatter.format_cleanup_result(&result)?);
        }

        Ok(())
    }
}
