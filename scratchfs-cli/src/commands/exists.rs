//! Command to assert that a path exists.

use crate::error::CliError;
use crate::utils::{resolve_path, GlobalOptions};
use clap::Args;
use scratchfs::{exists, SystemFileSystem};
use std::path::PathBuf;

/// Exit 0 if a path exists, 1 if it does not.
#[derive(Args)]
pub struct ExistsCommand {
    /// Path to check
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Invert the assertion (fail if the path exists)
    #[arg(long)]
    pub not: bool,
}

impl ExistsCommand {
    /// Execute the exists command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let path = resolve_path(&self.path)?;
        let present = exists(&SystemFileSystem, &path)?;

        let success = if self.not { !present } else { present };
        if success {
            Ok(())
        } else {
            let msg = if self.not {
                format!("Assertion failed: {path} exists")
            } else {
                format!("Assertion failed: {path} does not exist")
            };
            Err(CliError::SemanticFailure(msg))
        }
    }
}
