//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "scratchfs";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Where to put the generated script for `shell`, if there is a usual place.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("~/.local/share/bash-completion/completions/scratchfs"),
        Shell::Zsh => Some("~/.zsh/completions/_scratchfs (a directory on $fpath)"),
        Shell::Fish => Some("~/.config/fish/completions/scratchfs.fish"),
        Shell::PowerShell => Some("$PROFILE"),
        _ => None,
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    ///
    /// The script goes to stdout; installation hints go to stderr as shell
    /// comments so redirecting stdout captures a clean script.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            if let Some(target) = install_hint(self.shell) {
                eprintln!("# Save it with:");
                eprintln!("#   {BIN_NAME} completions {} > {target}", self.shell);
            }
            eprintln!();
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
