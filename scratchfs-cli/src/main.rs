//! Main entry point for the scratchfs CLI.
//!
//! Commands:
//! - `cleanup`: Unmount and delete a scratch tree
//! - `mounts`: List mount points inside a tree
//! - `stat`: Show metadata for a path
//! - `ls`: List a directory
//! - `mktemp`: Create a scratch directory
//! - `exists`: Test whether a path exists

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::{load_configuration, GlobalOptions};

fn main() {
    let cli = Cli::parse();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
    };

    // A broken configuration is reported by the commands that read it.
    let configured = load_configuration(&global).ok().and_then(|c| c.log_mode);
    let logger = scratchfs::init_logger(global.verbose, global.quiet, configured);
    if let Err(e) = logger.install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    let result = match cli.command {
        cli::Command::Cleanup(cmd) => cmd.execute(&global),
        cli::Command::Mounts(cmd) => cmd.execute(&global),
        cli::Command::Stat(cmd) => cmd.execute(&global),
        cli::Command::Ls(cmd) => cmd.execute(&global),
        cli::Command::Mktemp(cmd) => cmd.execute(&global),
        cli::Command::Exists(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
