//! CLI structure and command definitions.

use crate::commands::{
    CleanupCommand, CompletionsCommand, ExistsCommand, LsCommand, MktempCommand, MountsCommand,
    StatCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Create, inspect and remove scratch directory trees.
#[derive(Parser)]
#[command(name = "scratchfs")]
#[command(
    version,
    about = "Create, inspect and remove scratch directory trees",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read an additional configuration file
    #[arg(long, value_name = "PATH", global = true, env = "SCRATCHFS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Unmount everything inside a tree, then delete it
    Cleanup(CleanupCommand),

    /// List mount points inside a tree, deepest first
    Mounts(MountsCommand),

    /// Show metadata for a path without following a final symlink
    Stat(StatCommand),

    /// List a directory
    Ls(LsCommand),

    /// Create a uniquely named scratch directory
    Mktemp(MktempCommand),

    /// Exit 0 if a path exists, 1 if it does not
    Exists(ExistsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
