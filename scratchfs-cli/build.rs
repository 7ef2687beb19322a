//! Build script for scratchfs-cli.
//!
//! Renders the `scratchfs.1` man page into `OUT_DIR/man` with clap_mangen.
//!
//! The command structure is rebuilt here because a build script cannot
//! depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path").value_name("PATH").required(true).help(help)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .value_parser(["text", "json"])
        .default_value("text")
        .help("Output format")
}

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs and src/commands/.
fn build_cli() -> Command {
    Command::new("scratchfs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create, inspect and remove scratch directory trees")
        .long_about(
            "Command-line tool for creating scratch directories and removing them again, \
             including trees that have other filesystems mounted inside them",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read an additional configuration file")
                .value_name("PATH")
                .global(true)
                .env("SCRATCHFS_CONFIG"),
        )
        .subcommands(vec![
            Command::new("cleanup")
                .about("Unmount everything inside a tree, then delete it")
                .long_about(
                    "Detach every filesystem mounted inside the tree, deepest first, and then \
                     delete the tree bottom-up without crossing onto another device",
                )
                .arg(path_arg("Root of the tree to remove"))
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Show what would be done without doing it")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg()),
            Command::new("mounts")
                .about("List mount points inside a tree, deepest first")
                .arg(path_arg("Root of the tree to scan"))
                .arg(format_arg()),
            Command::new("stat")
                .about("Show metadata for a path without following a final symlink")
                .arg(path_arg("Path to probe"))
                .arg(format_arg()),
            Command::new("ls")
                .about("List a directory")
                .arg(path_arg("Directory to list"))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .short('a')
                        .help("Include the . and .. entries")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg()),
            Command::new("mktemp")
                .about("Create a uniquely named scratch directory")
                .long_about(
                    "Create a scratch directory in the configured work directory and print its path",
                )
                .arg(
                    Arg::new("template")
                        .value_name("TEMPLATE")
                        .help("Name template ending in XXXXXX"),
                ),
            Command::new("exists")
                .about("Exit 0 if a path exists, 1 if it does not")
                .arg(path_arg("Path to check"))
                .arg(
                    Arg::new("not")
                        .long("not")
                        .help("Fail if the path exists")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("scratchfs.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
