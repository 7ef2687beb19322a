//! Common test utilities for CLI integration tests.
//!
//! Every command runs with `HOME` pointed into the test's temporary
//! directory and all `SCRATCHFS_*` variables removed, so no host
//! configuration leaks into a test.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: [&str; 4] = [
    "SCRATCHFS_CONFIG",
    "SCRATCHFS_WORKDIR",
    "SCRATCHFS_TEMPLATE",
    "SCRATCHFS_LOG_MODE",
];

/// Isolated test environment.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Canonical path of the temporary directory
    pub temp_path: PathBuf,
    /// Fake home directory
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty home directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let home = temp_path.join("home");
        fs::create_dir(&home).expect("Failed to create home dir");

        Self {
            temp_dir,
            temp_path,
            home,
        }
    }

    /// A command for the scratchfs binary with an isolated environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("scratchfs").expect("Failed to find scratchfs binary");
        cmd.env("HOME", &self.home);
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a directory (and its parents) under the temp path.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file under the temp path.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create a small tree `name/{a.txt, sub/b.txt}` and return its root.
    pub fn create_tree(&self, name: &str) -> PathBuf {
        let root = self.create_dir(name);
        fs::write(root.join("a.txt"), "a").expect("Failed to write a.txt");
        fs::create_dir(root.join("sub")).expect("Failed to create sub");
        fs::write(root.join("sub").join("b.txt"), "b").expect("Failed to write b.txt");
        root
    }

    /// Write a configuration file and return its path.
    pub fn write_config(&self, name: &str, yaml: &str) -> PathBuf {
        self.create_file(name, yaml)
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run scratchfs");
        assert!(
            output.status.success(),
            "scratchfs {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

/// Convert a path into a `&str` command-line argument.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("Non-UTF-8 test path")
}
