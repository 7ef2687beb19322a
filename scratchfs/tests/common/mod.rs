//! Common test utilities for integration tests.
//!
//! This module provides fixture builders that lay out real directory trees
//! under temporary directories.

use std::fs;
use std::path::{Path as StdPath, PathBuf};

use scratchfs::Path;
use tempfile::TempDir;

/// Builder for a directory tree inside a fresh temporary directory.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let tree = TreeFixture::new()
///     .with_dir("a/b")
///     .with_file("a/b/c.txt", "data")
///     .build();
/// ```
#[allow(dead_code)]
pub struct TreeFixture {
    dirs: Vec<String>,
    files: Vec<(String, String)>,
    symlinks: Vec<(String, PathBuf)>,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self {
            dirs: Vec::new(),
            files: Vec::new(),
            symlinks: Vec::new(),
        }
    }

    /// Adds a directory (parents included) relative to the tree root.
    pub fn with_dir(mut self, rel: &str) -> Self {
        self.dirs.push(rel.to_string());
        self
    }

    /// Adds a file with contents relative to the tree root.
    pub fn with_file(mut self, rel: &str, contents: &str) -> Self {
        self.files.push((rel.to_string(), contents.to_string()));
        self
    }

    /// Adds a symbolic link relative to the tree root pointing at `target`.
    pub fn with_symlink(mut self, rel: &str, target: impl AsRef<StdPath>) -> Self {
        self.symlinks
            .push((rel.to_string(), target.as_ref().to_path_buf()));
        self
    }

    /// Lays the tree out under `<tempdir>/tree`.
    pub fn build(self) -> Tree {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("tree");
        fs::create_dir(&root).unwrap();

        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        for (rel, contents) in &self.files {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }
        for (rel, target) in &self.symlinks {
            std::os::unix::fs::symlink(target, root.join(rel)).unwrap();
        }

        Tree { temp, root }
    }
}

/// A laid-out tree. The temporary directory is removed on drop.
#[allow(dead_code)]
pub struct Tree {
    temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl Tree {
    /// The tree root as a standard path.
    pub fn std_root(&self) -> &StdPath {
        &self.root
    }

    /// The tree root as a scratchfs path.
    pub fn root(&self) -> Path {
        Path::from_std_path(&self.root).unwrap()
    }

    /// A path below the tree root.
    pub fn child(&self, rel: &str) -> Path {
        self.root().join(rel).unwrap()
    }

    /// The temporary directory holding the tree.
    pub fn outer(&self) -> &StdPath {
        self.temp.path()
    }
}

/// Counts every entry below `root`, `root` excluded.
#[allow(dead_code)]
pub fn count_entries(root: &StdPath) -> usize {
    fs::read_dir(root)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            let nested = if entry.file_type().unwrap().is_dir() {
                count_entries(&entry.path())
            } else {
                0
            };
            1 + nested
        })
        .sum()
}
