//! Removal of directory trees that may hold mounted filesystems.
//!
//! A cleanup runs in two phases. Planning refuses the filesystem root,
//! probes the tree root and discovers every mount point beneath it.
//! Execution unmounts those points deepest first and then deletes the tree
//! bottom-up, refusing to touch any entry whose device differs from the
//! root's.
//!
//! ## Failure semantics
//!
//! Every failure aborts the operation at once. An unmount failure aborts
//! before anything is deleted. Deletion itself is not transactional: if a
//! removal fails midway, the entries already removed stay removed and a
//! partial tree remains on disk.

use crate::error::{Error, Result};
use crate::fs::{Directory, FileInfo, FileSystem, SystemFileSystem};
use crate::path::Path;

use super::mounts::MountScanner;

/// What a cleanup would do, computed without modifying anything.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CleanupPlan {
    /// The tree root.
    pub root: Path,
    /// Device id of the tree root.
    pub root_device: u64,
    /// Mount points to detach, deepest first.
    pub mount_points: Vec<Path>,
}

impl CleanupPlan {
    /// Human-readable descriptions of the planned steps.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.mount_points
            .iter()
            .map(|mount| format!("Unmount {mount}"))
            .chain(std::iter::once(format!("Remove tree {}", self.root)))
            .collect()
    }
}

/// Outcome of a completed cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CleanupResult {
    /// Mount points detached, in the order they were detached.
    pub unmounted: Vec<Path>,
    /// Number of non-directory entries unlinked.
    pub files_removed: usize,
    /// Number of directories removed, the root included.
    pub directories_removed: usize,
}

impl CleanupResult {
    /// Total number of entries removed.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.files_removed + self.directories_removed
    }
}

/// Removes directory trees, detaching mounted filesystems first.
///
/// # Examples
///
/// ```
/// use scratchfs::fs::{exists, MemoryFileSystem};
/// use scratchfs::{Path, TreeCleaner};
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir("/scratch").unwrap();
/// fs.create_dir("/scratch/sub").unwrap();
/// fs.create_file("/scratch/sub/out.log").unwrap();
///
/// let root = Path::new("/scratch").unwrap();
/// let result = TreeCleaner::new(&fs).cleanup(&root).unwrap();
///
/// assert_eq!(result.files_removed, 1);
/// assert_eq!(result.directories_removed, 2);
/// assert!(!exists(&fs, &root).unwrap());
/// ```
pub struct TreeCleaner<'a, F: FileSystem + ?Sized = SystemFileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> TreeCleaner<'a, F> {
    /// Create a cleaner over `fs`.
    #[must_use]
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Compute the cleanup of `root` without modifying anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RefusedRootDeletion`] for `/`, however it is spelled,
    /// and the first probe or listing failure otherwise.
    pub fn plan(&self, root: &Path) -> Result<CleanupPlan> {
        let info = self.guard_root(root)?;
        let mount_points = MountScanner::new(self.fs).scan_from(root, &info)?;
        log::debug!(
            "planned cleanup of {}: {} mount point(s)",
            root,
            mount_points.len()
        );

        Ok(CleanupPlan {
            root: root.clone(),
            root_device: info.device(),
            mount_points,
        })
    }

    /// Carry out a plan: unmount every listed mount point, then remove the
    /// tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] with call `unmount` before anything is
    /// deleted if a detach fails. During deletion, returns
    /// [`Error::CrossDeviceBoundary`] for an entry on another device and
    /// [`Error::System`] for the first failing probe, listing or removal.
    pub fn execute(&self, plan: &CleanupPlan) -> Result<CleanupResult> {
        self.guard_root(&plan.root)?;

        let mut result = CleanupResult::default();

        for mount in &plan.mount_points {
            self.fs
                .unmount(mount)
                .map_err(|e| Error::system("unmount", mount, e))?;
            log::debug!("unmounted {}", mount);
            result.unmounted.push(mount.clone());
        }

        self.remove(&plan.root, plan, &mut result)?;
        log::debug!(
            "removed {} ({} files, {} directories)",
            plan.root,
            result.files_removed,
            result.directories_removed
        );
        Ok(result)
    }

    /// Plan and execute the cleanup of `root`.
    ///
    /// # Errors
    ///
    /// See [`plan`](Self::plan) and [`execute`](Self::execute).
    pub fn cleanup(&self, root: &Path) -> Result<CleanupResult> {
        let plan = self.plan(root)?;
        self.execute(&plan)
    }

    /// Refuse `/` by name, then refuse any other spelling of it (`/.`,
    /// `/tmp/..`) by comparing the probed object with the real root.
    fn guard_root(&self, root: &Path) -> Result<FileInfo> {
        if root.is_root() {
            log::warn!("refusing to clean up the root directory");
            return Err(Error::RefusedRootDeletion);
        }

        let info = FileInfo::probe(self.fs, root)?;
        let fs_root = FileInfo::probe(self.fs, &Path::root())?;
        if info.is_same_file(&fs_root) {
            log::warn!("refusing to clean up {}, which is the root directory", root);
            return Err(Error::RefusedRootDeletion);
        }
        Ok(info)
    }

    fn remove(&self, path: &Path, plan: &CleanupPlan, result: &mut CleanupResult) -> Result<()> {
        let info = FileInfo::probe(self.fs, path)?;
        if info.device() != plan.root_device {
            log::warn!(
                "{} is on device {}, not {}; stopping",
                path,
                info.device(),
                plan.root_device
            );
            return Err(Error::CrossDeviceBoundary {
                path: path.clone(),
                root: plan.root.clone(),
            });
        }

        if info.is_directory() {
            let dir = Directory::open(self.fs, path)?;
            for (name, _) in dir.children() {
                self.remove(&path.join(name)?, plan, result)?;
            }
            self.fs
                .rmdir(path)
                .map_err(|e| Error::system("rmdir", path, e))?;
            result.directories_removed += 1;
        } else {
            self.fs
                .unlink(path)
                .map_err(|e| Error::system("unlink", path, e))?;
            result.files_removed += 1;
        }

        Ok(())
    }
}

/// Remove the tree at `root` through `fs`, detaching mounts first.
///
/// # Errors
///
/// See [`TreeCleaner::cleanup`].
pub fn cleanup<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Result<CleanupResult> {
    TreeCleaner::new(fs).cleanup(root)
}
