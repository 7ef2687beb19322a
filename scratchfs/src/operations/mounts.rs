//! Mount-point discovery.

use crate::error::Result;
use crate::fs::{Directory, FileInfo, FileSystem, SystemFileSystem};
use crate::path::Path;

/// Finds the mount points inside a directory tree.
///
/// A mount point is an entry whose device differs from its parent's. The
/// scan is post-order, so nested mount points come before the ones that
/// enclose them and the list can be unmounted front to back.
///
/// Symbolic links are probed but never followed.
///
/// # Examples
///
/// ```
/// use scratchfs::fs::MemoryFileSystem;
/// use scratchfs::{MountScanner, Path};
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir("/t").unwrap();
/// fs.create_dir("/t/outer").unwrap();
/// fs.mount("/t/outer", 2).unwrap();
/// fs.create_dir("/t/outer/inner").unwrap();
/// fs.mount("/t/outer/inner", 3).unwrap();
///
/// let mounts = MountScanner::new(&fs).scan(&Path::new("/t").unwrap()).unwrap();
/// let mounts: Vec<_> = mounts.iter().map(Path::as_str).collect();
/// assert_eq!(mounts, vec!["/t/outer/inner", "/t/outer"]);
/// ```
pub struct MountScanner<'a, F: FileSystem + ?Sized = SystemFileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> MountScanner<'a, F> {
    /// Create a scanner over `fs`.
    #[must_use]
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Scan the tree rooted at `root`.
    ///
    /// The root is compared against itself, so it is never reported even
    /// when it is a mount point.
    ///
    /// # Errors
    ///
    /// Returns the first probe or listing failure.
    pub fn scan(&self, root: &Path) -> Result<Vec<Path>> {
        let info = FileInfo::probe(self.fs, root)?;
        self.scan_from(root, &info)
    }

    /// Scan the tree at `path`, comparing it against `parent`.
    ///
    /// # Errors
    ///
    /// Returns the first probe or listing failure.
    pub fn scan_from(&self, path: &Path, parent: &FileInfo) -> Result<Vec<Path>> {
        let mut mounts = Vec::new();
        self.visit(path, parent, &mut mounts)?;
        Ok(mounts)
    }

    fn visit(&self, path: &Path, parent: &FileInfo, mounts: &mut Vec<Path>) -> Result<()> {
        let info = FileInfo::probe(self.fs, path)?;

        if info.is_directory() {
            let dir = Directory::open(self.fs, path)?;
            for (name, _) in dir.children() {
                self.visit(&path.join(name)?, &info, mounts)?;
            }
        }

        if info.device() != parent.device() {
            log::debug!(
                "found mount point {} (device {} under {})",
                path,
                info.device(),
                parent.device()
            );
            mounts.push(path.clone());
        }

        Ok(())
    }
}
