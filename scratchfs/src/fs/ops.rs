//! Process-level filesystem helpers: working directory, scratch
//! directories, existence checks.

use std::io;

use super::system::FileSystem;
use crate::error::{Error, Result};
use crate::path::Path;

/// The process's current working directory.
///
/// # Errors
///
/// Returns [`Error::System`] with call `getcwd` if the directory cannot be
/// determined.
pub fn get_current_directory<F: FileSystem + ?Sized>(fs: &F) -> Result<Path> {
    let cwd = fs
        .current_dir()
        .map_err(|e| Error::system("getcwd", &Path::root(), e))?;
    Path::new(cwd)
}

/// Change the working directory to `target` and return the previous one.
///
/// When `target` already is the working directory no change is issued.
///
/// # Errors
///
/// Returns [`Error::System`] with call `getcwd` or `chdir`.
///
/// # Examples
///
/// ```
/// use scratchfs::fs::{change_directory, get_current_directory, MemoryFileSystem};
/// use scratchfs::Path;
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir("/work").unwrap();
///
/// let previous = change_directory(&fs, &Path::new("/work").unwrap()).unwrap();
/// assert_eq!(previous, Path::root());
/// assert_eq!(get_current_directory(&fs).unwrap().as_str(), "/work");
/// ```
pub fn change_directory<F: FileSystem + ?Sized>(fs: &F, target: &Path) -> Result<Path> {
    let previous = get_current_directory(fs)?;
    if previous != *target {
        fs.set_current_dir(target)
            .map_err(|e| Error::system("chdir", target, e))?;
        log::debug!("changed directory from {} to {}", previous, target);
    }
    Ok(previous)
}

/// Create a uniquely named directory from `template`.
///
/// The template's final segment must end in the `XXXXXX` placeholder,
/// which is replaced to make the name unique.
///
/// # Errors
///
/// Returns [`Error::System`] with call `mkdtemp` if the directory cannot be
/// created.
pub fn create_temp_directory<F: FileSystem + ?Sized>(fs: &F, template: &Path) -> Result<Path> {
    let created = fs
        .mkdtemp(template)
        .map_err(|e| Error::system("mkdtemp", template, e))?;
    log::debug!("created temporary directory {}", created);
    Path::new(created)
}

/// Whether `path` exists.
///
/// A missing path yields `Ok(false)`; every other failure is an error.
///
/// # Errors
///
/// Returns [`Error::System`] with call `access` if the check fails for any
/// reason other than the path being absent.
pub fn exists<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<bool> {
    match fs.access(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::system("access", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::system::MockFileSystem;
    use crate::fs::{MemoryFileSystem, SystemFileSystem};
    use serial_test::serial;
    use tempfile::tempdir;

    fn p(s: &str) -> Path {
        Path::new(s).unwrap()
    }

    #[test]
    fn test_change_directory_returns_previous() {
        let fs = MemoryFileSystem::new();
        fs.create_dir("/a").unwrap();
        fs.create_dir("/b").unwrap();

        assert_eq!(change_directory(&fs, &p("/a")).unwrap(), p("/"));
        assert_eq!(change_directory(&fs, &p("/b")).unwrap(), p("/a"));
        assert_eq!(get_current_directory(&fs).unwrap(), p("/b"));
    }

    #[test]
    fn test_change_directory_to_current_is_noop() {
        let fs = MemoryFileSystem::new();
        fs.create_dir("/a").unwrap();
        change_directory(&fs, &p("/a")).unwrap();
        fs.clear_calls();

        assert_eq!(change_directory(&fs, &p("/a")).unwrap(), p("/a"));
        assert!(fs.calls().iter().all(|call| call.name != "chdir"));
    }

    #[test]
    fn test_change_directory_missing_target() {
        let fs = MemoryFileSystem::new();
        let err = change_directory(&fs, &p("/missing")).unwrap_err();
        assert_eq!(err.call(), Some("chdir"));
        assert_eq!(get_current_directory(&fs).unwrap(), p("/"));
    }

    #[test]
    fn test_get_current_directory_failure() {
        let mut mock = MockFileSystem::new();
        mock.expect_current_dir()
            .returning(|| Err(io::Error::from_raw_os_error(libc::ENOENT)));

        let err = get_current_directory(&mock).unwrap_err();
        assert_eq!(err.call(), Some("getcwd"));
    }

    #[test]
    fn test_exists() {
        let fs = MemoryFileSystem::new();
        fs.create_file("/present").unwrap();

        assert!(exists(&fs, &p("/present")).unwrap());
        assert!(!exists(&fs, &p("/absent")).unwrap());
    }

    #[test]
    fn test_exists_propagates_other_errors() {
        let fs = MemoryFileSystem::new();
        fs.fail("access", "/locked", libc::EACCES);

        let err = exists(&fs, &p("/locked")).unwrap_err();
        assert_eq!(err.call(), Some("access"));
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_create_temp_directory() {
        let fs = MemoryFileSystem::new();
        fs.create_dir("/tmp").unwrap();

        let created = create_temp_directory(&fs, &p("/tmp/scratchfs.XXXXXX")).unwrap();
        assert_eq!(created.branch_path(), p("/tmp"));
        assert!(created.leaf_name().starts_with("scratchfs."));
        assert!(exists(&fs, &created).unwrap());
    }

    #[test]
    fn test_create_temp_directory_missing_parent() {
        let fs = MemoryFileSystem::new();
        let err = create_temp_directory(&fs, &p("/nowhere/x.XXXXXX")).unwrap_err();
        assert_eq!(err.call(), Some("mkdtemp"));
        assert!(err.is_not_found());
    }

    #[test]
    #[serial]
    fn test_change_directory_on_host() {
        let dir = tempdir().unwrap();
        let target = Path::from_std_path(&dir.path().canonicalize().unwrap()).unwrap();

        let previous = change_directory(&SystemFileSystem, &target).unwrap();
        assert_eq!(get_current_directory(&SystemFileSystem).unwrap(), target);

        change_directory(&SystemFileSystem, &previous).unwrap();
        assert_eq!(get_current_directory(&SystemFileSystem).unwrap(), previous);
    }

    #[test]
    fn test_exists_on_host() {
        let dir = tempdir().unwrap();
        let root = Path::from_std_path(dir.path()).unwrap();

        assert!(exists(&SystemFileSystem, &root).unwrap());
        assert!(!exists(&SystemFileSystem, &root.join("missing").unwrap()).unwrap());
    }
}
