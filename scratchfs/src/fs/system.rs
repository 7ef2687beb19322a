//! The operating-system filesystem interface.
//!
//! Everything above this module talks to the host through the
//! [`FileSystem`] trait, which keeps the tree algorithms testable without
//! privileges (mounting and unmounting usually need root). The trait speaks
//! `std::io::Result`; callers attach the call name and path when they lift
//! a failure into [`Error::System`](crate::Error::System).

use std::env;
use std::ffi::{CStr, CString};
use std::fs;
use std::io;
#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

#[cfg(any(target_os = "linux", target_os = "emscripten"))]
use libc::__errno_location as errno_location;
#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
use libc::__errno as errno_location;
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly"
))]
use libc::__error as errno_location;

use crate::path::Path;

/// The raw result of a metadata probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawMetadata {
    /// Identifier of the filesystem the path lives on.
    pub device: u64,
    /// Inode number, unique within `device`.
    pub inode: u64,
    /// The full mode word, type bits included.
    pub mode: u32,
}

/// An open directory listing.
///
/// Entries are produced one at a time, `.` and `..` included. The handle
/// must be released with [`close`](DirHandle::close) on the success path so
/// that a release failure can be reported; dropping it releases it silently
/// on every other path.
pub trait DirHandle {
    /// Read the next entry name, or `None` at the end of the listing.
    fn next_entry(&mut self) -> Option<io::Result<String>>;

    /// Release the handle.
    ///
    /// # Errors
    ///
    /// Returns the error reported while releasing the listing.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// The filesystem calls the library is built on.
///
/// Implementations are used from a single thread; nothing in the library
/// issues two calls concurrently.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Probe the metadata of a path without following a final symlink.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the path cannot be probed.
    fn stat(&self, path: &Path) -> io::Result<RawMetadata>;

    /// Open a directory for listing.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the directory cannot be opened.
    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirHandle>>;

    /// Detach the filesystem mounted at `path`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the unmount fails.
    fn unmount(&self, path: &Path) -> io::Result<()>;

    /// Remove a non-directory entry.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the entry cannot be removed.
    fn unlink(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the directory cannot be removed.
    fn rmdir(&self, path: &Path) -> io::Result<()>;

    /// Read the process's current directory.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the current directory cannot be determined.
    fn current_dir(&self) -> io::Result<String>;

    /// Change the process's current directory.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the directory cannot be entered.
    fn set_current_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a unique directory from a template ending in `XXXXXX`.
    ///
    /// Returns the name of the created directory.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the directory cannot be created.
    fn mkdtemp(&self, template: &Path) -> io::Result<String>;

    /// Check that a path can be reached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the path is absent and the OS error for any
    /// other failure.
    fn access(&self, path: &Path) -> io::Result<()>;
}

/// The host filesystem.
///
/// # Examples
///
/// ```
/// use scratchfs::fs::{FileSystem, SystemFileSystem};
/// use scratchfs::Path;
///
/// let fs = SystemFileSystem;
/// let meta = fs.stat(&Path::root()).unwrap();
/// assert_eq!(meta.mode & 0o170_000, 0o040_000);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileSystem;

/// Directory listing backed by `opendir(3)`.
///
/// `.` and `..` are produced first, whatever order `readdir(3)` reports
/// them in.
struct SystemDirHandle {
    dir: *mut libc::DIR,
    pseudo: Vec<&'static str>,
}

impl SystemDirHandle {
    #[allow(unsafe_code)]
    fn open(path: &Path) -> io::Result<Self> {
        let name = c_path(path)?;
        // SAFETY: `name` is a valid NUL-terminated string that outlives the call.
        let dir = unsafe { libc::opendir(name.as_ptr()) };
        if dir.is_null() {
            return Err(io::Error::last_os_error());
        }
        Ok(Self {
            dir,
            pseudo: vec!["..", "."],
        })
    }

    #[allow(unsafe_code)]
    fn read(&mut self) -> Option<io::Result<String>> {
        if self.dir.is_null() {
            return None;
        }
        loop {
            // readdir signals both the end of the stream and a failure with
            // NULL; only errno tells them apart.
            // SAFETY: the errno location is thread-local and always writable.
            unsafe { *errno_location() = 0 };
            // SAFETY: `dir` came from opendir and has not been closed.
            let entry = unsafe { libc::readdir(self.dir) };
            if entry.is_null() {
                let err = io::Error::last_os_error();
                return match err.raw_os_error() {
                    Some(0) | None => None,
                    Some(_) => Some(Err(err)),
                };
            }

            // SAFETY: a non-null entry stays valid until the next readdir on
            // this stream and its name is NUL-terminated.
            let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) };
            if matches!(name.to_bytes(), b"." | b"..") {
                continue;
            }
            return Some(name.to_str().map(str::to_string).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("entry name is not valid UTF-8: {name:?}"),
                )
            }));
        }
    }

    #[allow(unsafe_code)]
    fn release(&mut self) -> io::Result<()> {
        let dir = std::mem::replace(&mut self.dir, std::ptr::null_mut());
        if dir.is_null() {
            return Ok(());
        }
        // SAFETY: `dir` came from opendir and is closed exactly once; the
        // stream is freed even when closedir reports a failure.
        if unsafe { libc::closedir(dir) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl DirHandle for SystemDirHandle {
    fn next_entry(&mut self) -> Option<io::Result<String>> {
        if let Some(name) = self.pseudo.pop() {
            return Some(Ok(name.to_string()));
        }
        self.read()
    }

    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.release()
    }
}

impl Drop for SystemDirHandle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::debug!("closedir failed while dropping a listing: {}", e);
        }
    }
}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_str()).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

#[cfg(unix)]
impl FileSystem for SystemFileSystem {
    fn stat(&self, path: &Path) -> io::Result<RawMetadata> {
        let meta = fs::symlink_metadata(path)?;
        Ok(RawMetadata {
            device: meta.dev(),
            inode: meta.ino(),
            mode: meta.mode(),
        })
    }

    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirHandle>> {
        Ok(Box::new(SystemDirHandle::open(path)?))
    }

    #[allow(unsafe_code)]
    fn unmount(&self, path: &Path) -> io::Result<()> {
        let target = c_path(path)?;

        // SAFETY: `target` is a valid NUL-terminated string that outlives the call.
        #[cfg(any(target_os = "linux", target_os = "android"))]
        let rc = unsafe { libc::umount(target.as_ptr()) };
        // SAFETY: as above; no flags are passed.
        #[cfg(not(any(target_os = "linux", target_os = "android")))]
        let rc = unsafe { libc::unmount(target.as_ptr(), 0) };

        if rc == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rmdir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn current_dir(&self) -> io::Result<String> {
        env::current_dir()?.into_os_string().into_string().map_err(|dir| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("current directory is not valid UTF-8: {dir:?}"),
            )
        })
    }

    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }

    #[allow(unsafe_code)]
    fn mkdtemp(&self, template: &Path) -> io::Result<String> {
        let mut buf = c_path(template)?.into_bytes_with_nul();

        // SAFETY: `buf` is a writable NUL-terminated buffer; mkdtemp only
        // rewrites the trailing placeholder characters in place.
        let created = unsafe { libc::mkdtemp(buf.as_mut_ptr().cast::<libc::c_char>()) };
        if created.is_null() {
            return Err(io::Error::last_os_error());
        }

        buf.pop();
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn access(&self, path: &Path) -> io::Result<()> {
        fs::metadata(path).map(|_| ())
    }
}
