//! File metadata snapshots.

use std::fmt;

use serde::Serialize;

use super::system::FileSystem;
use crate::error::{Error, Result};
use crate::path::Path;

/// Mode word bits, as laid out by `stat(2)`.
pub(crate) mod mode {
    pub const S_IFMT: u32 = 0o170_000;
    pub const S_IFIFO: u32 = 0o010_000;
    pub const S_IFCHR: u32 = 0o020_000;
    pub const S_IFDIR: u32 = 0o040_000;
    pub const S_IFBLK: u32 = 0o060_000;
    pub const S_IFREG: u32 = 0o100_000;
    pub const S_IFLNK: u32 = 0o120_000;
    pub const S_IFSOCK: u32 = 0o140_000;
    pub const S_IFWHT: u32 = 0o160_000;

    pub const PERMISSIONS: u32 = 0o7777;
}

/// The kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Block special device.
    BlockDevice,
    /// Character special device.
    CharDevice,
    /// Directory.
    Directory,
    /// Named pipe.
    Fifo,
    /// Symbolic link.
    Symlink,
    /// Regular file.
    Regular,
    /// Local socket.
    Socket,
    /// Whiteout entry left by a union mount.
    Whiteout,
}

impl FileType {
    /// Decode the type bits of a mode word.
    ///
    /// Returns `None` for a type outside the known set.
    ///
    /// # Examples
    ///
    /// ```
    /// use scratchfs::FileType;
    ///
    /// assert_eq!(FileType::from_mode(0o040_755), Some(FileType::Directory));
    /// assert_eq!(FileType::from_mode(0o100_644), Some(FileType::Regular));
    /// assert_eq!(FileType::from_mode(0o000_644), None);
    /// ```
    #[must_use]
    pub fn from_mode(bits: u32) -> Option<Self> {
        match bits & mode::S_IFMT {
            mode::S_IFBLK => Some(Self::BlockDevice),
            mode::S_IFCHR => Some(Self::CharDevice),
            mode::S_IFDIR => Some(Self::Directory),
            mode::S_IFIFO => Some(Self::Fifo),
            mode::S_IFLNK => Some(Self::Symlink),
            mode::S_IFREG => Some(Self::Regular),
            mode::S_IFSOCK => Some(Self::Socket),
            mode::S_IFWHT => Some(Self::Whiteout),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BlockDevice => "block",
            Self::CharDevice => "char",
            Self::Directory => "dir",
            Self::Fifo => "fifo",
            Self::Symlink => "link",
            Self::Regular => "file",
            Self::Socket => "socket",
            Self::Whiteout => "whiteout",
        };
        f.write_str(name)
    }
}

/// A metadata snapshot of one path, taken when the value is built.
///
/// The snapshot is never refreshed; probe again to observe later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    path: Path,
    device: u64,
    inode: u64,
    file_type: FileType,
    mode: u32,
}

impl FileInfo {
    /// Probe `path` through `fs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] with call `stat` if the probe fails and
    /// [`Error::UnknownFileType`] if the reported type is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use scratchfs::fs::MemoryFileSystem;
    /// use scratchfs::{FileInfo, FileType, Path};
    ///
    /// let fs = MemoryFileSystem::new();
    /// fs.create_file("/notes").unwrap();
    ///
    /// let info = FileInfo::probe(&fs, &Path::new("/notes").unwrap()).unwrap();
    /// assert_eq!(info.file_type(), FileType::Regular);
    /// assert_eq!(info.mode(), 0o644);
    /// assert!(info.is_owner_readable());
    /// assert!(!info.is_other_writable());
    /// ```
    pub fn probe<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Self> {
        let raw = fs
            .stat(path)
            .map_err(|e| Error::system("stat", path, e))?;
        let file_type = FileType::from_mode(raw.mode).ok_or_else(|| Error::UnknownFileType {
            path: path.clone(),
            mode: raw.mode,
        })?;

        Ok(Self {
            path: path.clone(),
            device: raw.device,
            inode: raw.inode,
            file_type,
            mode: raw.mode & mode::PERMISSIONS,
        })
    }

    /// The path that was probed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier of the filesystem holding the entry.
    #[must_use]
    pub fn device(&self) -> u64 {
        self.device
    }

    /// Inode number of the entry.
    #[must_use]
    pub fn inode(&self) -> u64 {
        self.inode
    }

    /// Whether both snapshots name the same filesystem object, however the
    /// paths were spelled.
    #[must_use]
    pub fn is_same_file(&self, other: &Self) -> bool {
        self.device == other.device && self.inode == other.inode
    }

    /// The entry's type.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Permission bits, type bits stripped.
    #[must_use]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Whether the entry is a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Owner read bit.
    #[must_use]
    pub fn is_owner_readable(&self) -> bool {
        self.mode & 0o400 != 0
    }

    /// Owner write bit.
    #[must_use]
    pub fn is_owner_writable(&self) -> bool {
        self.mode & 0o200 != 0
    }

    /// Owner execute bit.
    #[must_use]
    pub fn is_owner_executable(&self) -> bool {
        self.mode & 0o100 != 0
    }

    /// Group read bit.
    #[must_use]
    pub fn is_group_readable(&self) -> bool {
        self.mode & 0o040 != 0
    }

    /// Group write bit.
    #[must_use]
    pub fn is_group_writable(&self) -> bool {
        self.mode & 0o020 != 0
    }

    /// Group execute bit.
    #[must_use]
    pub fn is_group_executable(&self) -> bool {
        self.mode & 0o010 != 0
    }

    /// Other read bit.
    #[must_use]
    pub fn is_other_readable(&self) -> bool {
        self.mode & 0o004 != 0
    }

    /// Other write bit.
    #[must_use]
    pub fn is_other_writable(&self) -> bool {
        self.mode & 0o002 != 0
    }

    /// Other execute bit.
    #[must_use]
    pub fn is_other_executable(&self) -> bool {
        self.mode & 0o001 != 0
    }
}
