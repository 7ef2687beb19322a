//! Filesystem access.
//!
//! This module provides:
//! - The [`FileSystem`] trait every operation is written against, with
//!   [`SystemFileSystem`] for the host and [`MemoryFileSystem`] for tests
//! - [`FileInfo`] metadata snapshots and [`Directory`] listings
//! - Working-directory, scratch-directory and existence helpers
//!
//! # Example
//!
//! ```
//! use scratchfs::fs::{exists, MemoryFileSystem};
//! use scratchfs::{FileInfo, Path};
//!
//! let fs = MemoryFileSystem::new();
//! fs.create_dir("/data").unwrap();
//!
//! let path = Path::new("/data").unwrap();
//! assert!(exists(&fs, &path).unwrap());
//! assert!(FileInfo::probe(&fs, &path).unwrap().is_directory());
//! ```

mod directory;
mod file_info;
pub mod memory;
mod ops;
pub mod system;

pub use directory::{is_pseudo, Directory};
pub use file_info::{FileInfo, FileType};
pub use memory::MemoryFileSystem;
pub use ops::{change_directory, create_temp_directory, exists, get_current_directory};
pub use system::{DirHandle, FileSystem, RawMetadata, SystemFileSystem};
