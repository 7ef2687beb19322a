#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # scratchfs
//!
//! A library for creating, inspecting and safely removing scratch directory
//! trees, including trees that have other filesystems mounted inside them.
//!
//! ## Core Types
//!
//! - [`Path`]: Normalized POSIX-style paths
//! - [`FileInfo`] and [`Directory`]: Metadata snapshots and listings
//! - [`MountScanner`] and [`TreeCleaner`]: Mount discovery and tree removal
//! - [`Sandbox`]: A scratch directory's lifecycle
//! - [`FileSystem`]: The OS interface, with [`SystemFileSystem`] for the host
//!   and [`MemoryFileSystem`] for tests
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use scratchfs::fs::MemoryFileSystem;
//! use scratchfs::{cleanup, exists, Path};
//!
//! let fs = MemoryFileSystem::new();
//! fs.create_dir("/scratch").unwrap();
//! fs.create_dir("/scratch/proc").unwrap();
//! fs.mount("/scratch/proc", 3).unwrap();
//!
//! let root = Path::new("/scratch//").unwrap();
//! let result = cleanup(&fs, &root).unwrap();
//!
//! assert_eq!(result.unmounted, vec![Path::new("/scratch/proc").unwrap()]);
//! assert!(!exists(&fs, &root).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod operations;
pub mod output;
pub mod path;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use fs::{
    change_directory, create_temp_directory, exists, get_current_directory, Directory, FileInfo,
    FileSystem, FileType, MemoryFileSystem, SystemFileSystem,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{cleanup, CleanupPlan, CleanupResult, MountScanner, Sandbox, TreeCleaner};
pub use output::{OutputFormat, OutputFormatter};
pub use path::Path;
