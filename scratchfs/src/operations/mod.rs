//! Tree operations: mount discovery, cleanup and scratch sandboxes.
//!
//! Cleanup follows a plan-execute pattern so that a caller can inspect what
//! would happen (the mount points to detach) before anything is modified.
//!
//! # Examples
//!
//! ```
//! use scratchfs::fs::MemoryFileSystem;
//! use scratchfs::operations::TreeCleaner;
//! use scratchfs::Path;
//!
//! let fs = MemoryFileSystem::new();
//! fs.create_dir("/build").unwrap();
//! fs.create_dir("/build/proc").unwrap();
//! fs.mount("/build/proc", 4).unwrap();
//!
//! let cleaner = TreeCleaner::new(&fs);
//! let plan = cleaner.plan(&Path::new("/build").unwrap()).unwrap();
//! assert_eq!(plan.mount_points.len(), 1);
//!
//! let result = cleaner.execute(&plan).unwrap();
//! assert_eq!(result.unmounted, plan.mount_points);
//! ```

pub mod cleanup;
pub mod mounts;
pub mod sandbox;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use cleanup::{cleanup, CleanupPlan, CleanupResult, TreeCleaner};
pub use mounts::MountScanner;
pub use sandbox::Sandbox;
