//! Normalized path handling.
//!
//! The [`Path`] type wraps a slash-separated POSIX-style string kept in a
//! canonical textual form:
//!
//! - it is never empty
//! - it starts with `/` iff the path is absolute
//! - it contains no empty segments (no `//`)
//! - it has no trailing `/` unless it is exactly `/`
//!
//! Normalization is textual only. `.` and `..` segments are kept as they
//! are and symbolic links are never consulted.
//!
//! # Examples
//!
//! ```
//! use scratchfs::Path;
//!
//! let work = Path::new("/tmp//scratch/").unwrap();
//! assert_eq!(work.to_string(), "/tmp/scratch");
//!
//! let run = (&work / "run.1").unwrap();
//! assert_eq!(run.as_str(), "/tmp/scratch/run.1");
//! assert_eq!(run.branch_path(), work);
//! assert_eq!(run.leaf_name(), "run.1");
//! ```

pub mod normalize;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use types::Path;
