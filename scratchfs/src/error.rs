//! Error types for the scratchfs library.
//!
//! Every failure is surfaced to the caller as soon as it happens. Nothing is
//! retried internally and nothing is downgraded to a fallback value, with the
//! single exception of [`exists`](crate::fs::exists), which reports a missing
//! path as `Ok(false)`.

use std::io;

use thiserror::Error;

use crate::path::Path;

/// Result type alias for operations that may fail with a scratchfs error.
///
/// # Examples
///
/// ```
/// use scratchfs::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the scratchfs library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path could not be constructed.
    #[error("invalid path: {reason}")]
    InvalidPath {
        /// The reason the path is invalid.
        reason: String,
    },

    /// An underlying operating system call failed.
    #[error("{call}({path}) failed: {source}")]
    System {
        /// Name of the failing call (`stat`, `opendir`, `unmount`, ...).
        call: &'static str,
        /// The path the call was issued against.
        path: Path,
        /// The error reported by the operating system.
        #[source]
        source: io::Error,
    },

    /// The metadata probe reported a file type outside the known set.
    #[error("stat({path}) returned an unknown file type (mode {mode:#o})")]
    UnknownFileType {
        /// The probed path.
        path: Path,
        /// The raw mode word reported by the probe.
        mode: u32,
    },

    /// A recursive delete reached an entry living on another device.
    #[error("cannot cross mount point {path} while removing {root}")]
    CrossDeviceBoundary {
        /// The entry whose device differs from the tree root.
        path: Path,
        /// The root of the tree being removed.
        root: Path,
    },

    /// Removal of the filesystem root was requested.
    #[error("refusing to delete the root directory")]
    RefusedRootDeletion,

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// Output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred outside of the filesystem interface.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Wraps an error returned by the filesystem interface.
    pub(crate) fn system(call: &'static str, path: &Path, source: io::Error) -> Self {
        Self::System {
            call,
            path: path.clone(),
            source,
        }
    }

    /// Returns the name of the failed OS call, if this is a system error.
    ///
    /// # Examples
    ///
    /// ```
    /// use scratchfs::{Error, Path};
    ///
    /// let err = Error::System {
    ///     call: "unmount",
    ///     path: Path::new("/tmp/work/mnt").unwrap(),
    ///     source: std::io::Error::from_raw_os_error(16),
    /// };
    /// assert_eq!(err.call(), Some("unmount"));
    /// assert_eq!(err.errno(), Some(16));
    /// ```
    #[must_use]
    pub fn call(&self) -> Option<&'static str> {
        match self {
            Self::System { call, .. } => Some(call),
            _ => None,
        }
    }

    /// Returns the platform error code carried by a system error.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::System { source, .. } => source.raw_os_error(),
            Self::Io(source) => source.raw_os_error(),
            _ => None,
        }
    }

    /// Check if error indicates a path does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::System { source, .. } | Self::Io(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::System { source, .. } | Self::Io(source) => {
                source.kind() == io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }
}
