//! Output formatting for metadata, listings and cleanup reports.
//!
//! Two formats are provided: human-readable text and pretty-printed JSON.

mod formatters;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::fs::{Directory, FileInfo};
use crate::operations::{CleanupPlan, CleanupResult};
use crate::path::Path;

pub use formatters::{permission_string, JsonFormatter, TextFormatter};

/// Trait for rendering library values for display.
pub trait OutputFormatter {
    /// Render a metadata snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_file_info(&self, info: &FileInfo) -> Result<String>;

    /// Render a directory listing, with `.` and `..` only if `include_pseudo`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_directory(&self, dir: &Directory, include_pseudo: bool) -> Result<String>;

    /// Render discovered mount points in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_mount_points(&self, mounts: &[Path]) -> Result<String>;

    /// Render the outcome of a cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_cleanup_result(&self, result: &CleanupResult) -> Result<String>;

    /// Render a cleanup plan, for dry runs.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_cleanup_plan(&self, plan: &CleanupPlan) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(Error::Validation {
                field: "format".into(),
                message: format!("unknown output format '{s}' (expected text or json)"),
            }),
        }
    }
}
