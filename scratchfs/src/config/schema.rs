//! Configuration schema definitions.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::path::Path;

/// Template used for scratch directory names when none is configured.
pub const DEFAULT_TEMPLATE: &str = "scratchfs.XXXXXX";

/// Work directory used when neither configuration nor `$TMPDIR` names one.
pub const DEFAULT_WORK_DIRECTORY: &str = "/tmp";

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields
/// fall back to the built-in defaults when read through the accessors.
///
/// # Examples
///
/// ```
/// use scratchfs::config::Config;
///
/// let config = Config {
///     work_directory: Some("/var/tmp".to_string()),
///     template: Some("run.XXXXXX".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.scratch_template().unwrap().as_str(), "/var/tmp/run.XXXXXX");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory scratch directories are created in.
    pub work_directory: Option<String>,

    /// Name template for scratch directories; must end in `XXXXXX`.
    pub template: Option<String>,

    /// Default log verbosity.
    pub log_mode: Option<LogLevel>,
}

impl Config {
    /// The built-in defaults: `$TMPDIR` (or `/tmp`) and `scratchfs.XXXXXX`.
    #[must_use]
    pub fn defaults() -> Self {
        let work_directory = env::var("TMPDIR")
            .ok()
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| DEFAULT_WORK_DIRECTORY.to_string());

        Self {
            work_directory: Some(work_directory),
            template: Some(DEFAULT_TEMPLATE.to_string()),
            log_mode: None,
        }
    }

    /// The work directory, with a leading `~` expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or `~` cannot be expanded.
    pub fn work_directory(&self) -> Result<Path> {
        let raw = self
            .work_directory
            .as_deref()
            .unwrap_or(DEFAULT_WORK_DIRECTORY);
        Path::new(expand_home(raw)?)
    }

    /// The scratch directory name template.
    #[must_use]
    pub fn template(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    /// The full template passed to directory creation:
    /// `work_directory / template`.
    ///
    /// # Errors
    ///
    /// Returns an error if either part is empty.
    pub fn scratch_template(&self) -> Result<Path> {
        self.work_directory()?.join(self.template())
    }
}

fn expand_home(raw: &str) -> Result<String> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return Ok(raw.to_string()),
    };

    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "work_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    let home = home.to_str().ok_or_else(|| Error::InvalidPath {
        reason: format!("home directory is not valid UTF-8: {}", home.display()),
    })?;
    Ok(format!("{home}{rest}"))
}
