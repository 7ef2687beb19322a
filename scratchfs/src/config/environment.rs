//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `SCRATCHFS_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_ENV};
use std::env;

/// Overrides the work directory.
pub const WORKDIR_ENV: &str = "SCRATCHFS_WORKDIR";

/// Overrides the scratch directory template.
pub const TEMPLATE_ENV: &str = "SCRATCHFS_TEMPLATE";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use scratchfs::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads `SCRATCHFS_WORKDIR`, `SCRATCHFS_TEMPLATE` and
    /// `SCRATCHFS_LOG_MODE`. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCRATCHFS_LOG_MODE` is not a known level.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(dir) = Self::var(WORKDIR_ENV) {
            config.work_directory = Some(dir);
        }

        if let Some(template) = Self::var(TEMPLATE_ENV) {
            config.template = Some(template);
        }

        if let Some(mode) = Self::var(LOG_MODE_ENV) {
            let level = LogLevel::parse(&mode).map_err(|message| Error::Validation {
                field: LOG_MODE_ENV.into(),
                message,
            })?;
            config.log_mode = Some(level);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.is_empty())
    }
}
