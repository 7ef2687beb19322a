//! Configuration file discovery and loading.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Precedence of the user configuration file.
pub const USER_PRECEDENCE: u8 = 1;

/// Precedence of a configuration file named explicitly by the caller.
pub const EXPLICIT_PRECEDENCE: u8 = 2;

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use scratchfs::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.scratchfs/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load every configuration file that applies.
    ///
    /// Looks for:
    /// 1. User config at `~/.scratchfs/config.yaml` (precedence 1), if present
    /// 2. The `explicit` file (precedence 2), which must exist
    ///
    /// Sources are returned lowest precedence first.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, or if any file that
    /// exists cannot be read or parsed.
    pub fn load_all(explicit: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                let config = Self::load_file(&user)?;
                sources.push(ConfigSource {
                    path: user,
                    precedence: USER_PRECEDENCE,
                    config,
                });
            }
        }

        if let Some(path) = explicit {
            let config = Self::load_file(path)?;
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                precedence: EXPLICIT_PRECEDENCE,
                config,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Failed to read configuration file: {e}"),
        })?;

        let config = serde_yaml::from_str(&contents)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Location of the user configuration file, if a home directory is known.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(".scratchfs").join("config.yaml"))
    }
}
