//! Configuration system for scratchfs.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files (user config and an explicit file)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every configured value
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SCRATCHFS_*`)
//! 3. Explicit config file (via `ConfigBuilder::with_config_file`)
//! 4. User config (`~/.scratchfs/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use scratchfs::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_config_file("/etc/scratchfs.yaml")
//!     .build()
//!     .unwrap();
//!
//! println!("Scratch directories: {}", config.scratch_template().unwrap());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, DEFAULT_TEMPLATE, DEFAULT_WORK_DIRECTORY};
pub use validator::ConfigValidator;
