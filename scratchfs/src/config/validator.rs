//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::normalize::SEPARATOR;

/// Placeholder run that directory creation replaces with a unique string.
pub const PLACEHOLDER: &str = "XXXXXX";

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use scratchfs::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let bad = Config { template: Some("run".to_string()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration. Unset fields are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref dir) = config.work_directory {
            Self::validate_work_directory(dir)?;
        }

        if let Some(ref template) = config.template {
            Self::validate_template(template)?;
        }

        Ok(())
    }

    /// The work directory must be absolute, or start with `~/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty or relative directory.
    pub fn validate_work_directory(dir: &str) -> Result<()> {
        if dir.is_empty() {
            return Err(Error::Validation {
                field: "work_directory".into(),
                message: "Work directory cannot be empty".into(),
            });
        }

        if !(dir.starts_with(SEPARATOR) || dir == "~" || dir.starts_with("~/")) {
            return Err(Error::Validation {
                field: "work_directory".into(),
                message: format!("Work directory must be absolute: {dir}"),
            });
        }

        Ok(())
    }

    /// The template must be a single name ending in the placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty template, one containing a
    /// separator, or one without the trailing placeholder.
    pub fn validate_template(template: &str) -> Result<()> {
        if template.is_empty() {
            return Err(Error::Validation {
                field: "template".into(),
                message: "Template cannot be empty".into(),
            });
        }

        if template.contains(SEPARATOR) {
            return Err(Error::Validation {
                field: "template".into(),
                message: format!("Template must be a single name, got: {template}"),
            });
        }

        if !template.ends_with(PLACEHOLDER) {
            return Err(Error::Validation {
                field: "template".into(),
                message: format!("Template must end with {PLACEHOLDER}, got: {template}"),
            });
        }

        Ok(())
    }
}
