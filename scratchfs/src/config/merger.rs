//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use scratchfs::config::{Config, ConfigMerger};
///
/// let low = Config { template: Some("low.XXXXXX".to_string()), ..Default::default() };
/// let high = Config { template: Some("high.XXXXXX".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.template, Some("high.XXXXXX".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Every field is replaced when it is set in `source`.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.work_directory.is_some() {
            target.work_directory.clone_from(&source.work_directory);
        }

        if source.template.is_some() {
            target.template.clone_from(&source.template);
        }

        if source.log_mode.is_some() {
            target.log_mode = source.log_mode;
        }
    }
}
