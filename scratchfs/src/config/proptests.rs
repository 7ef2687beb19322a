//! Property-based tests for configuration validation and merging.

use super::*;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        proptest::option::of("/[a-z]{1,8}(/[a-z]{1,8}){0,3}"),
        proptest::option::of("[a-z._-]{0,8}X{6,10}"),
    )
        .prop_map(|(work_directory, template)| Config {
            work_directory,
            template,
            log_mode: None,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    /// Well-formed templates are accepted
    #[test]
    fn template_with_placeholder_is_valid(template in "[a-zA-Z0-9._-]{0,12}X{6,10}") {
        prop_assert!(ConfigValidator::validate_template(&template).is_ok());
    }

    /// A separator anywhere in the template is rejected
    #[test]
    fn template_with_separator_is_invalid(
        prefix in "[a-z]{0,6}",
        suffix in "[a-z]{0,6}",
    ) {
        let template = format!("{prefix}/{suffix}XXXXXX");
        prop_assert!(ConfigValidator::validate_template(&template).is_err());
    }

    /// Relative work directories are rejected
    #[test]
    fn relative_work_directory_is_invalid(dir in "[a-z][a-z/]{0,12}") {
        prop_assert!(ConfigValidator::validate_work_directory(&dir).is_err());
    }

    /// Merging a config into itself changes nothing
    #[test]
    fn merge_into_self_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    /// Set fields of the higher layer always win
    #[test]
    fn merge_prefers_higher_layer(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.work_directory,
            high.work_directory.or(low.work_directory)
        );
        prop_assert_eq!(merged.template, high.template.or(low.template));
    }

    /// Valid configs always yield an absolute scratch template
    #[test]
    fn scratch_template_is_absolute(config in config_strategy()) {
        prop_assume!(ConfigValidator::validate(&config).is_ok());
        let template = config.scratch_template().unwrap();
        prop_assert!(template.is_absolute());
        prop_assert_eq!(template.leaf_name(), config.template());
    }
}
