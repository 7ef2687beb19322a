//! Property-based tests for the path value type.
//!
//! The normalize module already has light property tests for the string
//! normalization. This suite runs the value-level properties with a much
//! larger case count.

use super::Path;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,12}"
}

// Paths with at least one separator beyond the leading one
fn nested_path_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment_strategy(), 2..8)).prop_map(
        |(absolute, parts)| {
            let joined = parts.join("/");
            if absolute {
                format!("/{joined}")
            } else {
                joined
            }
        },
    )
}

// Arbitrary non-empty strings over a small alphabet heavy in separators
fn raw_string_strategy() -> impl Strategy<Value = String> {
    "[a/b/.]{1,24}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // No "//" and no trailing "/" except for the root
    #[test]
    fn normalized_form_invariants(s in raw_string_strategy()) {
        let path = Path::new(&s).unwrap();
        let text = path.to_string();
        prop_assert!(!text.contains("//"));
        prop_assert!(text == "/" || !text.ends_with('/'));
        prop_assert!(!text.is_empty());
    }

    // Construction is idempotent
    #[test]
    fn construction_idempotent(s in raw_string_strategy()) {
        let once = Path::new(&s).unwrap();
        let twice = Path::new(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    // branch_path / leaf_name rebuilds the original path
    #[test]
    fn branch_and_leaf_recompose(s in nested_path_strategy()) {
        let path = Path::new(&s).unwrap();
        let rebuilt = (&path.branch_path() / path.leaf_name()).unwrap();
        prop_assert_eq!(rebuilt, path);
    }

    // Joining inserts exactly one separator
    #[test]
    fn join_inserts_single_separator(base in nested_path_strategy(), leaf in segment_strategy()) {
        let base = Path::new(&base).unwrap();
        let joined = base.join(&leaf).unwrap();
        prop_assert_eq!(joined.as_str(), format!("{}/{}", base.as_str(), leaf));
        prop_assert_eq!(joined.leaf_name(), leaf.as_str());
        prop_assert_eq!(joined.branch_path(), base);
    }

    // Absoluteness follows the leading separator of the input
    #[test]
    fn absolute_iff_leading_separator(s in raw_string_strategy()) {
        let path = Path::new(&s).unwrap();
        prop_assert_eq!(path.is_absolute(), s.starts_with('/'));
    }
}
