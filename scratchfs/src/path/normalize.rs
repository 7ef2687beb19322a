//! Path string normalization.
//!
//! Normalization is purely textual: it never touches the filesystem, never
//! resolves `.` or `..`, and never follows symbolic links. It only collapses
//! runs of separators and drops a trailing separator.

use crate::error::{Error, Result};

/// The path separator.
pub const SEPARATOR: char = '/';

/// Normalize a path string.
///
/// The string is split on `/`, empty segments are discarded, and the
/// remaining segments are joined again with a single `/`. A leading `/` is
/// preserved, so an absolute input stays absolute and any run of slashes
/// collapses to the root `/`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `s` is empty.
///
/// # Examples
///
/// ```
/// use scratchfs::path::normalize::normalize;
///
/// assert_eq!(normalize("/a//b/").unwrap(), "/a/b");
/// assert_eq!(normalize("a/./b").unwrap(), "a/./b");
/// assert_eq!(normalize("///").unwrap(), "/");
/// assert!(normalize("").is_err());
/// ```
pub fn normalize(s: &str) -> Result<String> {
    if s.is_empty() {
        return Err(Error::InvalidPath {
            reason: "path cannot be empty".to_string(),
        });
    }

    let mut data = String::with_capacity(s.len());
    if s.starts_with(SEPARATOR) {
        data.push(SEPARATOR);
    }

    let mut first = true;
    for segment in s.split(SEPARATOR).filter(|segment| !segment.is_empty()) {
        if !first {
            data.push(SEPARATOR);
        }
        data.push_str(segment);
        first = false;
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty_fails() {
        let err = normalize("").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("/a//b/").unwrap(), "/a/b");
        assert_eq!(normalize("a///b").unwrap(), "a/b");
        assert_eq!(normalize("//a").unwrap(), "/a");
    }

    #[test]
    fn test_normalize_root_only() {
        assert_eq!(normalize("/").unwrap(), "/");
        assert_eq!(normalize("////").unwrap(), "/");
    }

    #[test]
    fn test_normalize_relative_trailing_separator() {
        assert_eq!(normalize("a/").unwrap(), "a");
        assert_eq!(normalize("a//").unwrap(), "a");
    }

    #[test]
    fn test_normalize_keeps_dot_segments() {
        assert_eq!(normalize("/a/./b/../c").unwrap(), "/a/./b/../c");
        assert_eq!(normalize(".").unwrap(), ".");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // Segments mixed with runs of separators
        fn messy_path_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    "[a-zA-Z0-9_.-]{1,8}".prop_map(|s| s),
                    "/{1,3}".prop_map(|s| s),
                ],
                1..=10,
            )
            .prop_map(|parts| parts.concat())
        }

        proptest! {
            /// Normalized strings never contain an empty segment
            #[test]
            fn normalize_no_double_separator(s in messy_path_strategy()) {
                let normalized = normalize(&s).unwrap();
                prop_assert!(!normalized.contains("//"));
            }

            /// Only the root keeps a trailing separator
            #[test]
            fn normalize_no_trailing_separator(s in messy_path_strategy()) {
                let normalized = normalize(&s).unwrap();
                prop_assert!(normalized == "/" || !normalized.ends_with('/'));
            }

            /// Absoluteness is preserved
            #[test]
            fn normalize_preserves_leading_separator(s in messy_path_strategy()) {
                let normalized = normalize(&s).unwrap();
                prop_assert_eq!(normalized.starts_with('/'), s.starts_with('/'));
            }

            /// Normalization is idempotent
            #[test]
            fn normalize_idempotent(s in messy_path_strategy()) {
                let once = normalize(&s).unwrap();
                let twice = normalize(&once).unwrap();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
