//! The normalized path value type.

use std::fmt;
use std::ops::Div;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::normalize::{normalize, SEPARATOR};
use crate::error::{Error, Result};

/// An immutable, normalized POSIX-style path.
///
/// The stored string is never empty, starts with `/` iff the path is
/// absolute, contains no empty segments, and carries no trailing `/` unless
/// the path is exactly `/`. Equality is string equality of the normalized
/// forms.
///
/// # Examples
///
/// ```
/// use scratchfs::Path;
///
/// let path = Path::new("/a//b/").unwrap();
/// assert_eq!(path.as_str(), "/a/b");
/// assert!(path.is_absolute());
/// assert_eq!(path.leaf_name(), "b");
/// assert_eq!(path.branch_path(), Path::new("/a").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    data: String,
}

impl Path {
    /// Create a path from a string, normalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `s` is empty.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            data: normalize(s.as_ref())?,
        })
    }

    /// The filesystem root, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self {
            data: SEPARATOR.to_string(),
        }
    }

    /// Create a path from a standard library path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is empty or not valid UTF-8.
    pub fn from_std_path(path: &std::path::Path) -> Result<Self> {
        let s = path.to_str().ok_or_else(|| Error::InvalidPath {
            reason: format!("path contains invalid UTF-8: {}", path.display()),
        })?;
        Self::new(s)
    }

    /// The normalized string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Whether the path starts at the root.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.data.starts_with(SEPARATOR)
    }

    /// Whether the path is exactly `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.data.len() == 1 && self.is_absolute()
    }

    /// The parent portion of the path, with `dirname(3)` semantics.
    ///
    /// A path without any separator yields `.`; a path whose only separator
    /// is the leading one yields `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scratchfs::Path;
    ///
    /// assert_eq!(Path::new("a/b").unwrap().branch_path().as_str(), "a");
    /// assert_eq!(Path::new("a").unwrap().branch_path().as_str(), ".");
    /// assert_eq!(Path::new("/a").unwrap().branch_path().as_str(), "/");
    /// ```
    #[must_use]
    pub fn branch_path(&self) -> Self {
        let data = match self.data.rfind(SEPARATOR) {
            None => ".".to_string(),
            Some(0) => SEPARATOR.to_string(),
            Some(end) => self.data[..end].to_string(),
        };
        Self { data }
    }

    /// The final segment of the path, with `basename(3)` semantics.
    ///
    /// The whole string is returned when there is no separator. The root
    /// has an empty leaf name.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        match self.data.rfind(SEPARATOR) {
            None => &self.data,
            Some(pos) => &self.data[pos + 1..],
        }
    }

    /// Append a component, inserting exactly one separator.
    ///
    /// The component is normalized before it is appended, so `"b//c/"`
    /// appends `b/c`. An absolute component is appended, not substituted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `component` is empty.
    pub fn join(&self, component: &str) -> Result<Self> {
        let component = normalize(component)?;
        Self::new(format!("{}{SEPARATOR}{component}", self.data))
    }

    fn join_path(&self, other: &Self) -> Self {
        // Both sides are non-empty, so the concatenation is too.
        Self {
            data: normalize_nonempty(&format!("{}{SEPARATOR}{}", self.data, other.data)),
        }
    }
}

fn normalize_nonempty(s: &str) -> String {
    normalize(s).unwrap_or_else(|_| s.to_string())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.data
    }
}

impl AsRef<std::path::Path> for Path {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.data)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data)
    }
}

impl Div<&Path> for &Path {
    type Output = Path;

    fn div(self, rhs: &Path) -> Path {
        self.join_path(rhs)
    }
}

impl Div<&str> for &Path {
    type Output = Result<Path>;

    fn div(self, rhs: &str) -> Result<Path> {
        self.join(rhs)
    }
}
