//! Directory listings with per-entry metadata.

use std::collections::BTreeSet;

use super::file_info::FileInfo;
use super::system::FileSystem;
use crate::error::{Error, Result};
use crate::path::Path;

/// A snapshot of a directory's entries, each paired with its metadata.
///
/// The listing includes `.` and `..`. It is taken in full when the value is
/// built: a failure on any entry fails the whole listing, so a `Directory`
/// never holds a partial view.
#[derive(Debug, Clone)]
pub struct Directory {
    path: Path,
    entries: Vec<(String, FileInfo)>,
}

impl Directory {
    /// List `path` and probe every entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] with call `opendir`, `readdir`, `stat` or
    /// `closedir` for the first step that fails. The listing is released on
    /// every path.
    ///
    /// # Examples
    ///
    /// ```
    /// use scratchfs::fs::MemoryFileSystem;
    /// use scratchfs::{Directory, Path};
    ///
    /// let fs = MemoryFileSystem::new();
    /// fs.create_dir("/d").unwrap();
    /// fs.create_file("/d/a").unwrap();
    ///
    /// let dir = Directory::open(&fs, &Path::new("/d").unwrap()).unwrap();
    /// assert_eq!(dir.len(), 3);
    /// assert!(dir.contains("."));
    /// assert!(dir.contains(".."));
    /// assert!(dir.contains("a"));
    /// ```
    pub fn open<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Self> {
        let mut handle = fs
            .open_dir(path)
            .map_err(|e| Error::system("opendir", path, e))?;

        let mut entries = Vec::new();
        while let Some(name) = handle.next_entry() {
            let name = name.map_err(|e| Error::system("readdir", path, e))?;
            let entry_path = path.join(&name)?;
            let info = FileInfo::probe(fs, &entry_path)?;
            entries.push((name, info));
        }

        handle
            .close()
            .map_err(|e| Error::system("closedir", path, e))?;

        log::debug!("listed {} ({} entries)", path, entries.len());
        Ok(Self {
            path: path.clone(),
            entries,
        })
    }

    /// The directory that was listed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Metadata for the entry called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FileInfo> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, info)| info)
    }

    /// Whether an entry called `name` was listed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries, `.` and `..` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the listing holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, info)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileInfo)> {
        self.entries.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Iterate over entries other than `.` and `..`.
    pub fn children(&self) -> impl Iterator<Item = (&str, &FileInfo)> {
        self.iter().filter(|(name, _)| !is_pseudo(name))
    }

    /// The entry names, sorted.
    #[must_use]
    pub fn names(&self) -> BTreeSet<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Whether `name` is one of the self/parent entries.
#[must_use]
pub fn is_pseudo(name: &str) -> bool {
    name == "." || name == ".."
}

impl<'a> IntoIterator for &'a Directory {
    type Item = (&'a str, &'a FileInfo);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a FileInfo)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
