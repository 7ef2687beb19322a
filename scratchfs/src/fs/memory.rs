//! In-memory filesystem for exercising tree operations without privileges.
//!
//! [`MemoryFileSystem`] models just enough of a POSIX filesystem to drive
//! the scanner and the cleaner: nodes with a device id, an inode number, a
//! type and permission bits; mounts that hide a directory's contents behind
//! a fresh filesystem until unmounted; a current-directory cell; a log of
//! every call made through the [`FileSystem`] trait; and per-call failure
//! injection.
//!
//! Paths are resolved textually against the current directory. `.` and
//! `..` are honoured, symbolic links are stored but never followed.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::rc::Rc;

use super::file_info::mode;
use super::system::{DirHandle, FileSystem, RawMetadata};
use crate::path::Path;

/// Device id of the filesystem the root lives on.
pub const ROOT_DEVICE: u64 = 1;

/// One call made through the [`FileSystem`] trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The call name (`stat`, `opendir`, `closedir`, `unmount`, ...).
    pub name: &'static str,
    /// The absolute path the call resolved to.
    pub path: String,
}

impl Call {
    /// Whether the call modifies the tree.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(self.name, "unmount" | "unlink" | "rmdir")
    }
}

/// Inode number of the root directory.
pub const ROOT_INODE: u64 = 2;

#[derive(Debug, Clone)]
struct Node {
    mode: u32,
    device: u64,
    inode: u64,
    covered: Option<Covered>,
}

/// The directory hidden by a mount, with everything that was below it.
#[derive(Debug, Clone)]
struct Covered {
    device: u64,
    inode: u64,
    entries: BTreeMap<String, Node>,
}

#[derive(Debug)]
struct State {
    nodes: BTreeMap<String, Node>,
    cwd: String,
    calls: Vec<Call>,
    failures: Vec<(&'static str, String, i32)>,
    removals_on_list: Vec<(String, String)>,
    temp_counter: u32,
    next_inode: u64,
}

impl State {
    fn allocate_inode(&mut self) -> u64 {
        self.next_inode += 1;
        self.next_inode
    }

    fn record(&mut self, name: &'static str, path: &str) -> io::Result<()> {
        self.calls.push(Call {
            name,
            path: path.to_string(),
        });
        match self
            .failures
            .iter()
            .find(|(call, target, _)| *call == name && target == path)
        {
            Some((_, _, errno)) => Err(io::Error::from_raw_os_error(*errno)),
            None => Ok(()),
        }
    }

    fn resolve(&self, path: &str) -> String {
        let mut parts: Vec<&str> = if path.starts_with('/') {
            Vec::new()
        } else {
            self.cwd.split('/').filter(|s| !s.is_empty()).collect()
        };

        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                name => parts.push(name),
            }
        }

        format!("/{}", parts.join("/"))
    }

    fn node(&self, key: &str) -> io::Result<&Node> {
        if let Some(node) = self.nodes.get(key) {
            return Ok(node);
        }
        // Distinguish a missing entry from a non-directory in the middle.
        let mut prefix = String::new();
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);
            match self.nodes.get(&prefix) {
                Some(node) if prefix != key && !is_dir(node.mode) => {
                    return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
                }
                Some(_) => {}
                None => break,
            }
        }
        Err(io::Error::from_raw_os_error(libc::ENOENT))
    }

    fn children(&self, key: &str) -> Vec<String> {
        let prefix = child_prefix(key);
        self.nodes
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect()
    }

    fn descendants(&self, key: &str) -> Vec<String> {
        let prefix = child_prefix(key);
        self.nodes
            .keys()
            .filter(|k| k.len() > prefix.len() && k.starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn insert(&mut self, key: String, mode: u32) -> io::Result<()> {
        if self.nodes.contains_key(&key) {
            return Err(io::Error::from_raw_os_error(libc::EEXIST));
        }
        let parent = parent_key(&key);
        let parent = self.node(&parent)?;
        if !is_dir(parent.mode) {
            return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
        }
        let device = parent.device;
        let inode = self.allocate_inode();
        self.nodes.insert(
            key,
            Node {
                mode,
                device,
                inode,
                covered: None,
            },
        );
        Ok(())
    }
}

fn is_dir(mode: u32) -> bool {
    mode & mode::S_IFMT == mode::S_IFDIR
}

fn child_prefix(key: &str) -> String {
    if key == "/" {
        "/".to_string()
    } else {
        format!("{key}/")
    }
}

fn parent_key(key: &str) -> String {
    match key.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(end) => key[..end].to_string(),
    }
}

/// An in-memory [`FileSystem`].
///
/// Cloning yields another handle onto the same tree.
///
/// # Examples
///
/// ```
/// use scratchfs::fs::MemoryFileSystem;
/// use scratchfs::{cleanup, exists, Path};
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir("/work").unwrap();
/// fs.create_dir("/work/run").unwrap();
/// fs.mount("/work/run", 7).unwrap();
/// fs.create_file("/work/run/output.txt").unwrap();
///
/// let root = Path::new("/work").unwrap();
/// let result = cleanup(&fs, &root).unwrap();
/// assert_eq!(result.unmounted, vec![Path::new("/work/run").unwrap()]);
/// assert!(!exists(&fs, &root).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    state: Rc<RefCell<State>>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    /// Create a filesystem holding only the root directory.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "/".to_string(),
            Node {
                mode: mode::S_IFDIR | 0o755,
                device: ROOT_DEVICE,
                inode: ROOT_INODE,
                covered: None,
            },
        );
        Self {
            state: Rc::new(RefCell::new(State {
                nodes,
                cwd: "/".to_string(),
                calls: Vec::new(),
                failures: Vec::new(),
                removals_on_list: Vec::new(),
                temp_counter: 0,
                next_inode: ROOT_INODE,
            })),
        }
    }

    /// Create a directory with mode `0755`. The parent must exist.
    ///
    /// # Errors
    ///
    /// Returns `EEXIST` if the entry exists and `ENOENT`/`ENOTDIR` if the
    /// parent is missing or not a directory.
    pub fn create_dir(&self, path: &str) -> io::Result<()> {
        self.create_node(path, mode::S_IFDIR | 0o755)
    }

    /// Create a regular file with mode `0644`.
    ///
    /// # Errors
    ///
    /// As for [`create_dir`](Self::create_dir).
    pub fn create_file(&self, path: &str) -> io::Result<()> {
        self.create_node(path, mode::S_IFREG | 0o644)
    }

    /// Create a symbolic link. Links are never followed.
    ///
    /// # Errors
    ///
    /// As for [`create_dir`](Self::create_dir).
    pub fn create_symlink(&self, path: &str) -> io::Result<()> {
        self.create_node(path, mode::S_IFLNK | 0o777)
    }

    /// Create an entry with an arbitrary mode word, type bits included.
    ///
    /// # Errors
    ///
    /// As for [`create_dir`](Self::create_dir).
    pub fn create_node(&self, path: &str, mode: u32) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path);
        state.insert(key, mode)
    }

    /// Mount a filesystem with the given device id on a directory.
    ///
    /// The directory becomes the empty root of a filesystem reporting
    /// `device`. Whatever the directory held is hidden until the matching
    /// unmount brings it back.
    ///
    /// # Errors
    ///
    /// Returns `ENOENT` if the path is missing, `ENOTDIR` if it is not a
    /// directory and `EBUSY` if something is already mounted there.
    pub fn mount(&self, path: &str, device: u64) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path);
        let node = state.node(&key)?;
        if !is_dir(node.mode) {
            return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
        }
        if node.covered.is_some() {
            return Err(io::Error::from_raw_os_error(libc::EBUSY));
        }

        let (covered_device, covered_inode) = (node.device, node.inode);
        let mut entries = BTreeMap::new();
        for descendant in state.descendants(&key) {
            if let Some(node) = state.nodes.remove(&descendant) {
                entries.insert(descendant, node);
            }
        }
        let inode = state.allocate_inode();
        if let Some(node) = state.nodes.get_mut(&key) {
            node.device = device;
            node.inode = inode;
            node.covered = Some(Covered {
                device: covered_device,
                inode: covered_inode,
                entries,
            });
        }
        Ok(())
    }

    /// Make `call` fail with `errno` whenever it is issued against `path`.
    pub fn fail(&self, call: &'static str, path: &str, errno: i32) {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path);
        state.failures.push((call, key, errno));
    }

    /// Remove `child` right after `dir` has been opened for listing.
    ///
    /// The listing still reports the child, which reproduces an entry
    /// vanishing between listing and probing.
    pub fn remove_after_listing(&self, dir: &str, child: &str) {
        let mut state = self.state.borrow_mut();
        let dir = state.resolve(dir);
        let child = state.resolve(child);
        state.removals_on_list.push((dir, child));
    }

    /// Whether an entry exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        let state = self.state.borrow();
        let key = state.resolve(path);
        state.nodes.contains_key(&key)
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Every call that modified the tree, in order.
    #[must_use]
    pub fn destructive_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_destructive)
            .collect()
    }

    /// Forget the calls recorded so far.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Number of entries, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    /// Whether only the root is left. The root itself can never be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

struct MemoryDirHandle {
    state: Rc<RefCell<State>>,
    path: String,
    names: VecDeque<String>,
}

impl DirHandle for MemoryDirHandle {
    fn next_entry(&mut self) -> Option<io::Result<String>> {
        self.names.pop_front().map(Ok)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        self.state.borrow_mut().record("closedir", &self.path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn stat(&self, path: &Path) -> io::Result<RawMetadata> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("stat", &key)?;
        let node = state.node(&key)?;
        Ok(RawMetadata {
            device: node.device,
            inode: node.inode,
            mode: node.mode,
        })
    }

    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirHandle>> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("opendir", &key)?;
        if !is_dir(state.node(&key)?.mode) {
            return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
        }

        let mut names: VecDeque<String> = state.children(&key).into();
        names.push_front("..".to_string());
        names.push_front(".".to_string());

        let vanishing: Vec<String> = state
            .removals_on_list
            .iter()
            .filter(|(dir, _)| *dir == key)
            .map(|(_, child)| child.clone())
            .collect();
        for child in vanishing {
            for descendant in state.descendants(&child) {
                state.nodes.remove(&descendant);
            }
            state.nodes.remove(&child);
        }

        Ok(Box::new(MemoryDirHandle {
            state: Rc::clone(&self.state),
            path: key,
            names,
        }))
    }

    fn unmount(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("unmount", &key)?;
        if state.node(&key)?.covered.is_none() {
            return Err(io::Error::from_raw_os_error(libc::EINVAL));
        }

        let descendants = state.descendants(&key);
        let nested = descendants.iter().any(|d| {
            state
                .nodes
                .get(d)
                .is_some_and(|node| node.covered.is_some())
        });
        if nested {
            return Err(io::Error::from_raw_os_error(libc::EBUSY));
        }

        // The mounted contents go away and the covered directory shows again.
        for descendant in descendants {
            state.nodes.remove(&descendant);
        }
        let restored = state.nodes.get_mut(&key).and_then(|node| {
            let covered = node.covered.take()?;
            node.device = covered.device;
            node.inode = covered.inode;
            Some(covered.entries)
        });
        state.nodes.extend(restored.unwrap_or_default());
        Ok(())
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("unlink", &key)?;
        if is_dir(state.node(&key)?.mode) {
            return Err(io::Error::from_raw_os_error(libc::EISDIR));
        }
        state.nodes.remove(&key);
        Ok(())
    }

    fn rmdir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("rmdir", &key)?;
        let node = state.node(&key)?;
        if !is_dir(node.mode) {
            return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
        }
        if key == "/" || node.covered.is_some() {
            return Err(io::Error::from_raw_os_error(libc::EBUSY));
        }
        if !state.children(&key).is_empty() {
            return Err(io::Error::from_raw_os_error(libc::ENOTEMPTY));
        }
        state.nodes.remove(&key);
        Ok(())
    }

    fn current_dir(&self) -> io::Result<String> {
        let mut state = self.state.borrow_mut();
        let cwd = state.cwd.clone();
        state.record("getcwd", &cwd)?;
        Ok(cwd)
    }

    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("chdir", &key)?;
        if !is_dir(state.node(&key)?.mode) {
            return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
        }
        state.cwd = key;
        Ok(())
    }

    fn mkdtemp(&self, template: &Path) -> io::Result<String> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(template.as_str());
        state.record("mkdtemp", &key)?;
        let stem = key
            .strip_suffix("XXXXXX")
            .ok_or_else(|| io::Error::from_raw_os_error(libc::EINVAL))?
            .to_string();

        loop {
            state.temp_counter += 1;
            let candidate = format!("{stem}{:06}", state.temp_counter);
            match state.insert(candidate.clone(), mode::S_IFDIR | 0o700) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.raw_os_error() == Some(libc::EEXIST) => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn access(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        let key = state.resolve(path.as_str());
        state.record("access", &key)?;
        state.node(&key).map(|_| ())
    }
}
