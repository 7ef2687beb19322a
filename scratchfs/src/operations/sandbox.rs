//! Scratch directory lifecycle for a single run.
//!
//! A [`Sandbox`] owns one uniquely named scratch directory: it creates the
//! directory, optionally makes it the working directory for the duration of
//! a run, and finally removes it with [`TreeCleaner`], detaching anything
//! the run mounted inside.

use crate::config::Config;
use crate::error::Result;
use crate::fs::{change_directory, create_temp_directory, FileSystem, SystemFileSystem};
use crate::path::Path;

use super::cleanup::{CleanupResult, TreeCleaner};

/// A scratch directory and the working directory to restore on leave.
///
/// # Examples
///
/// ```
/// use scratchfs::config::Config;
/// use scratchfs::fs::{get_current_directory, MemoryFileSystem};
/// use scratchfs::Sandbox;
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir("/tmp").unwrap();
/// let config = Config {
///     work_directory: Some("/tmp".to_string()),
///     ..Config::defaults()
/// };
///
/// let mut sandbox = Sandbox::create(&fs, &config).unwrap();
/// sandbox.enter().unwrap();
/// assert_eq!(&get_current_directory(&fs).unwrap(), sandbox.root());
///
/// let result = sandbox.cleanup().unwrap();
/// assert_eq!(result.directories_removed, 1);
/// assert_eq!(get_current_directory(&fs).unwrap().as_str(), "/");
/// ```
pub struct Sandbox<'a, F: FileSystem + ?Sized = SystemFileSystem> {
    fs: &'a F,
    root: Path,
    previous: Option<Path>,
}

impl<'a, F: FileSystem + ?Sized> Sandbox<'a, F> {
    /// Create a fresh scratch directory from the configured template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or the directory cannot
    /// be created.
    pub fn create(fs: &'a F, config: &Config) -> Result<Self> {
        let template = config.scratch_template()?;
        let root = create_temp_directory(fs, &template)?;
        log::debug!("created sandbox {}", root);
        Ok(Self {
            fs,
            root,
            previous: None,
        })
    }

    /// The scratch directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the sandbox is the working directory.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.previous.is_some()
    }

    /// Make the scratch directory the working directory.
    ///
    /// Entering twice keeps the directory recorded by the first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be changed.
    pub fn enter(&mut self) -> Result<()> {
        let previous = change_directory(self.fs, &self.root)?;
        if self.previous.is_none() {
            self.previous = Some(previous);
        }
        Ok(())
    }

    /// Restore the working directory recorded by [`enter`](Self::enter).
    ///
    /// Does nothing if the sandbox was not entered.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be changed.
    pub fn leave(&mut self) -> Result<()> {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = change_directory(self.fs, &previous) {
                self.previous = Some(previous);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Leave the sandbox if needed, then remove it.
    ///
    /// # Errors
    ///
    /// Returns the first failure from leaving or from the cleanup itself; a
    /// failed cleanup may leave part of the tree behind.
    pub fn cleanup(mut self) -> Result<CleanupResult> {
        self.leave()?;
        TreeCleaner::new(self.fs).cleanup(&self.root)
    }
}
