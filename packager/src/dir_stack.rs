//! Working-directory stack.
//!
//! The process working directory is global state, so every change made by
//! the pipeline goes through a [`DirectoryStack`]. Prefer
//! [`DirectoryStack::scoped`], whose guard restores the previous directory
//! when it goes out of scope, including on early return and unwinding.

use crate::error::{PackagerError, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// LIFO stack of previous working directories.
#[derive(Debug, Default)]
pub struct DirectoryStack {
    stack: Vec<PathBuf>,
}

impl DirectoryStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes into `path`, remembering the current directory.
    ///
    /// Returns the directory that was current before the change. The stack
    /// is left untouched when the change fails.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ChangeDirectory`] if the current directory
    /// cannot be read or `path` cannot be entered.
    pub fn push(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let previous = std::env::current_dir().map_err(|source| PackagerError::ChangeDirectory {
            path: PathBuf::from("."),
            source,
        })?;
        std::env::set_current_dir(path).map_err(|source| PackagerError::ChangeDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("pushd {} (from {})", path.display(), previous.display());
        self.stack.push(previous.clone());
        Ok(previous)
    }

    /// Returns to the most recently remembered directory.
    ///
    /// The entry is consumed even if the change fails.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::DirectoryStackEmpty`] with no matching push
    /// and [`PackagerError::ChangeDirectory`] if the directory is gone.
    pub fn pop(&mut self) -> Result<PathBuf> {
        let previous = self.stack.pop().ok_or(PackagerError::DirectoryStackEmpty)?;
        std::env::set_current_dir(&previous).map_err(|source| PackagerError::ChangeDirectory {
            path: previous.clone(),
            source,
        })?;
        debug!("popd {}", previous.display());
        Ok(previous)
    }

    /// Number of outstanding pushes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` when every push has been popped.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pushes `path` and returns a guard that pops it on drop.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`DirectoryStack::push`].
    pub fn scoped(&mut self, path: impl AsRef<Path>) -> Result<ScopedDir<'_>> {
        self.push(path)?;
        Ok(ScopedDir {
            stack: self,
            closed: false,
        })
    }
}

/// Guard returned by [`DirectoryStack::scoped`].
#[derive(Debug)]
#[must_use = "dropping the guard immediately restores the previous directory"]
pub struct ScopedDir<'a> {
    stack: &'a mut DirectoryStack,
    closed: bool,
}

impl ScopedDir<'_> {
    /// Restores the previous directory, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`DirectoryStack::pop`].
    pub fn close(mut self) -> Result<PathBuf> {
        self.closed = true;
        self.stack.pop()
    }
}

impl Drop for ScopedDir<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.stack.pop() {
            warn!("failed to restore working directory: {e}");
        }
    }
}
