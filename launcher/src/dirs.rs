//! Platform directory resolution.
//!
//! The default Wine prefix lives under the user's data directory. The
//! lookup sits behind [`BaseDirs`] so tests can substitute fixed paths.

use std::path::PathBuf;

/// Resolves per-user base directories.
pub trait BaseDirs {
    /// Returns the directory holding cellar's per-user data.
    fn cellar_data_dir(&self) -> Option<PathBuf>;
}

/// [`BaseDirs`] backed by `directories-next`.
#[derive(Debug, Clone)]
pub struct SystemBaseDirs {
    dirs: directories_next::BaseDirs,
}

impl SystemBaseDirs {
    /// Resolves the base directories for the current user.
    ///
    /// Returns `None` when no home directory is known.
    #[must_use]
    pub fn new() -> Option<Self> {
        directories_next::BaseDirs::new().map(|dirs| Self { dirs })
    }
}

impl BaseDirs for SystemBaseDirs {
    fn cellar_data_dir(&self) -> Option<PathBuf> {
        Some(self.dirs.data_dir().join("cellar"))
    }
}
