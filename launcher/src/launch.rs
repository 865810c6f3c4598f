//! Editor and player launching.
//!
//! Both entry points report an absent launcher as `Ok(false)` and only
//! return an error when the lookup or Wine itself fails.

use crate::error::Result;
use crate::locate::{locate_editor_launcher, locate_player_launcher};
use crate::prefix::WinePrefix;
use camino::{Utf8Path, Utf8PathBuf};
use cellar_common::CommandExecutor;
use log::warn;

/// Launches applications installed in a Wine prefix.
pub struct Launcher<'a> {
    prefix: &'a WinePrefix,
    versions_dir: Utf8PathBuf,
    executor: &'a dyn CommandExecutor,
}

impl<'a> Launcher<'a> {
    /// Creates a launcher scanning the prefix's own `Versions` directory.
    pub fn new(prefix: &'a WinePrefix, executor: &'a dyn CommandExecutor) -> Self {
        Self {
            versions_dir: prefix.versions_dir(),
            prefix,
            executor,
        }
    }

    /// Scans `versions_dir` instead of the prefix default.
    #[must_use]
    pub fn with_versions_dir(mut self, versions_dir: impl Into<Utf8PathBuf>) -> Self {
        self.versions_dir = versions_dir.into();
        self
    }

    /// Returns the directory scanned for launchers.
    #[must_use]
    pub fn versions_dir(&self) -> &Utf8Path {
        &self.versions_dir
    }

    /// Runs the editor, passing `uri` when one is given.
    ///
    /// An empty `uri` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns scan and Wine failures.
    pub fn run_editor(&self, uri: Option<&str>) -> Result<bool> {
        let Some(launcher) = locate_editor_launcher(&self.versions_dir)? else {
            warn!("no editor launcher under {}", self.versions_dir);
            return Ok(false);
        };
        let args: Vec<&str> = uri.filter(|uri| !uri.is_empty()).into_iter().collect();
        self.prefix.run_exe(self.executor, &launcher, &args)?;
        Ok(true)
    }

    /// Runs the player with `uri`.
    ///
    /// # Errors
    ///
    /// Returns scan and Wine failures.
    pub fn run_player(&self, uri: &str) -> Result<bool> {
        let Some(player) = locate_player_launcher(&self.versions_dir)? else {
            warn!("no player launcher under {}", self.versions_dir);
            return Ok(false);
        };
        self.prefix.run_exe(self.executor, &player, &[uri])?;
        Ok(true)
    }
}
