//! Wine prefix layout and execution.

use crate::dirs::BaseDirs;
use crate::error::{LauncherError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cellar_common::{CommandExecutor, describe_failure};
use log::{debug, info};

/// Wine binary used when none is configured.
pub const DEFAULT_WINE: &str = "wine";

/// A Wine prefix and the Wine binary that runs programs inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinePrefix {
    root: Utf8PathBuf,
    wine: String,
}

impl WinePrefix {
    /// Uses the prefix at `root` with the default Wine binary.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            wine: DEFAULT_WINE.to_owned(),
        }
    }

    /// Uses the default prefix `<data dir>/cellar/wineprefix`.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::NoDataDir`] when no data directory is known
    /// and [`LauncherError::NonUtf8Path`] when it is not valid UTF-8.
    pub fn default_location(dirs: &dyn BaseDirs) -> Result<Self> {
        let data = dirs.cellar_data_dir().ok_or(LauncherError::NoDataDir)?;
        let root = Utf8PathBuf::from_path_buf(data.join("wineprefix"))
            .map_err(|path| LauncherError::NonUtf8Path { path })?;
        Ok(Self::new(root))
    }

    /// Replaces the Wine binary.
    #[must_use]
    pub fn with_wine(mut self, wine: impl Into<String>) -> Self {
        self.wine = wine.into();
        self
    }

    /// Returns the prefix root (the `WINEPREFIX` value).
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the Wine binary.
    #[must_use]
    pub fn wine(&self) -> &str {
        &self.wine
    }

    /// Returns the application's `Versions` directory inside the prefix.
    #[must_use]
    pub fn versions_dir(&self) -> Utf8PathBuf {
        self.root
            .join("drive_c")
            .join("Program Files (x86)")
            .join("Roblox")
            .join("Versions")
    }

    /// Runs `exe` with `args` inside the prefix and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Spawn`] when Wine cannot be started and
    /// [`LauncherError::ToolFailed`] when it exits unsuccessfully.
    pub fn run_exe(
        &self,
        executor: &dyn CommandExecutor,
        exe: &Utf8Path,
        args: &[&str],
    ) -> Result<()> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(exe.as_str());
        argv.extend_from_slice(args);
        info!("running {exe} in {}", self.root);
        debug!("{} {}", self.wine, argv.join(" "));

        let output = executor
            .run_with_env(&self.wine, &argv, &[("WINEPREFIX", self.root.as_str())])
            .map_err(|source| LauncherError::Spawn {
                tool: self.wine.clone(),
                source,
            })?;
        if output.status.success() {
            return Ok(());
        }
        Err(LauncherError::ToolFailed {
            tool: self.wine.clone(),
            exe: exe.to_owned(),
            message: describe_failure(&output),
        })
    }
}
