//! Launcher lookup inside the application's `Versions` directory.
//!
//! Each installed build lives in its own `Versions/<build-id>/` directory.
//! Directories are scanned in name order so the result does not depend on
//! `read_dir` ordering.

use crate::error::{LauncherError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io;

/// Launcher shipped inside each versioned editor build.
pub const EDITOR_LAUNCHER: &str = "RobloxStudioLauncherBeta.exe";

/// Launcher some installers leave directly under `Versions/`.
pub const LEGACY_EDITOR_LAUNCHER: &str = "RobloxStudioBetaLauncher.exe";

/// Launcher shipped inside each versioned player build.
pub const PLAYER_LAUNCHER: &str = "RobloxPlayerLauncher.exe";

/// Finds `exe_name` in the first versioned directory that contains it.
///
/// Returns `None` when `versions_dir` does not exist or no build ships the
/// executable.
///
/// # Errors
///
/// Returns [`LauncherError::Scan`] when an existing directory cannot be
/// read or holds a non-UTF-8 entry.
pub fn locate_in_versions(versions_dir: &Utf8Path, exe_name: &str) -> Result<Option<Utf8PathBuf>> {
    let entries = match versions_dir.read_dir_utf8() {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{versions_dir} does not exist");
            return Ok(None);
        }
        Err(source) => return Err(scan_error(versions_dir, source)),
    };

    let mut builds = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| scan_error(versions_dir, source))?;
        let file_type = entry
            .file_type()
            .map_err(|source| scan_error(versions_dir, source))?;
        if file_type.is_dir() {
            builds.push(entry.into_path());
        }
    }
    builds.sort();

    Ok(builds
        .into_iter()
        .map(|build| build.join(exe_name))
        .find(|candidate| candidate.is_file()))
}

/// Locates the editor launcher.
///
/// Prefers a versioned [`EDITOR_LAUNCHER`] and falls back to
/// [`LEGACY_EDITOR_LAUNCHER`] directly under `versions_dir`.
///
/// # Errors
///
/// Propagates scan errors from [`locate_in_versions`].
pub fn locate_editor_launcher(versions_dir: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    if let Some(launcher) = locate_in_versions(versions_dir, EDITOR_LAUNCHER)? {
        return Ok(Some(launcher));
    }
    let legacy = versions_dir.join(LEGACY_EDITOR_LAUNCHER);
    Ok(legacy.exists().then_some(legacy))
}

/// Locates the player launcher.
///
/// # Errors
///
/// Propagates scan errors from [`locate_in_versions`].
pub fn locate_player_launcher(versions_dir: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    locate_in_versions(versions_dir, PLAYER_LAUNCHER)
}

fn scan_error(path: &Utf8Path, source: io::Error) -> LauncherError {
    LauncherError::Scan {
        path: path.to_owned(),
        source,
    }
}
