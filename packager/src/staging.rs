//! Staging area management.
//!
//! The containment dish is the disposable root of one run. Subdirectories
//! are created lazily by the accessors, so a cleared dish reappears only
//! where the pipeline actually writes.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// Name of the metadata directory inside the package root.
pub const DEBIAN_DIR: &str = "debian";

/// Name of the payload directory inside the package root.
pub const PACKAGES_DIR: &str = "packages";

/// Owns the containment dish and the package root beneath it.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dish: Utf8PathBuf,
    package_dir_name: String,
}

impl StagingArea {
    /// Creates a staging area rooted at `dish` for the named package root.
    #[must_use]
    pub fn new(dish: impl Into<Utf8PathBuf>, package_dir_name: impl Into<String>) -> Self {
        Self {
            dish: dish.into(),
            package_dir_name: package_dir_name.into(),
        }
    }

    /// Returns the containment dish without creating it.
    #[must_use]
    pub fn dish(&self) -> &Utf8Path {
        &self.dish
    }

    /// Returns `<dish>/<package_dir_name>`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if the directory cannot be created.
    pub fn package_root(&self) -> Result<Utf8PathBuf> {
        ensure_dir(self.dish.join(&self.package_dir_name))
    }

    /// Returns `<package_root>/debian`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if the directory cannot be created.
    pub fn debian_dir(&self) -> Result<Utf8PathBuf> {
        ensure_dir(self.package_root()?.join(DEBIAN_DIR))
    }

    /// Returns `<package_root>/packages`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if the directory cannot be created.
    pub fn packages_dir(&self) -> Result<Utf8PathBuf> {
        ensure_dir(self.package_root()?.join(PACKAGES_DIR))
    }

    /// Removes the containment dish and everything below it.
    ///
    /// A missing dish is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if removal fails.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dish) {
            Ok(()) => {
                debug!("removed containment dish {}", self.dish);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PackagerError::staging(self.dish.clone(), e)),
        }
    }

    /// Copies `source` into the packages directory, keeping its file name.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ArtifactNotFound`] if `source` has no file
    /// name and [`PackagerError::Staging`] if the copy fails.
    pub fn stage_artifact(&self, source: &Utf8Path) -> Result<Utf8PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| PackagerError::ArtifactNotFound {
                path: source.to_owned(),
            })?;
        let dest = self.packages_dir()?.join(name);
        fs::copy(source, &dest).map_err(|e| PackagerError::staging(dest.clone(), e))?;
        debug!("staged {source} as {dest}");
        Ok(dest)
    }
}

fn ensure_dir(path: Utf8PathBuf) -> Result<Utf8PathBuf> {
    fs::create_dir_all(&path).map_err(|e| PackagerError::staging(path.clone(), e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        area: StagingArea,
    }

    #[fixture]
    fn staging() -> Fixture {
        let temp = tempfile::tempdir().expect("tempdir");
        let dish = Utf8PathBuf::from_path_buf(temp.path().join("dish")).expect("utf8");
        Fixture {
            area: StagingArea::new(dish, "app_1.0_amd64"),
            _temp: temp,
        }
    }

    #[rstest]
    fn accessors_create_directories(staging: Fixture) {
        let debian = staging.area.debian_dir().expect("debian dir");
        let packages = staging.area.packages_dir().expect("packages dir");

        assert!(debian.is_dir());
        assert!(packages.is_dir());
        assert_eq!(debian.parent(), packages.parent());
        assert!(debian.ends_with("app_1.0_amd64/debian"));
    }

    #[rstest]
    fn accessors_are_idempotent(staging: Fixture) {
        let first = staging.area.packages_dir().expect("first");
        std::fs::write(first.join("keep"), b"x").expect("write");
        let second = staging.area.packages_dir().expect("second");

        assert_eq!(first, second);
        assert!(second.join("keep").is_file());
    }

    #[rstest]
    fn clear_removes_existing_tree(staging: Fixture) {
        let packages = staging.area.packages_dir().expect("packages dir");
        std::fs::write(packages.join("stale.whl"), b"x").expect("write");

        staging.area.clear().expect("clear");

        assert!(!staging.area.dish().exists());
    }

    #[rstest]
    fn clear_tolerates_missing_dish(staging: Fixture) {
        assert!(!staging.area.dish().exists());
        staging.area.clear().expect("clear on missing dish");
    }

    #[rstest]
    fn stage_artifact_copies_into_packages(staging: Fixture) {
        let source = staging.area.dish().with_file_name("app-1.0-py3-none-any.whl");
        std::fs::write(&source, b"wheel").expect("write artifact");

        let staged = staging.area.stage_artifact(&source).expect("stage");

        assert_eq!(staged.file_name(), Some("app-1.0-py3-none-any.whl"));
        assert!(staged.starts_with(staging.area.packages_dir().expect("packages dir")));
        assert!(source.is_file());
    }
}
