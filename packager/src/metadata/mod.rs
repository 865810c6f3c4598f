//! Writers for the files under `debian/`.
//!
//! [`MetadataWriter::write_all`] runs every writer in a fixed order: compat,
//! install, control, copyright, files, rules, changelog. Each writer
//! overwrites its file, so re-running against the same staging area is
//! safe. Only the changelog depends on anything outside the configuration;
//! its history source and clock are passed in.

mod changelog;

pub use changelog::render_changelog;

use crate::config::PackagingConfig;
use crate::error::{PackagerError, Result};
use crate::fields::render;
use crate::history::VersionHistory;
use crate::ingest::top_level_dirs;
use crate::records::{control_fields, copyright_fields};
use crate::staging::{PACKAGES_DIR, StagingArea};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fs;
use time::OffsetDateTime;

/// The debhelper makefile; shared-library dependency scanning is disabled.
pub const RULES: &str = "#!/usr/bin/make -f\n\n%:\n\tdh $@\n\noverride_dh_shlibdeps:\n\ttrue\n";

/// File names written under `debian/`, in write order.
pub const METADATA_FILES: [&str; 7] = [
    "compat",
    "install",
    "control",
    "copyright",
    "files",
    "rules",
    "changelog",
];

/// Writes the Debian metadata files for one staging area.
pub struct MetadataWriter<'a> {
    config: &'a PackagingConfig,
    staging: &'a StagingArea,
}

impl<'a> MetadataWriter<'a> {
    /// Creates a writer for `staging` using `config`.
    #[must_use]
    pub fn new(config: &'a PackagingConfig, staging: &'a StagingArea) -> Self {
        Self { config, staging }
    }

    /// Runs every writer in order and returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an individual writer.
    pub fn write_all(
        &self,
        history: &dyn VersionHistory,
        now: OffsetDateTime,
    ) -> Result<Vec<Utf8PathBuf>> {
        info!("writing debian metadata");
        Ok(vec![
            self.write_compat()?,
            self.write_install()?,
            self.write_control()?,
            self.write_copyright(now.year())?,
            self.write_files()?,
            self.write_rules()?,
            self.write_changelog(history, now)?,
        ])
    }

    /// Writes `debian/compat`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if the file cannot be written.
    pub fn write_compat(&self) -> Result<Utf8PathBuf> {
        self.write("compat", &format!("{}\n", self.config.debian.compat))
    }

    /// Writes `debian/install`, one line per directory in `packages/`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if `packages/` cannot be listed or
    /// the file cannot be written.
    pub fn write_install(&self) -> Result<Utf8PathBuf> {
        let names = top_level_dirs(&self.staging.packages_dir()?)?;
        let manifest = install_manifest(&names, &self.config.debian.install_prefix);
        self.write("install", &manifest)
    }

    /// Writes `debian/control`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MalformedField`] for an invalid field and
    /// [`PackagerError::Staging`] if the file cannot be written.
    pub fn write_control(&self) -> Result<Utf8PathBuf> {
        let record = render(&control_fields(self.config)?)?;
        self.write("control", &format!("{record}\n"))
    }

    /// Writes `debian/copyright` for `current_year`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MalformedField`] for an invalid field and
    /// [`PackagerError::Staging`] if the file cannot be written.
    pub fn write_copyright(&self, current_year: i32) -> Result<Utf8PathBuf> {
        let record = render(&copyright_fields(self.config, current_year))?;
        self.write("copyright", &format!("{record}\n"))
    }

    /// Writes `debian/files`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if the file cannot be written.
    pub fn write_files(&self) -> Result<Utf8PathBuf> {
        let debian = &self.config.debian;
        let line = format!(
            "{} {} {}\n",
            self.config.package_filename(),
            debian.section,
            debian.priority
        );
        self.write("files", &line)
    }

    /// Writes the executable `debian/rules`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Staging`] if the file cannot be written or
    /// made executable.
    pub fn write_rules(&self) -> Result<Utf8PathBuf> {
        let path = self.write("rules", RULES)?;
        make_executable(&path)?;
        Ok(path)
    }

    /// Writes `debian/changelog` from the history between the configured
    /// reference branch and the current branch.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Git`] if the history cannot be read,
    /// [`PackagerError::Timestamp`] if `now` cannot be formatted, and
    /// [`PackagerError::Staging`] if the file cannot be written.
    pub fn write_changelog(
        &self,
        history: &dyn VersionHistory,
        now: OffsetDateTime,
    ) -> Result<Utf8PathBuf> {
        let branch = history.current_branch()?;
        let summaries = history.summaries(&self.config.debian.reference_branch, &branch)?;
        debug!(
            "{} change(s) between {} and {branch}",
            summaries.len(),
            self.config.debian.reference_branch
        );
        let text = render_changelog(self.config, &summaries, now)?;
        self.write("changelog", &text)
    }

    fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.staging.debian_dir()?.join(name);
        fs::write(&path, contents).map_err(|e| PackagerError::staging(path.clone(), e))?;
        debug!("wrote {path}");
        Ok(path)
    }
}

/// Renders the install manifest for the given top-level directory names.
///
/// # Examples
///
/// ```
/// use cellar_packager::metadata::install_manifest;
///
/// let names = vec!["app".to_owned(), "app-1.0.dist-info".to_owned()];
/// assert_eq!(
///     install_manifest(&names, "/usr/lib/python3/dist-packages"),
///     "packages/app /usr/lib/python3/dist-packages\n\
///      packages/app-1.0.dist-info /usr/lib/python3/dist-packages\n",
/// );
/// ```
#[must_use]
pub fn install_manifest(names: &[String], prefix: &str) -> String {
    names
        .iter()
        .map(|name| format!("{PACKAGES_DIR}/{name} {prefix}\n"))
        .collect()
}

#[cfg(unix)]
fn make_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| PackagerError::staging(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}
