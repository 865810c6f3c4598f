//! Output formatting for the packager CLI.
//!
//! Progress and summaries go to stderr; only `--json` and `show` write to
//! stdout.

use crate::config::UnpackerKind;
use crate::error::{PackagerError, Result};
use crate::platform::PackageOutcome;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// Writes `message` and a newline, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Writes `message` and a newline to primary output.
///
/// # Errors
///
/// Returns [`PackagerError::WriteFailed`] if the write fails.
pub fn write_stdout_line(stdout: &mut dyn Write, message: impl std::fmt::Display) -> Result<()> {
    writeln!(stdout, "{message}").map_err(|source| PackagerError::WriteFailed { source })
}

/// Formats the closing message of a successful run.
#[must_use]
pub fn success_message(outcome: &PackageOutcome) -> String {
    match (&outcome.deb_path, &outcome.sha256) {
        (Some(deb), Some(sha256)) => format!("Built {deb}\n  sha256 {sha256}"),
        _ => format!(
            "Staged {} with {} metadata files; build skipped",
            outcome.package_root,
            outcome.metadata_files.len()
        ),
    }
}

/// Serialises `outcome` as pretty JSON.
///
/// # Errors
///
/// Returns [`PackagerError::Serialization`] if serialisation fails.
pub fn outcome_json(outcome: &PackageOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Everything a build would do, for `--dry-run`.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use cellar_packager::config::UnpackerKind;
/// use cellar_packager::output::DryRunInfo;
///
/// let artifacts = vec![Utf8PathBuf::from("dist/app-1.0-py3-none-any.whl")];
/// let info = DryRunInfo {
///     package_root: &Utf8PathBuf::from("/tmp/app-debian/app_1.0_amd64"),
///     package_filename: "app_1.0_amd64.deb",
///     artifacts: &artifacts,
///     unpacker: UnpackerKind::Unzip,
///     build: true,
/// };
///
/// assert!(info.display_text().contains("app_1.0_amd64.deb"));
/// ```
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Package root that would be staged.
    pub package_root: &'a Utf8Path,
    /// Archive that would be built.
    pub package_filename: &'a str,
    /// Artifacts that would be ingested.
    pub artifacts: &'a [Utf8PathBuf],
    /// Unpacker that would be used.
    pub unpacker: UnpackerKind,
    /// Whether `debuild` would run.
    pub build: bool,
}

impl DryRunInfo<'_> {
    /// Formats the plan for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let unpacker = match self.unpacker {
            UnpackerKind::Unzip => "unzip",
            UnpackerKind::Builtin => "builtin",
        };
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Package root: {}", self.package_root),
            format!(
                "Archive: {}",
                if self.build {
                    self.package_filename
                } else {
                    "(build skipped)"
                }
            ),
            format!("Unpacker: {unpacker}"),
            String::new(),
            "Artifacts:".to_owned(),
        ];
        lines.extend(self.artifacts.iter().map(|a| format!("  - {a}")));
        lines.join("\n")
    }
}
