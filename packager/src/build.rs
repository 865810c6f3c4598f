//! External package build.
//!
//! `debuild -uc -us` runs with the package root as working directory and
//! leaves the unsigned archive next to it, in the containment dish.

use crate::dir_stack::DirectoryStack;
use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cellar_common::{CommandExecutor, describe_failure};
use log::info;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;

/// Arguments for an unsigned source and binary build.
pub const DEBUILD_ARGS: [&str; 2] = ["-uc", "-us"];

/// The archive produced by a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Path of the `.deb` file.
    pub deb_path: Utf8PathBuf,
    /// Lowercase hex SHA-256 of the archive.
    pub sha256: String,
}

/// Runs `debuild` through a [`CommandExecutor`].
pub struct DebuildInvoker<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> DebuildInvoker<'a> {
    /// Creates an invoker that runs `debuild` through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Builds the package in `package_root` and checks for `expected`.
    ///
    /// The previous working directory is restored whether or not the build
    /// succeeds. The build is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ToolFailed`] if `debuild` cannot be started
    /// or exits non-zero, and [`PackagerError::BuildOutputMissing`] if it
    /// succeeds without producing `expected`.
    pub fn build(
        &self,
        dirs: &mut DirectoryStack,
        package_root: &Utf8Path,
        expected: &Utf8Path,
    ) -> Result<BuildOutput> {
        info!("building {} in {package_root}", expected.file_name().unwrap_or("package"));

        let guard = dirs.scoped(package_root)?;
        let output = self
            .executor
            .run("debuild", &DEBUILD_ARGS)
            .map_err(|e| PackagerError::ToolFailed {
                tool: "debuild",
                message: e.to_string(),
            })?;
        guard.close()?;

        if !output.status.success() {
            return Err(PackagerError::ToolFailed {
                tool: "debuild",
                message: format!("{}: {}", output.status, describe_failure(&output)),
            });
        }

        if !expected.is_file() {
            return Err(PackagerError::BuildOutputMissing {
                path: expected.to_owned(),
            });
        }

        Ok(BuildOutput {
            deb_path: expected.to_owned(),
            sha256: compute_sha256(expected)?,
        })
    }
}

/// Computes the lowercase hex SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns [`PackagerError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
