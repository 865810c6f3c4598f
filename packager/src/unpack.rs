//! Artifact unpacking.
//!
//! Two implementations sit behind [`ArtifactUnpacker`]: [`UnzipCommand`]
//! shells out to `unzip`, and [`BuiltinUnpacker`] extracts zip, gzip-tar
//! and zstd-tar archives in-process. The builtin path validates each entry
//! so nothing lands outside the destination directory.

use camino::Utf8Path;
use cellar_common::{CommandExecutor, describe_failure};
use log::debug;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path};

/// Errors arising from unpacking one artifact.
#[derive(Debug, thiserror::Error)]
pub enum UnpackError {
    /// I/O error while reading the archive or writing entries.
    #[error("unpack I/O error: {0}")]
    Io(#[from] io::Error),

    /// The zip container is corrupt or unreadable.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An entry would be written outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },

    /// The file extension is not a supported archive format.
    #[error("unsupported archive format: {name}")]
    UnsupportedFormat {
        /// The artifact file name.
        name: String,
    },

    /// The external unpack tool exited unsuccessfully.
    #[error("unzip failed: {message}")]
    ToolFailed {
        /// Summary of the tool's output.
        message: String,
    },
}

/// Unpacks an archive into a destination directory.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactUnpacker {
    /// Extracts `archive` into `dest`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns an [`UnpackError`] describing why extraction failed.
    fn unpack(&self, archive: &Utf8Path, dest: &Utf8Path) -> Result<(), UnpackError>;
}

/// Unpacks with the external `unzip` tool.
pub struct UnzipCommand<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> UnzipCommand<'a> {
    /// Creates an unpacker that runs `unzip` through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }
}

impl ArtifactUnpacker for UnzipCommand<'_> {
    fn unpack(&self, archive: &Utf8Path, dest: &Utf8Path) -> Result<(), UnpackError> {
        let output = self
            .executor
            .run("unzip", &["-q", "-o", archive.as_str(), "-d", dest.as_str()])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(UnpackError::ToolFailed {
                message: describe_failure(&output),
            })
        }
    }
}

/// Archive formats understood by [`BuiltinUnpacker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveFormat {
    Zip,
    TarGz,
    TarZst,
}

impl ArchiveFormat {
    fn detect(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".whl") || lower.ends_with(".zip") {
            Some(Self::Zip)
        } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if lower.ends_with(".tar.zst") {
            Some(Self::TarZst)
        } else {
            None
        }
    }
}

/// In-process unpacker using the `zip`, `tar`, `flate2` and `zstd` crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinUnpacker;

impl ArtifactUnpacker for BuiltinUnpacker {
    fn unpack(&self, archive: &Utf8Path, dest: &Utf8Path) -> Result<(), UnpackError> {
        let name = archive.file_name().unwrap_or(archive.as_str());
        let format = ArchiveFormat::detect(name).ok_or_else(|| UnpackError::UnsupportedFormat {
            name: name.to_owned(),
        })?;
        debug!("extracting {archive} as {format:?}");

        let file = File::open(archive)?;
        match format {
            ArchiveFormat::Zip => unpack_zip(file, dest.as_std_path()),
            ArchiveFormat::TarGz => {
                unpack_tar(flate2::read::GzDecoder::new(file), dest.as_std_path())
            }
            ArchiveFormat::TarZst => unpack_tar(zstd::Decoder::new(file)?, dest.as_std_path()),
        }
    }
}

fn unpack_zip(file: File, dest: &Path) -> Result<(), UnpackError> {
    let mut archive = zip::ZipArchive::new(file)?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let entry_path = Path::new(entry.name()).to_path_buf();
        validate_entry_path(&entry_path)?;

        let dest_path = dest.join(&entry_path);
        if entry.is_dir() {
            fs::create_dir_all(&dest_path)?;
            continue;
        }
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&dest_path)?;
        io::copy(&mut entry, &mut out)?;
        apply_mode(&dest_path, entry.unix_mode())?;
    }
    Ok(())
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode {
        Some(mode) => fs::set_permissions(path, fs::Permissions::from_mode(mode)),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> io::Result<()> {
    Ok(())
}

fn unpack_tar<R: Read>(reader: R, dest: &Path) -> Result<(), UnpackError> {
    let mut archive = tar::Archive::new(reader);
    for entry_result in archive.entries()? {
        let mut entry = entry_result?;
        let entry_path = entry.path()?.into_owned();

        validate_entry_path(&entry_path)?;
        let kind = entry.header().entry_type();
        if kind.is_symlink() || kind.is_hard_link() {
            return Err(UnpackError::PathTraversal {
                path: entry_path.display().to_string(),
            });
        }

        let dest_path = dest.join(&entry_path);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        entry.unpack(&dest_path)?;
    }
    Ok(())
}

/// Rejects entry paths that are absolute or contain `..`.
fn validate_entry_path(path: &Path) -> Result<(), UnpackError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        return Err(UnpackError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
