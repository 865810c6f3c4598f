//! Artifact discovery and ingestion.
//!
//! Artifacts are copied into `packages/`, then each regular file found there
//! is unpacked in place and the archive removed, leaving only the exploded
//! trees that `debian/install` points at.

use crate::dir_stack::DirectoryStack;
use crate::error::{PackagerError, Result};
use crate::staging::StagingArea;
use crate::unpack::ArtifactUnpacker;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs;

/// Collects the files in `dist_dir` matching `pattern`, sorted.
///
/// # Errors
///
/// Returns [`PackagerError::InvalidPattern`] if the pattern does not parse
/// and [`PackagerError::NonUtf8Path`] for a match that is not UTF-8.
pub fn discover(dist_dir: &Utf8Path, pattern: &str) -> Result<Vec<Utf8PathBuf>> {
    let full = format!("{}/{pattern}", glob::Pattern::escape(dist_dir.as_str()));
    let paths = glob::glob(&full).map_err(|e| PackagerError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })?;

    let mut found = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| PackagerError::Io(e.into()))?;
        if !path.is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|path| PackagerError::NonUtf8Path { path })?;
        found.push(path);
    }
    found.sort();
    debug!("discovered {} artifact(s) in {dist_dir}", found.len());
    Ok(found)
}

/// Checks that `artifacts` is non-empty, points at files and has no two
/// entries sharing a file name.
///
/// # Errors
///
/// Returns [`PackagerError::NoArtifacts`], [`PackagerError::ArtifactNotFound`]
/// or [`PackagerError::DuplicateArtifact`].
pub fn check_artifacts(artifacts: &[Utf8PathBuf]) -> Result<()> {
    if artifacts.is_empty() {
        return Err(PackagerError::NoArtifacts);
    }
    let mut names = BTreeSet::new();
    for artifact in artifacts {
        let name = artifact
            .file_name()
            .filter(|_| artifact.is_file())
            .ok_or_else(|| PackagerError::ArtifactNotFound {
                path: artifact.clone(),
            })?;
        if !names.insert(name) {
            return Err(PackagerError::DuplicateArtifact {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

/// Copies `artifacts` into the packages directory and explodes each one.
///
/// The working directory is scoped to `packages/` while unpacking. Returns
/// the archives that were unpacked, in the order they were processed.
///
/// # Errors
///
/// Returns any [`check_artifacts`] error, [`PackagerError::Staging`] for copy
/// or removal failures, and [`PackagerError::Unpack`] if an archive cannot
/// be extracted. The first failure aborts ingestion.
pub fn ingest(
    staging: &StagingArea,
    dirs: &mut DirectoryStack,
    artifacts: &[Utf8PathBuf],
    unpacker: &dyn ArtifactUnpacker,
) -> Result<Vec<Utf8PathBuf>> {
    check_artifacts(artifacts)?;
    for artifact in artifacts {
        staging.stage_artifact(artifact)?;
    }

    let packages = staging.packages_dir()?;
    let archives = regular_files(&packages)?;

    let guard = dirs.scoped(&packages)?;
    for archive in &archives {
        info!("unpacking {}", archive.file_name().unwrap_or(archive.as_str()));
        unpacker
            .unpack(archive, &packages)
            .map_err(|source| PackagerError::Unpack {
                artifact: archive.clone(),
                source,
            })?;
        fs::remove_file(archive).map_err(|e| PackagerError::staging(archive.clone(), e))?;
    }
    guard.close()?;

    Ok(archives)
}

/// Lists the regular files directly inside `dir`, sorted.
fn regular_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for entry in dir
        .read_dir_utf8()
        .map_err(|e| PackagerError::staging(dir, e))?
    {
        let entry = entry.map_err(|e| PackagerError::staging(dir, e))?;
        if entry.file_type()?.is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Lists the directories directly inside `dir` by name, sorted.
///
/// # Errors
///
/// Returns [`PackagerError::Staging`] if the directory cannot be read.
pub fn top_level_dirs(dir: &Utf8Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in dir
        .read_dir_utf8()
        .map_err(|e| PackagerError::staging(dir, e))?
    {
        let entry = entry.map_err(|e| PackagerError::staging(dir, e))?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_owned());
        }
    }
    names.sort();
    Ok(names)
}
