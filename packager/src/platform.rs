//! Packaging platform orchestration.
//!
//! A platform prepares a fresh staging tree from the artifacts
//! ([`PackagingPlatform::before_package`]) and then writes metadata and
//! builds the archive ([`PackagingPlatform::package`]).

use crate::build::DebuildInvoker;
use crate::config::PackagingConfig;
use crate::dir_stack::DirectoryStack;
use crate::error::Result;
use crate::history::VersionHistory;
use crate::ingest::ingest;
use crate::metadata::MetadataWriter;
use crate::staging::StagingArea;
use crate::unpack::ArtifactUnpacker;
use camino::{Utf8Path, Utf8PathBuf};
use cellar_common::CommandExecutor;
use log::info;
use serde::Serialize;
use time::OffsetDateTime;

/// Result of a completed packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOutcome {
    /// The staged package root.
    pub package_root: Utf8PathBuf,
    /// Metadata files written under `debian/`, in write order.
    pub metadata_files: Vec<Utf8PathBuf>,
    /// The built archive; `None` when the build was skipped.
    pub deb_path: Option<Utf8PathBuf>,
    /// SHA-256 of the built archive; `None` when the build was skipped.
    pub sha256: Option<String>,
}

/// A target package format.
pub trait PackagingPlatform {
    /// Clears previous staging state and ingests `artifacts`.
    ///
    /// Returns the archives that were unpacked.
    ///
    /// # Errors
    ///
    /// Returns the first staging or ingestion error.
    fn before_package(&mut self, artifacts: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>>;

    /// Writes metadata stamped with `now` and builds the package.
    ///
    /// # Errors
    ///
    /// Returns the first metadata or build error.
    fn package(&mut self, now: OffsetDateTime) -> Result<PackageOutcome>;
}

/// Builds a Debian binary package with `debuild`.
pub struct DebianPlatform<'a> {
    config: &'a PackagingConfig,
    executor: &'a dyn CommandExecutor,
    history: &'a dyn VersionHistory,
    unpacker: &'a dyn ArtifactUnpacker,
    staging: StagingArea,
    dirs: DirectoryStack,
    skip_build: bool,
}

impl<'a> DebianPlatform<'a> {
    /// Creates a platform staging under `dish`.
    #[must_use]
    pub fn new(
        config: &'a PackagingConfig,
        dish: &Utf8Path,
        executor: &'a dyn CommandExecutor,
        history: &'a dyn VersionHistory,
        unpacker: &'a dyn ArtifactUnpacker,
    ) -> Self {
        Self {
            config,
            executor,
            history,
            unpacker,
            staging: StagingArea::new(dish, config.package_dir_name()),
            dirs: DirectoryStack::new(),
            skip_build: false,
        }
    }

    /// Stops [`PackagingPlatform::package`] after the metadata is written.
    #[must_use]
    pub fn skip_build(mut self, skip: bool) -> Self {
        self.skip_build = skip;
        self
    }

    /// Returns the staging area.
    #[must_use]
    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }
}

impl PackagingPlatform for DebianPlatform<'_> {
    fn before_package(&mut self, artifacts: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
        info!("preparing {}", self.staging.dish());
        self.staging.clear()?;
        ingest(&self.staging, &mut self.dirs, artifacts, self.unpacker)
    }

    fn package(&mut self, now: OffsetDateTime) -> Result<PackageOutcome> {
        let metadata_files =
            MetadataWriter::new(self.config, &self.staging).write_all(self.history, now)?;
        let package_root = self.staging.package_root()?;

        if self.skip_build {
            info!("skipping build of {}", self.config.package_filename());
            return Ok(PackageOutcome {
                package_root,
                metadata_files,
                deb_path: None,
                sha256: None,
            });
        }

        let expected = self.staging.dish().join(self.config.package_filename());
        let output =
            DebuildInvoker::new(self.executor).build(&mut self.dirs, &package_root, &expected)?;
        Ok(PackageOutcome {
            package_root,
            metadata_files,
            deb_path: Some(output.deb_path),
            sha256: Some(output.sha256),
        })
    }
}
