//! Build pipeline orchestration.
//!
//! Resolves command-line arguments against the configuration, checks the
//! host, and drives a [`DebianPlatform`] through `before_package` and
//! `package`. Progress goes to stderr unless `--quiet` is set.

use crate::cli::{BuildArgs, Record, ShowArgs};
use crate::config::{PackagingConfig, UnpackerKind};
use crate::error::{PackagerError, Result};
use crate::fields::render;
use crate::history::GitHistory;
use crate::ingest::{check_artifacts, discover};
use crate::output::{DryRunInfo, write_stderr_line, write_stdout_line};
use crate::platform::{DebianPlatform, PackageOutcome, PackagingPlatform};
use crate::preflight::check_host_tools;
use crate::records::{control_fields, copyright_fields, source_description_fields};
use crate::unpack::{ArtifactUnpacker, BuiltinUnpacker, UnzipCommand};
use camino::Utf8PathBuf;
use cellar_common::CommandExecutor;
use std::io::Write;
use time::OffsetDateTime;

/// Settings for one build, after CLI overrides are applied.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// The loaded configuration.
    pub config: PackagingConfig,
    /// Absolute containment dish.
    pub dish: Utf8PathBuf,
    /// Artifacts to ingest, in order.
    pub artifacts: Vec<Utf8PathBuf>,
    /// Unpacker to use.
    pub unpacker: UnpackerKind,
}

impl BuildPlan {
    /// Loads the configuration and resolves artifacts for `args`.
    ///
    /// Explicit `--artifact` paths win over discovery in `--dist-dir`.
    ///
    /// # Errors
    ///
    /// Returns configuration, discovery and artifact validation errors.
    pub fn resolve(args: &BuildArgs) -> Result<Self> {
        let config = PackagingConfig::load(&args.config)?;
        let dish = absolute(
            args.containment_dish
                .clone()
                .unwrap_or_else(|| config.containment_dish()),
        )?;
        let artifacts = if args.artifact.is_empty() {
            discover(&args.dist_dir, &config.debian.artifact_pattern)?
        } else {
            args.artifact.clone()
        };
        check_artifacts(&artifacts)?;
        let unpacker = args.unpacker.unwrap_or(config.debian.unpacker);

        Ok(Self {
            config,
            dish,
            artifacts,
            unpacker,
        })
    }

    /// Returns the package root the plan stages into.
    #[must_use]
    pub fn package_root(&self) -> Utf8PathBuf {
        self.dish.join(self.config.package_dir_name())
    }
}

fn absolute(path: Utf8PathBuf) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let absolute = std::path::absolute(&path)?;
    Utf8PathBuf::from_path_buf(absolute).map_err(|path| PackagerError::NonUtf8Path { path })
}

/// Runs a build, returning `None` for a dry run.
///
/// # Errors
///
/// Returns the first error from planning, preflight, staging, metadata or
/// the build itself.
pub fn run_build(
    args: &BuildArgs,
    executor: &dyn CommandExecutor,
    now: OffsetDateTime,
    stderr: &mut dyn Write,
) -> Result<Option<PackageOutcome>> {
    let plan = BuildPlan::resolve(args)?;
    let build = !args.no_build;

    if args.dry_run {
        let info = DryRunInfo {
            package_root: &plan.package_root(),
            package_filename: &plan.config.package_filename(),
            artifacts: &plan.artifacts,
            unpacker: plan.unpacker,
            build,
        };
        write_stderr_line(stderr, info.display_text());
        return Ok(None);
    }

    if !args.skip_preflight {
        check_host_tools(executor, plan.unpacker, build)?;
    }

    let history = GitHistory::new(executor);
    let unzip = UnzipCommand::new(executor);
    let unpacker: &dyn ArtifactUnpacker = match plan.unpacker {
        UnpackerKind::Unzip => &unzip,
        UnpackerKind::Builtin => &BuiltinUnpacker,
    };
    let mut platform = DebianPlatform::new(&plan.config, &plan.dish, executor, &history, unpacker)
        .skip_build(!build);

    progress(
        args,
        stderr,
        format!(
            "Staging {} artifact(s) in {}...",
            plan.artifacts.len(),
            plan.dish
        ),
    );
    platform.before_package(&plan.artifacts)?;

    progress(
        args,
        stderr,
        if build {
            format!("Building {}...", plan.config.package_filename())
        } else {
            "Writing debian metadata...".to_owned()
        },
    );
    let outcome = platform.package(now)?;
    Ok(Some(outcome))
}

fn progress(args: &BuildArgs, stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if !args.quiet && !args.json {
        write_stderr_line(stderr, message);
    }
}

/// Prints the record selected by `args` to `stdout`.
///
/// # Errors
///
/// Returns configuration, field and write errors.
pub fn run_show(args: &ShowArgs, now: OffsetDateTime, stdout: &mut dyn Write) -> Result<()> {
    let config = PackagingConfig::load(&args.config)?;
    write_stdout_line(stdout, render_record(&config, args.record, now.year())?)
}

/// Renders `record` for `config`.
///
/// # Errors
///
/// Returns [`PackagerError::MalformedField`] if a field is invalid.
pub fn render_record(config: &PackagingConfig, record: Record, current_year: i32) -> Result<String> {
    let fields = match record {
        Record::Control => control_fields(config)?,
        Record::Copyright => copyright_fields(config, current_year),
        Record::Dsc => source_description_fields(config),
    };
    render(&fields)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
