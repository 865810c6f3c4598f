//! CLI argument definitions for the cellar packager.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::config::{DEFAULT_CONFIG_FILE, UnpackerKind};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Build the cellar Debian package.
#[derive(Parser, Debug, Default)]
#[command(name = "cellar-package")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build the cellar Debian package.\n\n",
    "Pre-built wheels are copied into a disposable containment dish, exploded in ",
    "place, described by a generated debian/ directory and handed to `debuild` ",
    "for an unsigned build. Package metadata is read from packaging.toml.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build from the wheels in dist/:\n",
    "    $ cellar-package\n\n",
    "  Build from explicit artifacts with the in-process unpacker:\n",
    "    $ cellar-package build --artifact dist/cellar-1.0-py3-none-any.whl --unpacker builtin\n\n",
    "  Stage and write metadata without running debuild:\n",
    "    $ cellar-package build --no-build\n\n",
    "  Print the control record:\n",
    "    $ cellar-package show control",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Build arguments (used when no subcommand is given).
    #[command(flatten)]
    pub build: BuildArgs,
}

impl Cli {
    /// Returns the build arguments in effect, from `build` or the top level.
    #[must_use]
    pub fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Some(Command::Build(args)) => args,
            _ => &self.build,
        }
    }

    /// Returns the log filter implied by the verbosity flags.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        let args = self.build_args();
        if args.quiet {
            return LevelFilter::Error;
        }
        match args.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Stage artifacts and build the package (default when no subcommand given).
    Build(BuildArgs),

    /// Print a rendered control record.
    Show(ShowArgs),
}

/// Arguments for the build command.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Packaging configuration file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: Utf8PathBuf,

    /// Directory searched for artifacts when none are given.
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub dist_dir: Utf8PathBuf,

    /// Artifact to package (can be repeated).
    #[arg(short, long, value_name = "FILE")]
    pub artifact: Vec<Utf8PathBuf>,

    /// Staging root [default: from configuration, else a temp directory].
    #[arg(long, value_name = "DIR")]
    pub containment_dish: Option<Utf8PathBuf>,

    /// Archive unpacker [default: from configuration].
    #[arg(long, value_enum)]
    pub unpacker: Option<UnpackerKind>,

    /// Do not check for required host tools.
    #[arg(long)]
    pub skip_preflight: bool,

    /// Show the resolved plan and exit without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop after writing metadata; do not run debuild.
    #[arg(long)]
    pub no_build: bool,

    /// Print the outcome as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Default for BuildArgs {
    /// Creates `BuildArgs` matching the command-line defaults.
    fn default() -> Self {
        Self {
            config: Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
            dist_dir: Utf8PathBuf::from("dist"),
            artifact: Vec::new(),
            containment_dish: None,
            unpacker: None,
            skip_preflight: false,
            dry_run: false,
            no_build: false,
            json: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

/// Records that `show` can print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// `debian/control`.
    Control,
    /// `debian/copyright`.
    Copyright,
    /// The `.dsc` source description.
    Dsc,
}

/// Arguments for the show command.
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Record to print.
    #[arg(value_enum)]
    pub record: Record,

    /// Packaging configuration file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: Utf8PathBuf,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
