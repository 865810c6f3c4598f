//! Error types for launcher lookup and execution.
//!
//! A launcher that is not installed is not an error; lookups report it as
//! `None` and the run functions as `Ok(false)`.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or running a launcher.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// No default Wine prefix location could be derived for this user.
    #[error("could not determine the data directory for the default Wine prefix")]
    NoDataDir,

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The versions directory could not be scanned.
    #[error("failed to scan {path}")]
    Scan {
        /// The directory being scanned.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Wine could not be spawned.
    #[error("failed to run {tool}")]
    Spawn {
        /// The command that could not be started.
        tool: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The executable ran but exited unsuccessfully.
    #[error("{exe} failed under {tool}: {message}")]
    ToolFailed {
        /// The Wine command used.
        tool: String,
        /// The Windows executable that was run.
        exe: Utf8PathBuf,
        /// Summary of the tool's output.
        message: String,
    },
}

/// Result type for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
