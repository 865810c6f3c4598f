//! Error types for the packaging pipeline.
//!
//! Every failure is fatal to the run: packaging steps propagate these
//! variants unchanged to the CLI, which prints them and exits non-zero.

use crate::unpack::UnpackError;
use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling or building the package.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The configuration file does not exist.
    #[error("configuration file not found at {path}")]
    ConfigNotFound {
        /// Path where the file was expected.
        path: Utf8PathBuf,
    },

    /// The configuration file could not be parsed or failed validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// A field set entry violates the control-file record format.
    #[error("malformed field: {reason}")]
    MalformedField {
        /// Description of the violation.
        reason: String,
    },

    /// No artifacts were supplied or discovered.
    #[error("no artifacts to package; build the distributables first")]
    NoArtifacts,

    /// An artifact path does not point at a regular file.
    #[error("artifact not found: {path}")]
    ArtifactNotFound {
        /// The missing artifact.
        path: Utf8PathBuf,
    },

    /// Two artifacts share a file name and would overwrite each other.
    #[error("duplicate artifact file name {name}")]
    DuplicateArtifact {
        /// The clashing file name.
        name: String,
    },

    /// The artifact glob pattern is invalid.
    #[error("invalid artifact pattern {pattern}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Description of the problem.
        reason: String,
    },

    /// Unpacking an artifact failed.
    #[error("failed to unpack {artifact}")]
    Unpack {
        /// The artifact being unpacked.
        artifact: Utf8PathBuf,
        /// The underlying unpack failure.
        #[source]
        source: UnpackError,
    },

    /// An external tool exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// The tool that failed.
        tool: &'static str,
        /// Summary of the tool's output.
        message: String,
    },

    /// A version-control query failed.
    #[error("git {operation} failed: {message}")]
    Git {
        /// The git operation that failed.
        operation: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// Required host tools are not installed.
    #[error("missing required host tools:\n{tools}")]
    MissingTools {
        /// One line per missing tool, with the package providing it.
        tools: String,
    },

    /// The build tool succeeded but the expected archive is absent.
    #[error("build finished but {path} was not produced")]
    BuildOutputMissing {
        /// Where the archive was expected.
        path: Utf8PathBuf,
    },

    /// Changing the working directory failed.
    #[error("cannot change directory to {}", .path.display())]
    ChangeDirectory {
        /// The directory that could not be entered.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `pop` was called with no matching `push`.
    #[error("directory stack is empty")]
    DirectoryStackEmpty,

    /// A filesystem path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// A staging filesystem operation failed.
    #[error("staging failed at {path}")]
    Staging {
        /// The path being created, copied or removed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Formatting the changelog timestamp failed.
    #[error("cannot format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Serialising the JSON summary failed.
    #[error("cannot serialise summary: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackagerError {
    /// Wraps an I/O error raised while working on `path`.
    pub(crate) fn staging(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Staging {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
