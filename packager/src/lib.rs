//! Debian packaging pipeline for cellar.
//!
//! The pipeline stages pre-built artifacts into a disposable containment
//! dish, writes the `debian/` metadata files and runs `debuild` for an
//! unsigned build:
//!
//! 1. [`platform::PackagingPlatform::before_package`] clears the dish and
//!    ingests the artifacts, exploding each archive under `packages/`.
//! 2. [`platform::PackagingPlatform::package`] runs the
//!    [`metadata::MetadataWriter`]s in a fixed order and invokes the
//!    [`build::DebuildInvoker`].
//!
//! Subprocesses run through [`cellar_common::CommandExecutor`] so tests can
//! script them, and every working-directory change goes through a
//! [`dir_stack::DirectoryStack`].

pub mod build;
pub mod cli;
pub mod config;
pub mod dir_stack;
pub mod error;
pub mod fields;
pub mod history;
pub mod ingest;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod platform;
pub mod preflight;
pub mod records;
pub mod staging;
pub mod unpack;

#[cfg(test)]
mod test_helpers;
