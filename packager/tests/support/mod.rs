//! Test support utilities for packager behavioural tests.
//!
//! This module provides project fixtures shared by the behaviour suites: a
//! minimal `packaging.toml`, wheel archives, and an executor that stands in
//! for `git` and `debuild`.

use camino::{Utf8Path, Utf8PathBuf};
use cellar_common::CommandExecutor;
use cellar_common::test_support::{ExpectedCall, StubExecutor, stdout_output};
use std::io::{self, Write as _};
use std::path::Path;
use std::process::Output;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::TempDir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serialises scenarios that change the process working directory.
pub fn lock_cwd() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Creates a temporary directory and returns it with its canonical UTF-8
/// path.
pub fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let canonical = temp.path().canonicalize().expect("canonicalize tempdir");
    let path = Utf8PathBuf::from_path_buf(canonical).expect("utf8 tempdir");
    (temp, path)
}

/// Writes `packaging.toml` for `name`/`version` staging under `dish`.
pub fn write_config(root: &Utf8Path, name: &str, version: &str, dish: &Utf8Path) -> Utf8PathBuf {
    let path = root.join("packaging.toml");
    let contents = format!(
        r#"[package]
name = "{name}"
version = "{version}"
author_name = "Ada Lovelace"
author_email = "ada@example.org"
license = "GPL-3.0"
description = "Wine prefix helper"
repository = "https://example.org/{name}"

[debian]
containment_dish = "{dish}"
unpacker = "builtin"
"#
    );
    std::fs::write(&path, contents).expect("write config");
    path
}

/// Writes a wheel at `path` containing `<package>/__init__.py` and a
/// `dist-info` directory.
pub fn write_wheel(path: &Utf8Path, package: &str) {
    let file = std::fs::File::create(path).expect("create wheel");
    let mut writer = zip::ZipWriter::new(file);
    for entry in [
        format!("{package}/__init__.py"),
        format!("{package}-1.0.dist-info/METADATA"),
    ] {
        writer
            .start_file(entry, zip::write::SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(b"# generated\n").expect("write entry");
    }
    writer.finish().expect("finish wheel");
}

/// Expected `git` calls for a history with the given shortlog output.
pub fn git_calls(branch: &str, shortlog: &str) -> Vec<ExpectedCall> {
    vec![
        ExpectedCall::new("git", ["rev-parse", "--abbrev-ref", "HEAD"])
            .returning(stdout_output(&format!("{branch}\n"))),
        ExpectedCall::new("git", ["shortlog".to_owned(), format!("master...{branch}")])
            .returning(stdout_output(shortlog)),
    ]
}

/// Stub executor that writes `../<archive_name>` when `debuild` succeeds.
pub struct FakeDebuild {
    /// The scripted executor that records every call.
    pub inner: StubExecutor,
    archive_name: String,
}

impl FakeDebuild {
    /// Wraps `inner`, producing `archive_name` on a successful build.
    pub fn new(inner: StubExecutor, archive_name: &str) -> Self {
        Self {
            inner,
            archive_name: archive_name.to_owned(),
        }
    }
}

impl CommandExecutor for FakeDebuild {
    fn run_with_env(&self, cmd: &str, args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
        let output = self.inner.run_with_env(cmd, args, env)?;
        if cmd == "debuild" && output.status.success() {
            std::fs::write(Path::new("..").join(&self.archive_name), b"!<arch>\n")?;
        }
        Ok(output)
    }
}
