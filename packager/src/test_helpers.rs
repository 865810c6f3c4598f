//! Shared fixtures for unit tests.

use crate::config::PackagingConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::TempDir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serialises tests that change the process working directory.
pub(crate) fn lock_cwd() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Creates a temporary directory and returns it with its canonical UTF-8
/// path.
pub(crate) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let canonical = temp.path().canonicalize().expect("canonicalize tempdir");
    let path = Utf8PathBuf::from_path_buf(canonical).expect("utf8 tempdir");
    (temp, path)
}

/// Writes a zip archive at `path` holding one small file per entry name.
pub(crate) fn write_wheel(path: &Utf8Path, entries: &[&str]) {
    let file = std::fs::File::create(path).expect("create wheel");
    let mut writer = zip::ZipWriter::new(file);
    for entry in entries {
        writer
            .start_file(*entry, zip::write::SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(b"# generated\n").expect("write entry");
    }
    writer.finish().expect("finish wheel");
}

/// Returns a configuration for `app 1.0` staged under `dish`.
pub(crate) fn sample_config(dish: &Utf8Path) -> PackagingConfig {
    let mut config = PackagingConfig::from_toml_str(
        r#"
        [package]
        name = "app"
        version = "1.0"
        author_name = "Ada Lovelace"
        author_email = "ada@example.org"
        license = "GPL-3.0"
        description = "Wine prefix helper"
        repository = "https://example.org/app"
        "#,
    )
    .expect("sample config parses");
    config.debian.containment_dish = Some(dish.to_owned());
    config
}
