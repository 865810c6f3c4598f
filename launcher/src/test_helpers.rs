//! Shared fixtures for launcher unit tests.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(crate) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 tempdir");
    (temp, path)
}

/// Creates `<versions>/<build>/<exe>` and returns its path.
pub(crate) fn install(versions: &Utf8Path, build: &str, exe: &str) -> Utf8PathBuf {
    let dir = versions.join(build);
    std::fs::create_dir_all(&dir).expect("create build dir");
    let path = dir.join(exe);
    std::fs::write(&path, b"MZ").expect("write launcher");
    path
}
