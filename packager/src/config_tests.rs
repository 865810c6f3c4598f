//! Unit tests for packaging configuration.

use super::*;
use rstest::{fixture, rstest};
use std::io::Write as _;

const MINIMAL: &str = r#"
[package]
name = "app"
version = "1.0"
author_name = "Ada Lovelace"
author_email = "ada@example.org"
license = "GPL-3.0"
description = "Wine prefix helper"
repository = "https://example.org/app"
"#;

#[fixture]
fn minimal() -> PackagingConfig {
    PackagingConfig::from_toml_str(MINIMAL).expect("minimal config parses")
}

#[rstest]
fn debian_defaults_apply(minimal: PackagingConfig) {
    let debian = &minimal.debian;
    assert_eq!(debian.architecture, "amd64");
    assert_eq!(debian.standards_version, "3.9.6");
    assert_eq!(debian.compat, 10);
    assert_eq!(debian.install_prefix, "/usr/lib/python3/dist-packages");
    assert_eq!(debian.reference_branch, "master");
    assert_eq!(debian.unpacker, UnpackerKind::Unzip);
    assert_eq!(debian.build_depends.first().map(String::as_str), Some("debhelper"));
    assert!(debian.depends.contains(&"libgtk-3-0".to_owned()));
}

#[rstest]
fn default_copyright_spans_start_to_current_year(minimal: PackagingConfig) {
    assert_eq!(minimal.debian.copyright_start_year, DEFAULT_COPYRIGHT_START_YEAR);
    let fields = crate::records::copyright_fields(&minimal, 2026);
    assert!(fields.contains(&Field::entry("Copyright", "2019-2026 Ada Lovelace")));
}

#[rstest]
fn version_descriptor_is_derived(minimal: PackagingConfig) {
    assert_eq!(minimal.maintainer(), "Ada Lovelace <ada@example.org>");
    assert_eq!(minimal.package_version(), "1.0_amd64");
    assert_eq!(minimal.package_dir_name(), "app_1.0_amd64");
    assert_eq!(minimal.package_filename(), "app_1.0_amd64.deb");
    assert_eq!(minimal.project_name(), "app");
}

#[rstest]
fn architecture_flows_into_descriptor(mut minimal: PackagingConfig) {
    minimal.debian.architecture = "arm64".to_owned();
    assert_eq!(minimal.package_filename(), "app_1.0_arm64.deb");
}

#[rstest]
fn containment_dish_defaults_under_temp(minimal: PackagingConfig) {
    let dish = minimal.containment_dish();
    assert_eq!(dish.file_name(), Some("app-debian"));
}

#[test]
fn debian_overrides_are_read() {
    let text = format!(
        "{MINIMAL}\n[debian]\narchitecture = \"i386\"\nunpacker = \"builtin\"\n\
         containment_dish = \"/srv/dish\"\nextra_control_fields = [[\"Suggests\", \"winetricks\"]]\n"
    );
    let config = PackagingConfig::from_toml_str(&text).expect("config parses");
    assert_eq!(config.debian.architecture, "i386");
    assert_eq!(config.debian.unpacker, UnpackerKind::Builtin);
    assert_eq!(config.containment_dish(), Utf8PathBuf::from("/srv/dish"));
    assert_eq!(
        config.extra_control_fields().expect("fields"),
        vec![Field::entry("Suggests", "winetricks")]
    );
}

#[rstest]
#[case::uppercase_name("name = \"app\"", "name = \"App\"")]
#[case::short_name("name = \"app\"", "name = \"a\"")]
#[case::underscore_version("version = \"1.0\"", "version = \"1_0\"")]
#[case::bad_email("author_email = \"ada@example.org\"", "author_email = \"ada\"")]
#[case::empty_description("description = \"Wine prefix helper\"", "description = \" \"")]
fn invalid_values_are_rejected(#[case] from: &str, #[case] to: &str) {
    let text = MINIMAL.replace(from, to);
    let result = PackagingConfig::from_toml_str(&text);
    assert!(matches!(result, Err(PackagerError::InvalidConfig { .. })));
}

#[test]
fn unknown_keys_are_rejected() {
    let text = format!("{MINIMAL}\n[debian]\nflavour = \"sid\"\n");
    let result = PackagingConfig::from_toml_str(&text);
    assert!(matches!(result, Err(PackagerError::InvalidConfig { .. })));
}

#[test]
fn malformed_extra_field_is_invalid_config() {
    let text = format!("{MINIMAL}\n[debian]\nextra_control_fields = [[\"Suggests\"]]\n");
    let err = PackagingConfig::from_toml_str(&text).expect_err("arity check");
    assert!(err.to_string().contains("extra_control_fields"));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("packaging.toml")).expect("utf8");
    let result = PackagingConfig::load(&path);
    assert!(matches!(result, Err(PackagerError::ConfigNotFound { .. })));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(MINIMAL.as_bytes()).expect("write config");
    let path = Utf8Path::from_path(file.path()).expect("utf8");
    let config = PackagingConfig::load(path).expect("load");
    assert_eq!(config.package.name, "app");
}
