//! Packaging configuration.
//!
//! `packaging.toml` holds the single source of truth for the package:
//! upstream metadata under `[package]` and Debian-specific settings under
//! `[debian]`. It is read once, validated, and then passed by reference to
//! every pipeline component. Derived strings (maintainer, package version,
//! archive name) are computed from it on demand and never stored.

use crate::error::{PackagerError, Result};
use crate::fields::Field;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Default name of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "packaging.toml";

/// Continuation line appended to the control `Description`.
pub const DESCRIPTION_FOOTER: &str = " Generated by cellar-packager";

/// First copyright year when `copyright_start_year` is not configured.
pub const DEFAULT_COPYRIGHT_START_YEAR: i32 = 2019;

/// Complete packaging configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackagingConfig {
    /// Upstream package metadata.
    pub package: PackageMetadata,
    /// Debian packaging settings.
    #[serde(default)]
    pub debian: DebianSettings,
}

/// Upstream metadata describing what is being packaged.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackageMetadata {
    /// Debian package name.
    pub name: String,
    /// Upstream version.
    pub version: String,
    /// Author display name.
    pub author_name: String,
    /// Author e-mail address.
    pub author_email: String,
    /// License identifier written to `debian/copyright`.
    pub license: String,
    /// One-line package description.
    pub description: String,
    /// Project homepage or repository URL.
    pub repository: String,
    /// Human-facing project name; defaults to `name`.
    #[serde(default)]
    pub project_name: Option<String>,
}

/// How artifacts are unpacked into the staging area.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnpackerKind {
    /// Shell out to `unzip`.
    #[default]
    Unzip,
    /// Extract in-process (zip, tar.gz and tar.zst archives).
    Builtin,
}

/// Debian packaging settings. Every key is optional.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DebianSettings {
    /// Target architecture.
    pub architecture: String,
    /// Debian policy version the package complies with.
    pub standards_version: String,
    /// debhelper compatibility level written to `debian/compat`.
    pub compat: u32,
    /// Directory the exploded artifacts are installed into.
    pub install_prefix: String,
    /// Archive section.
    pub section: String,
    /// Package priority.
    pub priority: String,
    /// Changelog distribution.
    pub distribution: String,
    /// Changelog urgency.
    pub urgency: String,
    /// Source package build dependencies.
    pub build_depends: Vec<String>,
    /// Binary package runtime dependencies.
    pub depends: Vec<String>,
    /// First year of the copyright range.
    pub copyright_start_year: i32,
    /// Branch the changelog history is measured against.
    pub reference_branch: String,
    /// Root staging directory; `<temp>/<name>-debian` when absent.
    pub containment_dish: Option<Utf8PathBuf>,
    /// Glob pattern used to discover artifacts in the dist directory.
    pub artifact_pattern: String,
    /// Artifact unpacker.
    pub unpacker: UnpackerKind,
    /// Additional `[name, value]` control entries for the binary stanza.
    pub extra_control_fields: Vec<Vec<String>>,
}

impl Default for DebianSettings {
    fn default() -> Self {
        Self {
            architecture: "amd64".to_owned(),
            standards_version: "3.9.6".to_owned(),
            compat: 10,
            install_prefix: "/usr/lib/python3/dist-packages".to_owned(),
            section: "python".to_owned(),
            priority: "optional".to_owned(),
            distribution: "unstable".to_owned(),
            urgency: "medium".to_owned(),
            build_depends: to_owned_list(&[
                "debhelper",
                "python3",
                "python3-pip",
                "python3-virtualenv",
            ]),
            depends: to_owned_list(&[
                "python3 (>= 3.7~)",
                "python3-certifi",
                "python3-dbus",
                "python3-packaging",
                "python3-psutil",
                "python3-urllib3",
                "python3-wget",
                "python3-gi",
                "libcairo2",
                "libgirepository-1.0-1",
                "libgtk-3-0",
                "libgtk-3-bin",
                "libdbus-1-3",
            ]),
            copyright_start_year: DEFAULT_COPYRIGHT_START_YEAR,
            reference_branch: "master".to_owned(),
            containment_dish: None,
            artifact_pattern: "*.whl".to_owned(),
            unpacker: UnpackerKind::default(),
            extra_control_fields: Vec::new(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

impl PackagingConfig {
    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ConfigNotFound`] if the file is missing and
    /// [`PackagerError::InvalidConfig`] if it cannot be parsed or validated.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PackagerError::ConfigNotFound {
                path: path.to_owned(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::InvalidConfig`] on parse or validation
    /// failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellar_packager::config::PackagingConfig;
    ///
    /// let config = PackagingConfig::from_toml_str(r#"
    ///     [package]
    ///     name = "app"
    ///     version = "1.0"
    ///     author_name = "Ada"
    ///     author_email = "ada@example.org"
    ///     license = "GPL-3.0"
    ///     description = "Example"
    ///     repository = "https://example.org/app"
    /// "#)?;
    /// assert_eq!(config.package_dir_name(), "app_1.0_amd64");
    /// assert_eq!(config.maintainer(), "Ada <ada@example.org>");
    /// # Ok::<(), cellar_packager::error::PackagerError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| PackagerError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the Debian tooling would reject later.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::InvalidConfig`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        let package = &self.package;

        if !is_valid_package_name(&package.name) {
            return invalid(format!(
                "package name {:?} must be at least two characters of [a-z0-9+.-] starting with a letter or digit",
                package.name
            ));
        }
        if package.version.is_empty()
            || package.version.contains('_')
            || package.version.chars().any(char::is_whitespace)
        {
            return invalid(format!(
                "version {:?} must be non-empty without '_' or whitespace",
                package.version
            ));
        }
        if !package.author_email.contains('@') {
            return invalid(format!(
                "author_email {:?} is not an e-mail address",
                package.author_email
            ));
        }
        if package.description.trim().is_empty() || package.description.contains('\n') {
            return invalid("description must be a single non-empty line".to_owned());
        }

        let debian = &self.debian;
        if debian.architecture.is_empty() || debian.architecture.chars().any(char::is_whitespace)
        {
            return invalid(format!(
                "architecture {:?} must be a single word",
                debian.architecture
            ));
        }
        if debian.reference_branch.trim().is_empty() {
            return invalid("reference_branch must not be empty".to_owned());
        }

        self.extra_control_fields()
            .map(drop)
            .map_err(|e| PackagerError::InvalidConfig {
                reason: format!("extra_control_fields: {e}"),
            })
    }

    /// Returns `"<author_name> <<author_email>>"`.
    #[must_use]
    pub fn maintainer(&self) -> String {
        format!("{} <{}>", self.package.author_name, self.package.author_email)
    }

    /// Returns `"<version>_<arch>"`.
    #[must_use]
    pub fn package_version(&self) -> String {
        format!("{}_{}", self.package.version, self.debian.architecture)
    }

    /// Returns the package root directory name, `"<name>_<version>_<arch>"`.
    #[must_use]
    pub fn package_dir_name(&self) -> String {
        format!("{}_{}", self.package.name, self.package_version())
    }

    /// Returns the archive file name `debuild` produces.
    #[must_use]
    pub fn package_filename(&self) -> String {
        format!("{}.deb", self.package_dir_name())
    }

    /// Returns the upstream project name.
    #[must_use]
    pub fn project_name(&self) -> &str {
        self.package
            .project_name
            .as_deref()
            .unwrap_or(&self.package.name)
    }

    /// Returns the containment dish, falling back to the system temp dir.
    #[must_use]
    pub fn containment_dish(&self) -> Utf8PathBuf {
        if let Some(dish) = &self.debian.containment_dish {
            return dish.clone();
        }
        let temp = Utf8PathBuf::from_path_buf(std::env::temp_dir())
            .unwrap_or_else(|_| Utf8PathBuf::from("/tmp"));
        temp.join(format!("{}-debian", self.package.name))
    }

    /// Converts the configured extra control entries into fields.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MalformedField`] if an entry is not a valid
    /// `[name, value]` pair.
    pub fn extra_control_fields(&self) -> Result<Vec<Field>> {
        self.debian
            .extra_control_fields
            .iter()
            .cloned()
            .map(Field::try_from)
            .collect()
    }
}

fn invalid(reason: String) -> Result<()> {
    Err(PackagerError::InvalidConfig { reason })
}

fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() >= 2
        && (first.is_ascii_lowercase() || first.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
