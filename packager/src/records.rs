//! Field sets for the Debian control records.
//!
//! Each function builds the ordered [`Field`] list for one record from the
//! configuration. The `Maintainer` and `Source` entries appear in several
//! sets; rendering keeps every occurrence.

use crate::config::{DESCRIPTION_FOOTER, PackagingConfig};
use crate::error::Result;
use crate::fields::Field;

/// DEP-5 machine-readable copyright format URL.
pub const COPYRIGHT_FORMAT: &str =
    "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";

/// Builds the `debian/control` field set: source stanza, separator, binary
/// stanza, then any configured extra fields.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::MalformedField`] if an extra field
/// from configuration is invalid.
pub fn control_fields(config: &PackagingConfig) -> Result<Vec<Field>> {
    let package = &config.package;
    let debian = &config.debian;

    let mut fields = vec![
        Field::entry("Source", package.name.as_str()),
        Field::entry("Section", debian.section.as_str()),
        Field::entry("Priority", debian.priority.as_str()),
        Field::entry("Maintainer", config.maintainer()),
        Field::entry("Build-Depends", debian.build_depends.as_slice()),
        Field::entry("Standards-Version", debian.standards_version.as_str()),
        Field::Separator,
        Field::entry("Package", package.name.as_str()),
        Field::entry("Architecture", debian.architecture.as_str()),
        Field::entry("Depends", debian.depends.as_slice()),
        Field::entry("Homepage", package.repository.as_str()),
        Field::entry(
            "Description",
            format!("{}\n{DESCRIPTION_FOOTER}", package.description),
        ),
    ];
    fields.extend(config.extra_control_fields()?);
    Ok(fields)
}

/// Builds the `debian/copyright` field set for `current_year`.
#[must_use]
pub fn copyright_fields(config: &PackagingConfig, current_year: i32) -> Vec<Field> {
    let package = &config.package;
    vec![
        Field::entry("Format", COPYRIGHT_FORMAT),
        Field::entry("Upstream-Name", config.project_name()),
        Field::entry("Upstream-Contact", config.maintainer()),
        Field::entry("Source", package.repository.as_str()),
        Field::Separator,
        Field::entry("Files", "*"),
        Field::entry(
            "Copyright",
            format!(
                "{} {}",
                copyright_years(config, current_year),
                package.author_name
            ),
        ),
        Field::entry("License", package.license.as_str()),
    ]
}

/// Returns `"<start>-<current>"`, or just the year when they coincide.
fn copyright_years(config: &PackagingConfig, current_year: i32) -> String {
    let start = config.debian.copyright_start_year;
    if start < current_year {
        format!("{start}-{current_year}")
    } else {
        current_year.to_string()
    }
}

/// Builds the `.dsc` source description field set.
#[must_use]
pub fn source_description_fields(config: &PackagingConfig) -> Vec<Field> {
    let package = &config.package;
    let debian = &config.debian;
    vec![
        Field::entry("Format", "1.0"),
        Field::entry("Source", package.name.as_str()),
        Field::entry("Binary", package.name.as_str()),
        Field::entry("Architecture", debian.architecture.as_str()),
        Field::entry("Version", config.package_version()),
        Field::entry("Maintainer", config.maintainer()),
        Field::entry("Standards-Version", debian.standards_version.as_str()),
        Field::entry("Build-Depends", debian.build_depends.as_slice()),
        Field::entry(
            "Package-List",
            format!(
                "\n {} deb {} {} arch={}",
                package.name, debian.section, debian.priority, debian.architecture
            ),
        ),
    ]
}
