//! `debian/changelog` rendering.

use crate::config::PackagingConfig;
use crate::error::Result;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

/// Renders a single changelog entry.
///
/// The entry has a header, a blank line, one bullet per summary, another
/// blank line and the maintainer trailer stamped with `now`. Every line,
/// including the last, ends with `\n`.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::Timestamp`] if `now` cannot be
/// expressed in RFC 2822 (years before 1900).
pub fn render_changelog(
    config: &PackagingConfig,
    summaries: &[String],
    now: OffsetDateTime,
) -> Result<String> {
    let package = &config.package;
    let debian = &config.debian;

    let mut text = format!(
        "{} ({}) {}; urgency={}\n\n",
        package.name, package.version, debian.distribution, debian.urgency
    );
    for summary in summaries {
        text.push_str("  * ");
        text.push_str(summary);
        text.push('\n');
    }
    text.push('\n');
    text.push_str(&format!(
        " -- {}  {}\n",
        config.maintainer(),
        now.format(&Rfc2822)?
    ));
    Ok(text)
}
