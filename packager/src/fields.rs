//! Control-file field model.
//!
//! A [`Field`] is either a blank separator between stanzas or a named entry
//! whose value is text or a list. An ordered slice of fields renders to one
//! Debian control-style record; order and duplicates are kept as given.

use crate::error::{PackagerError, Result};
use std::fmt;

/// The value of a field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single text value, possibly with continuation lines.
    Text(String),
    /// A list of values, rendered comma-separated.
    List(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<&[String]> for FieldValue {
    fn from(items: &[String]) -> Self {
        Self::List(items.to_vec())
    }
}

/// One line-group of a control record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A blank line separating two stanzas.
    Separator,
    /// A `Name: value` entry.
    Entry {
        /// The field name.
        name: String,
        /// The field value.
        value: FieldValue,
    },
}

impl Field {
    /// Creates a named entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellar_packager::fields::Field;
    ///
    /// let field = Field::entry("Priority", "optional");
    /// assert_eq!(field.to_string(), "Priority: optional");
    /// ```
    #[must_use]
    pub fn entry(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::Entry {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Checks the entry against the control-file syntax.
    ///
    /// Names must be non-empty and free of `:` and whitespace; every line
    /// after the first in a value must be a continuation line starting with
    /// a space or tab.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MalformedField`] when either rule is broken.
    pub fn validate(&self) -> Result<()> {
        let Self::Entry { name, value } = self else {
            return Ok(());
        };

        if name.is_empty() {
            return Err(PackagerError::MalformedField {
                reason: "field name is empty".to_owned(),
            });
        }
        if name.contains(':') || name.chars().any(char::is_whitespace) {
            return Err(PackagerError::MalformedField {
                reason: format!("field name {name:?} contains ':' or whitespace"),
            });
        }

        let rendered = value.to_string();
        let bad_continuation = rendered
            .split('\n')
            .skip(1)
            .any(|line| !line.starts_with([' ', '\t']));
        if bad_continuation {
            return Err(PackagerError::MalformedField {
                reason: format!("value of {name} has a continuation line without leading space"),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separator => Ok(()),
            Self::Entry { name, value } => write!(f, "{name}: {value}"),
        }
    }
}

impl TryFrom<Vec<String>> for Field {
    type Error = PackagerError;

    /// Converts a loose `[name, value]` pair, as found in configuration.
    fn try_from(parts: Vec<String>) -> Result<Self> {
        let count = parts.len();
        let mut iter = parts.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (Some(name), Some(value), None) => {
                let field = Self::entry(name, value);
                field.validate()?;
                Ok(field)
            }
            _ => Err(PackagerError::MalformedField {
                reason: format!("expected exactly two components, found {count}"),
            }),
        }
    }
}

/// Renders an ordered field set to a control record.
///
/// Separators become empty lines; lines are joined with `\n` and no
/// trailing newline is added.
///
/// # Errors
///
/// Returns [`PackagerError::MalformedField`] if any entry fails
/// [`Field::validate`].
///
/// # Examples
///
/// ```
/// use cellar_packager::fields::{Field, render};
///
/// let record = render(&[
///     Field::entry("Source", "cellar"),
///     Field::Separator,
///     Field::entry("Depends", vec!["python3".to_owned(), "libgtk-3-0".to_owned()]),
/// ])?;
/// assert_eq!(record, "Source: cellar\n\nDepends: python3, libgtk-3-0");
/// # Ok::<(), cellar_packager::error::PackagerError>(())
/// ```
pub fn render(fields: &[Field]) -> Result<String> {
    let lines = fields
        .iter()
        .map(|field| field.validate().map(|()| field.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    #[test]
    fn render_keeps_order_and_duplicates() {
        let fields = vec![
            Field::entry("Maintainer", "A <a@example.org>"),
            Field::entry("Source", "cellar"),
            Field::Separator,
            Field::entry("Maintainer", "A <a@example.org>"),
        ];
        let record = render(&fields).expect("render");
        assert_eq!(
            record,
            "Maintainer: A <a@example.org>\nSource: cellar\n\nMaintainer: A <a@example.org>"
        );
    }

    #[rstest]
    #[case::entries_only(3, 0)]
    #[case::mixed(4, 2)]
    #[case::separators_only(0, 3)]
    fn render_emits_one_line_per_field(#[case] entries: usize, #[case] separators: usize) {
        let mut fields: Vec<Field> = (0..entries)
            .map(|index| Field::entry(format!("X-Field-{index}"), "value"))
            .collect();
        fields.extend(std::iter::repeat_n(Field::Separator, separators));

        let record = render(&fields).expect("render");
        let lines: Vec<&str> = record.split('\n').collect();

        assert_eq!(lines.len(), (entries + separators).max(1));
        let blank = lines.iter().filter(|line| line.is_empty()).count();
        if entries > 0 {
            assert_eq!(blank, separators);
        }
    }

    #[test]
    fn list_values_are_comma_joined() {
        let field = Field::entry("Build-Depends", owned(&["debhelper", "python3"]));
        assert_eq!(field.to_string(), "Build-Depends: debhelper, python3");
    }

    #[test]
    fn empty_field_set_renders_empty_record() {
        assert_eq!(render(&[]).expect("render"), "");
    }

    #[test]
    fn continuation_lines_are_accepted() {
        let field = Field::entry("Description", "Wine helper\n Generated by cellar-packager");
        assert!(field.validate().is_ok());
    }

    #[rstest]
    #[case::empty_name("", "value")]
    #[case::colon_in_name("Bad:Name", "value")]
    #[case::space_in_name("Bad Name", "value")]
    #[case::bare_continuation("Description", "first\nsecond")]
    fn malformed_entries_are_rejected(#[case] name: &str, #[case] value: &str) {
        let result = render(&[Field::entry(name, value)]);
        assert!(matches!(result, Err(PackagerError::MalformedField { .. })));
    }

    #[rstest]
    #[case::one(vec!["Suggests"])]
    #[case::three(vec!["Suggests", "winetricks", "extra"])]
    #[case::none(Vec::new())]
    fn loose_fields_require_two_components(#[case] parts: Vec<&str>) {
        let result = Field::try_from(owned(&parts));
        assert!(matches!(result, Err(PackagerError::MalformedField { .. })));
    }

    #[test]
    fn loose_pair_becomes_entry() {
        let field = Field::try_from(owned(&["Suggests", "winetricks"])).expect("pair");
        assert_eq!(field, Field::entry("Suggests", "winetricks"));
    }
}
