//! Output formatting for the listing commands.

/// Marker appended to the locale that lookups currently resolve to.
pub const ACTIVE_MARKER: &str = " (active)";

/// Format loaded locale names, one per line, marking `active`.
///
/// # Examples
///
/// ```
/// use treelingo_cli::output::format_locales;
///
/// let output = format_locales(["de", "en"], Some("en"));
/// assert_eq!(output, "de\nen (active)\n");
/// ```
#[must_use]
pub fn format_locales<'a>(
    names: impl IntoIterator<Item = &'a str>,
    active: Option<&str>,
) -> String {
    let mut output = String::new();
    for name in names {
        output.push_str(name);
        if active == Some(name) {
            output.push_str(ACTIVE_MARKER);
        }
        output.push('\n');
    }

    if output.is_empty() {
        output.push_str("No translations loaded.\n");
    }
    output
}

/// Format key paths one per line.
#[must_use]
pub fn format_keys(keys: &[String]) -> String {
    keys.iter().fold(String::new(), |mut output, key| {
        output.push_str(key);
        output.push('\n');
        output
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::marks_active(&["cy", "de"], Some("de"), "cy\nde (active)\n")]
    #[case::nothing_active(&["cy", "de"], None, "cy\nde\n")]
    #[case::empty(&[], Some("de"), "No translations loaded.\n")]
    fn formats_locales(
        #[case] names: &[&str],
        #[case] active: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(format_locales(names.iter().copied(), active), expected);
    }

    #[rstest]
    fn formats_keys_one_per_line() {
        let keys = vec!["nav.home".to_owned(), "title".to_owned()];

        assert_eq!(format_keys(&keys), "nav.home\ntitle\n");
        assert_eq!(format_keys(&[]), "");
    }
}
