//! Locale and time-zone validation.
//!
//! The engine never decides on its own whether a string names a locale. It
//! asks a [`LocaleCatalog`], which the caller picks: [`StaticCatalog`] checks
//! membership in an explicit list (the bundled list by default), while
//! [`WellFormedCatalog`] accepts anything that parses as a Unicode language
//! identifier.

use std::str::FromStr;

use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

const BUILTIN_LOCALES: &str = include_str!("../data/locales.txt");
const BUILTIN_TIME_ZONES: &str = include_str!("../data/time_zones.txt");

static BUILTIN: Lazy<StaticCatalog> = Lazy::new(|| {
    StaticCatalog::new(
        data_lines(BUILTIN_LOCALES),
        data_lines(BUILTIN_TIME_ZONES),
    )
});

/// Validates locale and time-zone identifiers.
pub trait LocaleCatalog {
    /// Whether `locale` is a recognised locale identifier.
    fn is_known_locale(&self, locale: &str) -> bool;

    /// Whether `zone` is a recognised time-zone identifier.
    fn is_known_time_zone(&self, zone: &str) -> bool;
}

/// A catalog backed by explicit, exact-match identifier lists.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticCatalog {
    locales: Vec<String>,
    time_zones: Vec<String>,
}

impl StaticCatalog {
    /// Build a catalog from locale and time-zone identifiers.
    ///
    /// ```
    /// use treelingo_engine::{LocaleCatalog, StaticCatalog};
    ///
    /// let catalog = StaticCatalog::new(["de", "en_US"], ["Europe/Berlin"]);
    /// assert!(catalog.is_known_locale("en_US"));
    /// assert!(!catalog.is_known_locale("en-US"));
    /// assert!(catalog.is_known_time_zone("Europe/Berlin"));
    /// ```
    #[must_use]
    pub fn new<L, Z>(locales: L, time_zones: Z) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        Z: IntoIterator,
        Z::Item: Into<String>,
    {
        Self {
            locales: sorted(locales),
            time_zones: sorted(time_zones),
        }
    }

    /// Build a catalog that knows the given locales and no time zones.
    #[must_use]
    pub fn from_locales<L>(locales: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self::new(locales, Vec::<String>::new())
    }

    /// The catalog bundled with the engine: ICU-style locale identifiers
    /// (`de`, `de_AT`, `zh_Hant_TW`, ...) and IANA time-zone names.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Sorted slice of known locale identifiers.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Sorted slice of known time-zone identifiers.
    #[must_use]
    pub fn time_zones(&self) -> &[String] {
        &self.time_zones
    }
}

impl LocaleCatalog for StaticCatalog {
    fn is_known_locale(&self, locale: &str) -> bool {
        contains(&self.locales, locale)
    }

    fn is_known_time_zone(&self, zone: &str) -> bool {
        contains(&self.time_zones, zone)
    }
}

/// Accepts any well-formed Unicode language identifier.
///
/// Both `_` and `-` separators are accepted, so `en_US` and `en-US` are each
/// valid. Time zones are accepted when they read `UTC` or `Area/Location`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WellFormedCatalog;

impl LocaleCatalog for WellFormedCatalog {
    fn is_known_locale(&self, locale: &str) -> bool {
        !locale.is_empty() && LanguageIdentifier::from_str(locale).is_ok()
    }

    fn is_known_time_zone(&self, zone: &str) -> bool {
        if zone == "UTC" {
            return true;
        }
        let mut segments = zone.split('/');
        let area = segments.next().unwrap_or_default();
        let locations: Vec<&str> = segments.collect();
        is_zone_segment(area)
            && !locations.is_empty()
            && locations.iter().all(|segment| is_zone_segment(segment))
    }
}

fn is_zone_segment(segment: &str) -> bool {
    segment.starts_with(|character: char| character.is_ascii_alphabetic())
        && segment
            .chars()
            .all(|character| {
                character.is_ascii_alphanumeric() || matches!(character, '_' | '-' | '+')
            })
}

fn data_lines(raw: &'static str) -> impl Iterator<Item = &'static str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn sorted<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut values: Vec<String> = items.into_iter().map(Into::into).collect();
    values.sort_unstable();
    values.dedup();
    values
}

fn contains(sorted: &[String], candidate: &str) -> bool {
    sorted
        .binary_search_by(|entry| entry.as_str().cmp(candidate))
        .is_ok()
}
