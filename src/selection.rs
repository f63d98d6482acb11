//! Choosing the initial current locale.
//!
//! Explicit and configured locales are requests: an identifier the catalog
//! does not know fails with [`I18nError::InvalidLocale`]. The environment
//! variable is ambient, so an unknown value there is only logged and the
//! next candidate is tried.

use std::env;
use std::fmt;

use log::{debug, warn};
use treelingo_engine::{I18nError, LocaleCatalog, LocaleId};

use crate::config::LOCALE_ENV_VAR;

/// Where the initial current locale came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocaleSource {
    /// Locale supplied explicitly by the caller.
    ExplicitArgument,
    /// Locale read from the `TREELINGO_LOCALE` environment variable.
    EnvironmentVariable,
    /// Locale taken from `treelingo.toml`.
    Configuration,
    /// No candidate applied; the default locale is used.
    Default,
}

impl LocaleSource {
    /// Whether an unknown locale from this source is skipped rather than
    /// reported.
    #[must_use]
    pub const fn is_best_effort(self) -> bool {
        matches!(self, Self::EnvironmentVariable)
    }
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitArgument => formatter.write_str("explicit locale"),
            Self::EnvironmentVariable => formatter.write_str(LOCALE_ENV_VAR),
            Self::Configuration => formatter.write_str("configured locale"),
            Self::Default => formatter.write_str("default locale"),
        }
    }
}

/// The chosen initial locale and its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleSelection {
    locale: LocaleId,
    source: LocaleSource,
}

impl LocaleSelection {
    const fn new(locale: LocaleId, source: LocaleSource) -> Self {
        Self { locale, source }
    }

    /// Returns where the locale came from.
    #[must_use]
    pub const fn source(&self) -> LocaleSource {
        self.source
    }

    /// Returns the selected locale.
    #[must_use]
    pub const fn locale(&self) -> &LocaleId {
        &self.locale
    }

    /// Whether no candidate was supplied.
    #[must_use]
    pub fn used_default(&self) -> bool {
        self.source == LocaleSource::Default
    }
}

/// The raw locale candidates, highest priority first.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocaleCandidates<'a> {
    /// Locale requested by the caller.
    pub explicit: Option<&'a str>,
    /// Value of `TREELINGO_LOCALE`.
    pub environment: Option<&'a str>,
    /// The `locale` entry of `treelingo.toml`.
    pub configuration: Option<&'a str>,
}

impl<'a> LocaleCandidates<'a> {
    const fn ordered(self) -> [(LocaleSource, Option<&'a str>); 3] {
        [
            (LocaleSource::ExplicitArgument, self.explicit),
            (LocaleSource::EnvironmentVariable, self.environment),
            (LocaleSource::Configuration, self.configuration),
        ]
    }
}

/// Select the initial current locale.
///
/// Blank candidates count as absent. The first remaining candidate wins,
/// except that an unknown `TREELINGO_LOCALE` value is skipped with a
/// warning. `default` is used when nothing applies.
///
/// # Errors
///
/// Returns [`I18nError::InvalidLocale`] when the explicit or configured
/// locale is unknown to `catalog`.
///
/// ```
/// use treelingo::{LocaleCandidates, LocaleSource, select_locale};
/// use treelingo_engine::{LocaleId, StaticCatalog};
///
/// let catalog = StaticCatalog::from_locales(["de", "fr"]);
/// let default = LocaleId::parse("de", &catalog)?;
/// let candidates = LocaleCandidates {
///     environment: Some("xx"),
///     configuration: Some("fr"),
///     ..LocaleCandidates::default()
/// };
///
/// let selection = select_locale(candidates, &default, &catalog)?;
/// assert_eq!(selection.source(), LocaleSource::Configuration);
/// # Ok::<(), treelingo_engine::I18nError>(())
/// ```
pub fn select_locale(
    candidates: LocaleCandidates<'_>,
    default: &LocaleId,
    catalog: &dyn LocaleCatalog,
) -> Result<LocaleSelection, I18nError> {
    for (source, raw) in candidates.ordered() {
        let Some(candidate) = normalise_locale(raw) else {
            continue;
        };
        match LocaleId::parse(candidate, catalog) {
            Ok(locale) => {
                debug!(target: "treelingo::selection", "using {source} `{locale}`");
                return Ok(LocaleSelection::new(locale, source));
            }
            Err(error) if !source.is_best_effort() => return Err(error),
            Err(_) => warn!(
                target: "treelingo::selection",
                "ignoring unknown {source} `{candidate}`",
            ),
        }
    }

    debug!(target: "treelingo::selection", "no locale requested; using `{default}`");
    Ok(LocaleSelection::new(default.clone(), LocaleSource::Default))
}

/// Reads `TREELINGO_LOCALE`, treating unset and non-UTF-8 values alike.
#[must_use]
pub fn locale_from_environment() -> Option<String> {
    env::var(LOCALE_ENV_VAR).ok()
}

/// Trim whitespace and discard empty locale candidates.
#[must_use]
pub fn normalise_locale(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|value| !value.is_empty())
}
