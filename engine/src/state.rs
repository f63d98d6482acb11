//! Default, current, and forced-fallback locale bookkeeping.

use log::{debug, warn};

use crate::catalog::LocaleCatalog;
use crate::error::Result;
use crate::locale::LocaleId;

/// The locales a translator works with.
///
/// The default locale is always set before the current locale: construction
/// takes a validated default and seeds the current locale from it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleState {
    default: LocaleId,
    current: LocaleId,
    forced_fallback: Option<LocaleId>,
}

impl LocaleState {
    /// Create a state whose current locale equals `default`.
    #[must_use]
    pub fn new(default: LocaleId) -> Self {
        Self {
            current: default.clone(),
            default,
            forced_fallback: None,
        }
    }

    /// Replace the default locale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] when `raw` is unknown to
    /// `catalog`; the previous default stays in place.
    pub fn set_default(&mut self, raw: &str, catalog: &dyn LocaleCatalog) -> Result<()> {
        self.default = LocaleId::parse(raw, catalog)?;
        debug!(target: "treelingo::state", "default locale set to `{}`", self.default);
        Ok(())
    }

    /// Replace the current locale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] when `raw` is unknown to
    /// `catalog`. The current locale is reset to the default before the
    /// error is returned.
    pub fn set_current(&mut self, raw: &str, catalog: &dyn LocaleCatalog) -> Result<()> {
        match LocaleId::parse(raw, catalog) {
            Ok(locale) => {
                self.current = locale;
                debug!(target: "treelingo::state", "current locale set to `{}`", self.current);
                Ok(())
            }
            Err(error) => {
                self.current = self.default.clone();
                Err(error)
            }
        }
    }

    /// Set the forced fallback locale.
    ///
    /// Unknown identifiers are replaced with the default locale rather than
    /// rejected.
    pub fn set_forced_fallback(&mut self, raw: &str, catalog: &dyn LocaleCatalog) {
        let locale = LocaleId::parse(raw, catalog).unwrap_or_else(|_| {
            warn!(
                target: "treelingo::state",
                "unknown forced fallback locale `{raw}`; using default `{}`",
                self.default,
            );
            self.default.clone()
        });
        self.forced_fallback = Some(locale);
    }

    /// Remove the forced fallback locale.
    pub fn clear_forced_fallback(&mut self) {
        self.forced_fallback = None;
    }

    /// The default locale.
    #[must_use]
    pub const fn default_locale(&self) -> &LocaleId {
        &self.default
    }

    /// The current locale.
    #[must_use]
    pub const fn current_locale(&self) -> &LocaleId {
        &self.current
    }

    /// The forced fallback locale, when one is set.
    #[must_use]
    pub const fn forced_fallback_locale(&self) -> Option<&LocaleId> {
        self.forced_fallback.as_ref()
    }

    /// Snapshot the locales for a single resolution.
    #[must_use]
    pub const fn context(&self) -> ResolutionContext<'_> {
        ResolutionContext {
            current: &self.current,
            forced_fallback: self.forced_fallback.as_ref(),
            default: &self.default,
        }
    }
}

/// The locales a single lookup resolves against.
///
/// Resolution functions receive this explicitly instead of reading mutable
/// translator state, so one lookup sees one consistent set of locales.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolutionContext<'a> {
    /// Locale requested by the caller.
    pub current: &'a LocaleId,
    /// Explicit override tried when the current locale has no translations.
    pub forced_fallback: Option<&'a LocaleId>,
    /// Locale used when every other candidate is missing.
    pub default: &'a LocaleId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::error::I18nError;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> StaticCatalog {
        StaticCatalog::from_locales(["de", "en", "en_US", "fr"])
    }

    #[fixture]
    fn state(catalog: StaticCatalog) -> LocaleState {
        let default = LocaleId::parse("de", &catalog)
            .unwrap_or_else(|error| panic!("default should be valid: {error}"));
        LocaleState::new(default)
    }

    #[rstest]
    fn new_state_starts_on_the_default(state: LocaleState) {
        assert_eq!(state.current_locale().as_str(), "de");
        assert_eq!(state.default_locale().as_str(), "de");
        assert!(state.forced_fallback_locale().is_none());
    }

    #[rstest]
    fn invalid_default_keeps_the_previous_value(mut state: LocaleState, catalog: StaticCatalog) {
        let outcome = state.set_default("xx", &catalog);

        assert!(matches!(outcome, Err(I18nError::InvalidLocale { .. })));
        assert_eq!(state.default_locale().as_str(), "de");
    }

    #[rstest]
    fn invalid_current_falls_back_to_default_and_errors(
        mut state: LocaleState,
        catalog: StaticCatalog,
    ) {
        state
            .set_current("en_US", &catalog)
            .unwrap_or_else(|error| panic!("en_US should be valid: {error}"));
        assert_eq!(state.current_locale().as_str(), "en_US");

        let outcome = state.set_current("xx_YY", &catalog);

        assert!(matches!(outcome, Err(I18nError::InvalidLocale { locale }) if locale == "xx_YY"));
        assert_eq!(state.current_locale().as_str(), "de");
    }

    #[rstest]
    #[case("en", "en")]
    #[case("xx", "de")]
    fn forced_fallback_coerces_unknown_locales(
        mut state: LocaleState,
        catalog: StaticCatalog,
        #[case] requested: &str,
        #[case] expected: &str,
    ) {
        state.set_forced_fallback(requested, &catalog);

        assert_eq!(
            state.forced_fallback_locale().map(LocaleId::as_str),
            Some(expected)
        );
    }

    #[rstest]
    fn context_snapshots_every_locale(mut state: LocaleState, catalog: StaticCatalog) {
        state
            .set_current("fr", &catalog)
            .unwrap_or_else(|error| panic!("fr should be valid: {error}"));
        state.set_forced_fallback("en", &catalog);

        let context = state.context();

        assert_eq!(context.current.as_str(), "fr");
        assert_eq!(context.forced_fallback.map(LocaleId::as_str), Some("en"));
        assert_eq!(context.default.as_str(), "de");

        state.clear_forced_fallback();
        assert!(state.context().forced_fallback.is_none());
    }
}
